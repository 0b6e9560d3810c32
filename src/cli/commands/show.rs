//! `coffer show`: print every field of one record.
//!
//! Secrets are printed in clear; attachments only show their size.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::{Attachment, Contact, Container, Credential, Note, Record, RecordKind};

/// Execute the `show` command.
pub fn execute(cli: &Cli, kind: &str, uid: &str) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let session = open_vault(cli)?;

    let fields = record_fields(&session.container, kind, uid)?;
    output::print_fields(&fields);

    if kind == RecordKind::Attachment {
        output::tip(&format!("Run `coffer open {uid}` to view the file."));
    }

    Ok(())
}

fn record_fields(
    container: &Container,
    kind: RecordKind,
    uid: &str,
) -> Result<Vec<(&'static str, String)>> {
    let fields = match kind {
        RecordKind::Credential => {
            let c = container.get::<Credential>(uid)?;
            vec![
                ("uid", c.uid().to_string()),
                ("title", c.title.clone()),
                ("category", c.category.clone()),
                ("username", c.username.clone()),
                ("password", c.secret.clone()),
                ("url", c.url.clone()),
                ("last change", c.last_change.format("%Y-%m-%d %H:%M:%S").to_string()),
            ]
        }
        RecordKind::Note => {
            let n = container.get::<Note>(uid)?;
            vec![
                ("uid", n.uid().to_string()),
                ("title", n.title.clone()),
                ("category", n.category.clone()),
                ("content", n.content.clone()),
            ]
        }
        RecordKind::Attachment => {
            let a = container.get::<Attachment>(uid)?;
            vec![
                ("uid", a.uid().to_string()),
                ("title", a.title.clone()),
                ("category", a.category.clone()),
                ("size", format!("{} bytes", a.content.len())),
            ]
        }
        RecordKind::Contact => {
            let c = container.get::<Contact>(uid)?;
            vec![
                ("uid", c.uid().to_string()),
                ("name", c.title()),
                ("category", c.category.clone()),
                ("email", c.email.clone()),
                ("phone", c.phone.clone()),
                ("street", c.street.clone()),
                ("zip", c.zip.clone()),
                ("city", c.city.clone()),
                ("country", c.country.clone()),
                ("comment", c.comment.clone()),
            ]
        }
    };

    Ok(fields)
}
