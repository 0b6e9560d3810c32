//! `coffer export-file`: write an attachment's plaintext to a chosen path.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::Attachment;

/// Execute the `export-file` command.
pub fn execute(cli: &Cli, uid: &str, dest: &Path) -> Result<()> {
    let session = open_vault(cli)?;
    let attachment = session.container.get::<Attachment>(uid)?;

    attachment.export_to(dest)?;

    output::success(&format!(
        "Exported '{}' to {}",
        attachment.title,
        dest.display()
    ));
    output::warning("The exported file is not encrypted.");

    Ok(())
}
