//! `coffer add-login`: store a login, typing or generating its password.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, AddLoginArgs, Cli};
use crate::errors::Result;
use crate::vault::{Credential, RecordKind};

/// Execute the `add-login` command.
pub fn execute(cli: &Cli, args: &AddLoginArgs) -> Result<()> {
    let mut session = open_vault(cli)?;

    let mut login = Credential::new(&args.title, &args.category, &args.username, "", &args.url);
    if args.generate {
        let length = args.length.unwrap_or(session.settings.password_length);
        login.generate_secret(length, &session.settings.special_characters);
    } else {
        login.secret = read_secret(&format!("Password for {}", args.title))?.to_string();
    }

    let uid = session.container.upsert(login)?;
    session.save()?;

    output::success(&format!(
        "Login '{}' added ({} total)",
        args.title,
        session.container.count(RecordKind::Credential)
    ));
    output::tip(&format!("Run `coffer show credential {uid}` to see it."));

    Ok(())
}
