//! `coffer categories`: print the categories in use for one record kind.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::RecordKind;

/// Execute the `categories` command.
pub fn execute(cli: &Cli, kind: &str) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let session = open_vault(cli)?;

    let categories = session.container.categories(kind);
    if categories.is_empty() {
        output::info(&format!("No {kind} records yet."));
        return Ok(());
    }

    for category in &categories {
        println!("{}", output::category_label(category));
    }

    Ok(())
}
