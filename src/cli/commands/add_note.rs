//! `coffer add-note`: store a free-form note.

use crate::cli::output;
use crate::cli::{open_vault, read_secret, AddNoteArgs, Cli};
use crate::errors::Result;
use crate::vault::{Note, RecordKind};

/// Execute the `add-note` command.
pub fn execute(cli: &Cli, args: &AddNoteArgs) -> Result<()> {
    let content = match &args.content {
        Some(text) => {
            output::warning("Note given on command line; it may appear in shell history.");
            text.clone()
        }
        None => read_secret(&format!("Text for {}", args.title))?.to_string(),
    };

    let mut session = open_vault(cli)?;
    session
        .container
        .upsert(Note::new(&args.title, &args.category, content))?;
    session.save()?;

    output::success(&format!(
        "Note '{}' added ({} total)",
        args.title,
        session.container.count(RecordKind::Note)
    ));

    Ok(())
}
