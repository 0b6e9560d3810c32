//! `coffer attach`: copy a file into the vault, optionally erasing it.

use crate::cli::output;
use crate::cli::{open_vault, AttachArgs, Cli};
use crate::errors::Result;
use crate::fs::secure_erase;
use crate::vault::Attachment;

/// Execute the `attach` command.
pub fn execute(cli: &Cli, args: &AttachArgs) -> Result<()> {
    let mut session = open_vault(cli)?;

    let title = match &args.title {
        Some(t) => t.clone(),
        None => args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.file.display().to_string()),
    };

    let mut attachment = Attachment::new(&title, &args.category);
    attachment.upload(&args.file, None)?;
    let size = attachment.content.len();

    let uid = session.container.upsert(attachment)?;
    session.save()?;
    output::success(&format!("Attached '{title}' ({size} bytes) as {uid}"));

    // The original is only erased once the vault holding its bytes is on disk.
    if args.erase {
        secure_erase(&args.file, session.settings.erase_iterations)?;
        output::info(&format!(
            "Erased {} ({} passes)",
            args.file.display(),
            session.settings.erase_iterations
        ));
    }

    Ok(())
}
