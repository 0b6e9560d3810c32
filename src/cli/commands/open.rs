//! `coffer open`: map an attachment to a plaintext file, wait, unmap.

use std::io::{self, BufRead};

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::fs::SecureEraser;

/// Execute the `open` command.
pub fn execute(cli: &Cli, uid: &str) -> Result<()> {
    let mut session = open_vault(cli)?;
    let map_dir = session.settings.map_dir();
    let mut eraser = SecureEraser::new(session.settings.erase_iterations);

    let attachment = session.container.attachment_mut(uid)?;
    let path = attachment.map_in(&map_dir)?;

    output::info(&format!("'{}' is available at:", attachment.title));
    println!("{}", path.display());
    output::warning("The file is unencrypted until you press Enter.");

    let mut line = String::new();
    let waited = io::stdin().lock().read_line(&mut line);

    // Unmap even if reading stdin failed.
    attachment.unmap(&mut eraser)?;
    waited?;

    output::success("Temporary file erased");

    Ok(())
}
