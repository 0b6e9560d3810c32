//! `coffer init`: create a new, empty vault file.

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CofferError, Result};
use crate::vault::Container;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = vault_path(cli, &settings, &cwd);

    // 1. Never overwrite an existing vault.
    if path.exists() {
        output::tip("Use `coffer add-login` or `coffer add-note` to add records.");
        return Err(CofferError::VaultAlreadyExists(path));
    }

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Write an empty document.
    Container::new().save_to_file(&password, &path)?;
    output::success(&format!("Vault created at {}", path.display()));

    output::tip("Run `coffer add-login <TITLE>` to store a login.");
    output::tip("Run `coffer attach <FILE>` to store a file.");

    Ok(())
}
