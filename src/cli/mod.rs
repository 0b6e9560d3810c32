//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::{Zeroize, Zeroizing};

use crate::config::Settings;
use crate::errors::{CofferError, Result};
use crate::vault::Container;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Coffer CLI: offline password vault.
#[derive(Parser)]
#[command(
    name = "coffer",
    about = "Offline password vault for logins, notes, files and contacts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .coffer.toml, or vault.coffer)
    #[arg(long, global = true, env = "COFFER_VAULT")]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// List the categories used by one kind of record
    Categories {
        /// Record kind: credential, note, attachment or contact
        kind: String,
    },

    /// List records of one kind
    List {
        /// Record kind: credential, note, attachment or contact
        kind: String,
        /// Only show records in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show every field of one record
    Show {
        /// Record kind: credential, note, attachment or contact
        kind: String,
        /// Record uid (see `coffer list`)
        uid: String,
    },

    /// Add a login (title, username, password, URL)
    AddLogin(AddLoginArgs),

    /// Add a free-form note
    AddNote(AddNoteArgs),

    /// Add a contact
    AddContact(AddContactArgs),

    /// Store a file in the vault
    Attach(AttachArgs),

    /// Decrypt an attachment to a temporary file until Enter is pressed
    Open {
        /// Attachment uid
        uid: String,
    },

    /// Write an attachment's plaintext to a file
    ExportFile {
        /// Attachment uid
        uid: String,
        /// Destination path (overwritten if it exists)
        dest: PathBuf,
    },

    /// Generate a random password
    Generate {
        /// Number of characters (default: `password_length` from .coffer.toml)
        #[arg(short, long)]
        length: Option<usize>,
        /// Letters and digits only
        #[arg(long)]
        no_special: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, ignore_case = true)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args)]
pub struct AddLoginArgs {
    /// Title shown in listings
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub category: String,
    #[arg(short, long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub url: String,
    /// Generate the password instead of prompting for it
    #[arg(short, long)]
    pub generate: bool,
    /// Length of a generated password
    #[arg(long, requires = "generate")]
    pub length: Option<usize>,
}

#[derive(clap::Args)]
pub struct AddNoteArgs {
    /// Title shown in listings
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub category: String,
    /// Note text (omit to read from stdin or a prompt)
    pub content: Option<String>,
}

#[derive(clap::Args)]
pub struct AddContactArgs {
    pub first_name: String,
    pub last_name: String,
    #[arg(short, long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub zip: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub country: String,
    #[arg(long, default_value = "")]
    pub comment: String,
}

#[derive(clap::Args)]
pub struct AttachArgs {
    /// File to store
    pub file: PathBuf,
    /// Title shown in listings (default: the file name)
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long, default_value = "")]
    pub category: String,
    /// Securely erase the original once the vault is saved
    #[arg(long)]
    pub erase: bool,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault password, trying in order:
/// 1. `COFFER_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("COFFER_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| CofferError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init`).
///
/// Also respects `COFFER_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("COFFER_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(CofferError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| CofferError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Read a value that should not be echoed: piped stdin if there is one,
/// otherwise a hidden prompt.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end().to_string();
        buf.zeroize();
        return Ok(Zeroizing::new(trimmed));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| CofferError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Resolve the vault file: `--vault` wins, then the configured name.
/// Relative paths are taken from `cwd`.
pub fn vault_path(cli: &Cli, settings: &Settings, cwd: &Path) -> PathBuf {
    match &cli.vault {
        Some(path) => cwd.join(path),
        None => settings.vault_path(cwd),
    }
}

/// An unlocked vault plus everything needed to write it back.
pub struct Session {
    pub container: Container,
    pub path: PathBuf,
    pub settings: Settings,
    password: Zeroizing<String>,
}

impl Session {
    /// Encrypt the container back to its file.
    pub fn save(&self) -> Result<()> {
        self.container.save_to_file(&self.password, &self.path)
    }
}

/// Locate, unlock and load the vault for this invocation.
pub fn open_vault(cli: &Cli) -> Result<Session> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = vault_path(cli, &settings, &cwd);

    if !path.exists() {
        output::tip("Run `coffer init` to create a vault.");
        return Err(CofferError::VaultNotFound(path));
    }

    let password = prompt_password()?;
    let mut container = Container::new();
    container.load_from_file(&password, &path)?;

    Ok(Session {
        container,
        path,
        settings,
        password,
    })
}
