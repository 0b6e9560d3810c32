//! `coffer generate`: print a random password.  No vault needed.

use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::{CofferError, Result};

/// Execute the `generate` command.
pub fn execute(length: Option<usize>, no_special: bool) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    let length = length.unwrap_or(settings.password_length);
    if length == 0 {
        return Err(CofferError::CommandFailed(
            "password length must be at least 1".into(),
        ));
    }

    let specials = if no_special {
        ""
    } else {
        settings.special_characters.as_str()
    };

    println!("{}", generate_password(length, specials));

    Ok(())
}
