//! `coffer add-contact`: store a contact.

use crate::cli::output;
use crate::cli::{open_vault, AddContactArgs, Cli};
use crate::errors::Result;
use crate::vault::Contact;

/// Execute the `add-contact` command.
pub fn execute(cli: &Cli, args: &AddContactArgs) -> Result<()> {
    let mut session = open_vault(cli)?;

    let mut contact = Contact::new(&args.first_name, &args.last_name, &args.category);
    contact.email = args.email.clone();
    contact.phone = args.phone.clone();
    contact.street = args.street.clone();
    contact.zip = args.zip.clone();
    contact.city = args.city.clone();
    contact.country = args.country.clone();
    contact.comment = args.comment.clone();

    let title = contact.title();
    session.container.upsert(contact)?;
    session.save()?;

    output::success(&format!("Contact '{title}' added"));

    Ok(())
}
