//! One module per subcommand, each exposing `execute`.

pub mod add_contact;
pub mod add_login;
pub mod add_note;
pub mod attach;
pub mod categories;
pub mod completions;
pub mod export_file;
pub mod generate;
pub mod init;
pub mod list;
pub mod open;
pub mod show;
