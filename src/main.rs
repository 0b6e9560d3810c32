use clap::Parser;
use coffer::cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // Library diagnostics go to stderr; COFFER_LOG overrides the default.
    let filter = EnvFilter::try_from_env("COFFER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Init => coffer::cli::commands::init::execute(&cli),
        Commands::Categories { ref kind } => {
            coffer::cli::commands::categories::execute(&cli, kind)
        }
        Commands::List {
            ref kind,
            ref category,
        } => coffer::cli::commands::list::execute(&cli, kind, category.as_deref()),
        Commands::Show { ref kind, ref uid } => {
            coffer::cli::commands::show::execute(&cli, kind, uid)
        }
        Commands::AddLogin(ref args) => coffer::cli::commands::add_login::execute(&cli, args),
        Commands::AddNote(ref args) => coffer::cli::commands::add_note::execute(&cli, args),
        Commands::AddContact(ref args) => coffer::cli::commands::add_contact::execute(&cli, args),
        Commands::Attach(ref args) => coffer::cli::commands::attach::execute(&cli, args),
        Commands::Open { ref uid } => coffer::cli::commands::open::execute(&cli, uid),
        Commands::ExportFile { ref uid, ref dest } => {
            coffer::cli::commands::export_file::execute(&cli, uid, dest)
        }
        Commands::Generate { length, no_special } => {
            coffer::cli::commands::generate::execute(length, no_special)
        }
        Commands::Completions { shell } => coffer::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        coffer::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
