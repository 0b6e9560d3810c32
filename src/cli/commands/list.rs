//! `coffer list`: tabulate the records of one kind.

use crate::cli::output::{self, RecordRow};
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::{Container, RecordKind};

/// Execute the `list` command.
pub fn execute(cli: &Cli, kind: &str, category: Option<&str>) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let session = open_vault(cli)?;

    let rows = collect_rows(&session.container, kind, category);
    output::print_records_table(kind, &rows);

    if category.is_none() && !rows.is_empty() {
        output::tip(&format!("Run `coffer show {kind} <UID>` to see a record."));
    }

    Ok(())
}

/// Rows for `kind`, grouped by category (one category if given), ordered
/// by category then uid.
fn collect_rows(container: &Container, kind: RecordKind, category: Option<&str>) -> Vec<RecordRow> {
    let categories = match category {
        Some(c) => vec![c.to_string()],
        None => container.categories(kind).into_iter().collect(),
    };

    categories
        .into_iter()
        .flat_map(|category| {
            container
                .elements_by_category(kind, &category)
                .into_iter()
                .map(move |(uid, title)| RecordRow {
                    uid,
                    title,
                    category: category.clone(),
                })
        })
        .collect()
}
