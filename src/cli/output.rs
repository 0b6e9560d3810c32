//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::RecordKind;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// How an empty category is shown to the user.
pub fn category_label(category: &str) -> &str {
    if category.is_empty() {
        "(none)"
    } else {
        category
    }
}

/// One line of `coffer list`.
pub struct RecordRow {
    pub uid: String,
    pub title: String,
    pub category: String,
}

/// Print a table of records (Uid, Title, Category).
pub fn print_records_table(kind: RecordKind, rows: &[RecordRow]) {
    if rows.is_empty() {
        info(&format!("No {kind} records found."));
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Uid", "Title", "Category"]);

    for r in rows {
        table.add_row(vec![
            r.uid.clone(),
            r.title.clone(),
            category_label(&r.category).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a two-column Field / Value table for `coffer show`.
pub fn print_fields(fields: &[(&str, String)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    for (name, value) in fields {
        table.add_row(vec![name.to_string(), value.clone()]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_has_a_label() {
        assert_eq!(category_label(""), "(none)");
        assert_eq!(category_label("banking"), "banking");
    }
}
