//! Terminal presentation: status lines, the search spinner and tables.
//!
//! Everything here renders data from a [`Snapshot`](crate::manager::Snapshot)
//! or its parts; nothing in this module changes manager state.

use comfy_table::{presets, Attribute, Cell, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::manager::Snapshot;
use crate::models::{ListItem, ReferenceBook, SearchOutcome};
use crate::utils::truncate_with_ellipsis;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Welcome banner for the interactive shell.
pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        "Book Bound".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("Find your next great read and keep track of your TBR list.");
    println!("Type {} for commands.", "help".bold());
    println!();
}

/// One-line description of where results came from
pub fn outcome_note(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Remote => "from Open Library".to_string(),
        SearchOutcome::Offline => "from the reference catalog".to_string(),
        SearchOutcome::Fallback { reason } => {
            format!("from the reference catalog (lookup failed: {})", reason)
        }
    }
}

/// Print search results header.
pub fn print_search_header(query: &str, count: usize, outcome: &SearchOutcome) {
    let status = if matches!(outcome, SearchOutcome::Fallback { .. }) {
        Status::Warning
    } else {
        Status::Search
    };
    print_status(
        status,
        &format!(
            "{} result(s) for \"{}\" {}",
            count.to_string().green().bold(),
            query.cyan().bold(),
            outcome_note(outcome).dimmed()
        ),
    );
}

/// Spinner shown while a lookup is in flight
pub struct SearchSpinner {
    spinner: indicatif::ProgressBar,
}

impl SearchSpinner {
    /// Start spinning for a query. Hidden when stdout is not a terminal.
    pub fn start(query: &str) -> Self {
        let spinner = if is_terminal() {
            indicatif::ProgressBar::new_spinner()
        } else {
            indicatif::ProgressBar::hidden()
        };

        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        spinner.set_message(format!("Searching for \"{}\"...", query));
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self { spinner }
    }

    /// Spinner for the query in flight, if the snapshot shows one
    pub fn for_snapshot(view: &Snapshot) -> Option<Self> {
        view.loading.then(|| Self::start(&view.query))
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        self.spinner.finish_and_clear();
    }
}

/// Table of search results, numbered from 1 for `add <n>`
pub fn results_table(books: &[ReferenceBook]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Author", "Published"]);

    for (i, book) in books.iter().enumerate() {
        let index = if book.is_no_results() {
            String::new()
        } else {
            (i + 1).to_string()
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(truncate_with_ellipsis(&book.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&book.author, 30)),
            Cell::new(&book.release_date),
        ]);
    }

    table
}

/// Table of TBR entries
pub fn items_table(items: &[ListItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Id", "Done", "Book"]);

    for item in items {
        let text = Cell::new(truncate_with_ellipsis(&item.display_text, 70));
        let text = if item.completed {
            text.add_attribute(Attribute::CrossedOut)
        } else {
            text
        };
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(if item.completed { "[x]" } else { "[ ]" }),
            text,
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::ListManager;
    use crate::search::SearchEngine;
    use crate::sources::StaticCatalog;

    #[test]
    fn test_results_table_numbers_rows() {
        let table = results_table(&[
            ReferenceBook::new("Dune", "Frank Herbert", "1965"),
            ReferenceBook::new("Begin Again", "Emma Lord", "2024-01-09"),
        ]);
        let rendered = table.to_string();
        assert!(rendered.contains("Dune"));
        assert!(rendered.contains("Emma Lord"));
        assert!(rendered.contains(" 2 "));
    }

    #[test]
    fn test_results_table_placeholder_has_no_number() {
        let rendered = results_table(&[ReferenceBook::no_results()]).to_string();
        assert!(rendered.contains("No results"));
        assert!(!rendered.contains('1'));
    }

    #[test]
    fn test_items_table_marks_completed() {
        let mut done = ListItem::new(1, "Dune by Frank Herbert (1965)");
        done.completed = true;
        let rendered = items_table(&[done, ListItem::new(2, "Begin Again")]).to_string();
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("[ ]"));
    }

    #[tokio::test]
    async fn test_spinner_follows_loading_flag() {
        let mut manager = ListManager::new(SearchEngine::offline(StaticCatalog::seeded()));
        manager.set_query("dune");
        assert!(SearchSpinner::for_snapshot(&manager.snapshot()).is_none());

        let pending = manager.start_search();
        let spinner = SearchSpinner::for_snapshot(&manager.snapshot());
        assert!(spinner.is_some());

        manager.finish_search(pending.run().await);
        spinner.into_iter().for_each(SearchSpinner::finish);
        assert!(SearchSpinner::for_snapshot(&manager.snapshot()).is_none());
    }

    #[test]
    fn test_outcome_note() {
        assert_eq!(outcome_note(&SearchOutcome::Remote), "from Open Library");
        let note = outcome_note(&SearchOutcome::Fallback {
            reason: "timeout".to_string(),
        });
        assert!(note.contains("timeout"));
    }
}
