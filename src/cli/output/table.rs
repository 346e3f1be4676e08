//! Table output formatting for CLI commands
//!
//! Renders config entries and per-target mint results using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::RetryCache;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Format `config list` entries as a two-column table
    pub fn format_config(&self, entries: &[(String, String)]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for (key, value) in entries {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }

        table.to_string()
    }

    /// Format the per-index results of a run
    pub fn format_results(&self, cache: &RetryCache) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Target").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Mint").add_attribute(Attribute::Bold),
        ]);

        for (index, result) in cache.iter() {
            let (status, color) = match &result.error {
                Some(error) => (error.as_str(), Color::Red),
                None => ("minted", Color::Green),
            };
            let status_cell = if self.use_colors {
                Cell::new(status).fg(color)
            } else {
                Cell::new(status)
            };

            table.add_row(vec![
                Cell::new(index),
                Cell::new(&result.target),
                status_cell,
                Cell::new(result.name.as_deref().unwrap_or("-")),
                Cell::new(result.mint.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the terminal supports colors
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
