//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

const RULE_WIDTH: usize = 56;

/// Print the application header with name and version.
pub fn header(version: &str) {
    println!("{} {}", "courtedge".bold(), version.dimmed());
    println!();
}

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<18} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("  {}", message.dimmed());
}

/// Emphasize a command or value inside a sentence.
#[must_use]
pub fn highlight(text: &str) -> String {
    text.cyan().to_string()
}

/// Print rows as an indented table.
pub fn table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }
}
