//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Errors are
//! always shown.

use std::fmt::Display;

use crate::core::types::ContainerId;
use crate::resolver::TemplateView;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one row of a template listing.
///
/// ```text
/// * 1b4e28ba  Base metadata   used 3   owner 7  (inherited)
/// ```
///
/// The leading `*` marks the container's default template.
pub fn format_template_row(view: &TemplateView<'_>, is_default: bool) -> String {
    let marker = if is_default { '*' } else { ' ' };
    let mut row = format!(
        "{} {}  {:<24}  used {:<4}  owner {}",
        marker,
        view.template.id.short(),
        view.template.name,
        view.template.usage_count,
        view.display_owner
    );
    if view.inherited {
        row.push_str("  (inherited)");
    }
    row
}

/// Format a container reference for messages.
pub fn format_container(id: ContainerId, alias: &str) -> String {
    format!("{} ({})", alias, id)
}
