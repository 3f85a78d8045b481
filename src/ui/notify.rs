//! ui::notify
//!
//! User-visible notifications.
//!
//! # Design
//!
//! Controllers report outcomes through a [`NotificationSink`]. Delivery is
//! best effort: a sink never fails and never blocks the operation that
//! produced the notice.
//!
//! # Example
//!
//! ```
//! use templatework::ui::notify::{NotificationSink, RecordingSink, Severity};
//!
//! let sink = RecordingSink::new();
//! sink.add_message(Severity::Info, "Template data updated");
//!
//! assert_eq!(sink.last().unwrap().text, "Template data updated");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use super::output::{self, Verbosity};

/// How prominently a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Transient confirmation.
    Info,
    /// Something the user should look at.
    Warn,
    /// An operation failed.
    Error,
    /// An operation failed and the user should contact support.
    Fatal,
}

impl Severity {
    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Whether this severity reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A delivered notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

/// Receives user-visible notices.
pub trait NotificationSink {
    /// Show `text` with the given severity.
    fn add_message(&self, severity: Severity, text: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn add_message(&self, severity: Severity, text: &str) {
        (**self).add_message(severity, text)
    }
}

/// Prints notices to the terminal.
///
/// Info notices go to stdout and respect quiet mode; everything else goes
/// to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    verbosity: Verbosity,
    quiet_info: bool,
}

impl ConsoleSink {
    /// Create a console sink.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            quiet_info: false,
        }
    }

    /// Suppress info notices regardless of verbosity.
    pub fn quiet_info(mut self, quiet: bool) -> Self {
        self.quiet_info = quiet;
        self
    }
}

impl NotificationSink for ConsoleSink {
    fn add_message(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Info if self.quiet_info => {}
            Severity::Info => output::print(text, self.verbosity),
            Severity::Warn => output::warn(text, self.verbosity),
            Severity::Error | Severity::Fatal => output::error(text),
        }
    }
}

/// Collects notices in memory.
///
/// Clones share the same notice list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices in delivery order.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// The most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.lock().last().cloned()
    }

    /// Forget all recorded notices.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Whether any failure notice was recorded.
    pub fn has_failure(&self) -> bool {
        self.lock().iter().any(|n| n.severity.is_failure())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NotificationSink for RecordingSink {
    fn add_message(&self, severity: Severity, text: &str) {
        self.lock().push(Notice {
            severity,
            text: text.to_string(),
        });
    }
}
