//! Output abstraction layer
//!
//! Status messages go either straight to the terminal (CLI commands) or
//! into a buffer the TUI draws in its status line.

use colored::Colorize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use taginput::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("a,b,c");
/// output.success("Saved configuration");
/// output.error("Unknown key name");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a result line
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// Terminal writer. Results go to stdout, diagnostics to stderr so
/// `taginput replay ... | cut -d, -f1` only sees tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Drop success and info messages; results and errors still print
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message.dimmed());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Info,
}

#[derive(Debug)]
struct StatusEntry {
    level: MessageLevel,
    text: String,
    posted: Instant,
}

/// Buffered writer for the TUI status line
///
/// Clones share one buffer, so a sink callback can post messages the
/// render loop reads on the next frame. Messages fade after `ttl`.
///
/// # Examples
///
/// ```
/// use taginput::ui::output::{MessageLevel, OutputWriter, StatusBarWriter};
///
/// let writer = StatusBarWriter::new();
/// writer.success("Tag added");
///
/// let (level, message) = writer.latest_message().unwrap();
/// assert_eq!(level, MessageLevel::Success);
/// assert_eq!(message, "Tag added");
/// ```
#[derive(Debug, Clone)]
pub struct StatusBarWriter {
    entries: Arc<Mutex<VecDeque<StatusEntry>>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Oldest entries are dropped beyond this many
    const CAPACITY: usize = 32;

    const DEFAULT_TTL: Duration = Duration::from_secs(5);

    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(Self::CAPACITY))),
            ttl,
        }
    }

    /// Most recent message that has not faded yet
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        let entries = self.entries();
        entries
            .back()
            .filter(|entry| entry.posted.elapsed() < self.ttl)
            .map(|entry| (entry.level, entry.text.clone()))
    }

    /// Number of messages that have not faded yet
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.posted.elapsed() < self.ttl)
            .count()
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<StatusEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn post(&self, level: MessageLevel, text: &str) {
        let mut entries = self.entries();
        if entries.len() == Self::CAPACITY {
            entries.pop_front();
        }
        entries.push_back(StatusEntry {
            level,
            text: text.to_string(),
            posted: Instant::now(),
        });
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn write(&self, message: &str) {
        self.post(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.post(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.post(MessageLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.post(MessageLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_message_wins() {
        let writer = StatusBarWriter::new();
        writer.write("First");
        writer.success("Latest");

        assert_eq!(writer.latest_message(), Some((MessageLevel::Success, "Latest".into())));
        assert_eq!(writer.message_count(), 2);
    }

    #[test]
    fn test_clones_share_buffer() {
        let writer = StatusBarWriter::new();
        writer.clone().info("Saved: a,b");
        assert_eq!(writer.latest_message(), Some((MessageLevel::Info, "Saved: a,b".into())));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let writer = StatusBarWriter::new();
        for i in 0..40 {
            writer.write(&format!("message {i}"));
        }
        assert_eq!(writer.message_count(), StatusBarWriter::CAPACITY);
        assert_eq!(writer.latest_message().unwrap().1, "message 39");
    }

    #[test]
    fn test_messages_fade() {
        let writer = StatusBarWriter::with_ttl(Duration::from_millis(50));
        writer.error("Message");
        assert_eq!(writer.message_count(), 1);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(writer.message_count(), 0);
        assert!(writer.latest_message().is_none());
    }
}
