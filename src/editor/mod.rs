//! Host editor seams: where text goes and where notices are shown.

mod document;

pub use document::{Document, DocumentError};

/// Zero-based line and character column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line index.
    pub line: usize,
    /// Character (not byte) index within the line.
    pub ch: usize,
}

/// The host's document and cursor model.
pub trait Editor {
    /// Whether a non-empty selection is active.
    fn has_selection(&self) -> bool;
    /// Replace the active selection with `text`.
    fn replace_selection(&mut self, text: &str);
    /// Insert `text` at the cursor; cursor placement afterwards is up to the host.
    fn insert_at_cursor(&mut self, text: &str);
}

/// Transient user-visible messages.
pub trait Notifier {
    /// Show `message` to the user.
    fn notice(&mut self, message: &str);
}

/// Notifier that records messages, for hosts that display them later (and for tests).
#[derive(Clone, Debug, Default)]
pub struct CollectingNotifier {
    /// Messages in the order they were raised.
    pub messages: Vec<String>,
}

impl Notifier for CollectingNotifier {
    fn notice(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
