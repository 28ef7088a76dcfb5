//! File-backed document used by the command-line host.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Editor, Position};

/// Failure loading or saving a document file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Reading the file failed.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the file failed.
    #[error("cannot write {path}: {source}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Plain-text document with a cursor and an optional selection.
///
/// Positions past the end of a line or of the document clamp to the nearest valid place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Full text.
    text: String,
    /// Cursor (the selection head when a selection is active).
    cursor: Position,
    /// Selection anchor; `Some` while a selection is active.
    anchor: Option<Position>,
}

impl Document {
    /// Document holding `text` with the cursor at the very start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: Position::default(),
            anchor: None,
        }
    }

    /// What: Read a document from disk; a missing file is an empty document.
    ///
    /// # Errors
    /// - `DocumentError::Read` for any other I/O failure.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::new(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// What: Write the document text to `path`.
    ///
    /// # Errors
    /// - `DocumentError::Write` when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, &self.text).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor and clear any selection.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
    }

    /// Place the cursor after the last character.
    pub fn move_to_end(&mut self) {
        let end = self.end_position();
        self.set_cursor(end);
    }

    /// Select from `anchor` to `head`; an empty range clears the selection.
    pub fn select(&mut self, anchor: Position, head: Position) {
        let (anchor, head) = (self.clamp(anchor), self.clamp(head));
        self.cursor = head;
        self.anchor = (anchor != head).then_some(anchor);
    }

    /// Selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let (from, to) = self.selection_offsets()?;
        Some(&self.text[from..to])
    }

    /// Position just after the last character.
    #[must_use]
    pub fn end_position(&self) -> Position {
        let line = self.text.split('\n').count().saturating_sub(1);
        let ch = self.text.rsplit('\n').next().map_or(0, |l| l.chars().count());
        Position { line, ch }
    }

    /// Clamp `pos` onto an existing line and column.
    fn clamp(&self, pos: Position) -> Position {
        let offset = self.offset_of(pos);
        self.position_of(offset)
    }

    /// What: Byte offset of a line/column position.
    ///
    /// Inputs:
    /// - `pos`: Zero-based line and character column.
    ///
    /// Output:
    /// - Byte offset into `text`, clamped to the end of the line or document.
    fn offset_of(&self, pos: Position) -> usize {
        let mut line_start = 0;
        for _ in 0..pos.line {
            match self.text[line_start..].find('\n') {
                Some(nl) => line_start += nl + 1,
                None => return self.text.len(),
            }
        }
        let line = &self.text[line_start..];
        let line = line.split('\n').next().unwrap_or(line);
        let col = line
            .char_indices()
            .nth(pos.ch)
            .map_or(line.len(), |(i, _)| i);
        line_start + col
    }

    /// Line/column of a byte offset that lies on a char boundary.
    fn position_of(&self, offset: usize) -> Position {
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let ch = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        Position { line, ch }
    }

    /// Ordered byte range of the active selection.
    fn selection_offsets(&self) -> Option<(usize, usize)> {
        let anchor = self.offset_of(self.anchor?);
        let head = self.offset_of(self.cursor);
        Some((anchor.min(head), anchor.max(head)))
    }
}

impl Editor for Document {
    fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    fn replace_selection(&mut self, text: &str) {
        let Some((from, to)) = self.selection_offsets() else {
            self.insert_at_cursor(text);
            return;
        };
        self.text.replace_range(from..to, text);
        self.anchor = None;
        self.cursor = self.position_of(from + text.len());
    }

    fn insert_at_cursor(&mut self, text: &str) {
        let at = self.offset_of(self.cursor);
        self.text.insert_str(at, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn pos(line: usize, ch: usize) -> Position {
        Position { line, ch }
    }

    #[test]
    fn insert_at_cursor_keeps_cursor_in_place() {
        let mut doc = Document::new("hello\nworld");
        doc.set_cursor(pos(1, 2));
        doc.insert_at_cursor("XY");
        assert_eq!(doc.text(), "hello\nwoXYrld");
        assert_eq!(doc.cursor(), pos(1, 2));
    }

    #[test]
    /// What: Replacing a backwards selection swaps exactly the selected text.
    ///
    /// Inputs:
    /// - Selection from (1,3) back to (0,2) across a newline.
    ///
    /// Output:
    /// - Text replaced, selection cleared, cursor after the replacement.
    fn replace_selection_handles_reversed_ranges() {
        let mut doc = Document::new("hello\nworld");
        doc.select(pos(1, 3), pos(0, 2));
        assert_eq!(doc.selected_text(), Some("llo\nwor"));
        doc.replace_selection("[new]");
        assert_eq!(doc.text(), "he[new]ld");
        assert!(!doc.has_selection());
        assert_eq!(doc.cursor(), pos(0, 7));
    }

    #[test]
    fn positions_clamp_to_existing_text() {
        let mut doc = Document::new("ab\ncdé");
        doc.set_cursor(pos(0, 99));
        assert_eq!(doc.cursor(), pos(0, 2));
        doc.set_cursor(pos(7, 0));
        assert_eq!(doc.cursor(), pos(1, 3));
        assert_eq!(doc.end_position(), pos(1, 3));
        doc.insert_at_cursor("!");
        assert_eq!(doc.text(), "ab\ncdé!");
    }

    #[test]
    fn empty_selection_is_no_selection() {
        let mut doc = Document::new("abc");
        doc.select(pos(0, 1), pos(0, 1));
        assert!(!doc.has_selection());
    }

    #[test]
    fn load_missing_file_is_empty_and_save_round_trips() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let path = tmp.path().join("note.md");
        let mut doc = Document::load(&path).expect("missing file loads");
        assert_eq!(doc.text(), "");
        doc.insert_at_cursor("line\n");
        doc.save(&path).expect("Failed to save document");
        assert_eq!(Document::load(&path).expect("reload").text(), "line\n");
    }
}
