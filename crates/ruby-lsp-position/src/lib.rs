//! Position/offset conversion for the Ruby LSP document model.
//!
//! Positions are counted in Unicode code points, not UTF-16 code units. The
//! LSP specification calls for UTF-16 column counting, but the system this
//! backend models counts code points throughout; this crate preserves that
//! choice rather than "fixing" it (see SPEC_FULL.md's Open Question
//! resolutions).

use serde::{Deserialize, Serialize};

/// A zero-based line/character position. `character` counts Unicode code
/// points from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range with `start <= end` in lexicographic (line, character) order.
/// Half-open on the end character for edit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Caches the code-point offset of the start of each line in a buffer, so
/// that position <-> offset conversion doesn't rescan the whole text.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    /// Code-point offset of the first character of each line.
    line_starts: Vec<usize>,
    /// Total code points in the buffer.
    total_len: usize,
}

impl LineIndex {
    /// Build a line index over `text`, scanning it once.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut total_len = 0;
        for ch in text.chars() {
            total_len += 1;
            if ch == '\n' {
                line_starts.push(total_len);
            }
        }
        Self { line_starts, total_len }
    }

    /// Total code points in the indexed buffer.
    pub fn len(&self) -> usize {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Number of lines (newline-separated segments), always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Code points in a given line, excluding its trailing newline. Returns
    /// `None` for an out-of-range line.
    fn line_len(&self, line: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        let end = if line + 1 < self.line_starts.len() {
            // exclude the newline code point itself
            self.line_starts[line + 1] - 1
        } else {
            self.total_len
        };
        Some(end.saturating_sub(start))
    }

    /// Convert a position to a code-point offset into the buffer.
    ///
    /// `pos.line` counts newlines; `pos.character` advances into the
    /// resulting line, saturating at end-of-line. Out-of-range positions
    /// clamp to the end of the buffer.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let line = pos.line as usize;
        let Some(start) = self.line_starts.get(line).copied() else {
            return self.total_len;
        };
        let line_len = self.line_len(line).unwrap_or(0);
        start + (pos.character as usize).min(line_len)
    }

    /// Convert a code-point offset back into a (line, character) position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.total_len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let start = self.line_starts[line];
        Position::new(line as u32, (offset - start) as u32)
    }

    /// The position just past the last code point in the buffer.
    pub fn end_position(&self) -> Position {
        let last_line = self.line_starts.len() - 1;
        let len = self.line_len(last_line).unwrap_or(0);
        Position::new(last_line as u32, len as u32)
    }
}
