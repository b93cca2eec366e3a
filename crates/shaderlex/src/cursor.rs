//! Character cursor over shader source text. The lexer pulls characters from
//! here and asks it which line it is on, so every token can be mapped back to
//! the line a diagnostic should point at.
//!
//! Types:
//!
//! - `SourceCursor` owns the decoded characters, the read offset, and the
//!   0-based line of the last character consumed.
//! - `CursorError` reports a reset outside the text.
//!
//! Positions are character offsets, not byte offsets, so multi-byte text in
//! comments or strings does not skew ranges.
use thiserror::Error;

/// Returned by [`SourceCursor::peek`] and [`SourceCursor::next`] past the end.
pub const END_OF_INPUT: char = '\0';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor offset {position} is outside source of {len} characters")]
    OutOfRange { position: usize, len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct SourceCursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl SourceCursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 0,
        }
    }

    /// Rebinds the cursor to `text`, starting at the character offset `position`.
    ///
    /// On error the cursor keeps its previous content.
    pub fn reset(&mut self, text: &str, position: usize) -> Result<(), CursorError> {
        let chars: Vec<char> = text.chars().collect();
        if position > chars.len() {
            return Err(CursorError::OutOfRange {
                position,
                len: chars.len(),
            });
        }
        self.line = chars[..position].iter().filter(|&&c| c == '\n').count();
        self.chars = chars;
        self.pos = position;
        Ok(())
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self, offset: usize) -> char {
        self.chars
            .get(self.pos + offset)
            .copied()
            .unwrap_or(END_OF_INPUT)
    }

    pub fn next(&mut self) -> char {
        let Some(&ch) = self.chars.get(self.pos) else {
            return END_OF_INPUT;
        };
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
        }
        ch
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn current_line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
