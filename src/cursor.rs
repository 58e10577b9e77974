//! Character cursor over a single line of Lettercode source
//!
//! The parser reads characters straight off the cursor; there is no token
//! stream. Movement never fails: `next()` and `peek()` saturate at the last
//! character and `previous()` floors at the first one. Callers compare the
//! characters they get back against what the grammar expects.

use crate::parser::{ParseError, ParseResult};

/// Escape letter used inside delimited literals
pub const ESCAPE: char = 'g';

/// Position-tracking view over the program text
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    /// Set once `next()` is called while standing on the last character
    exhausted: bool,
}

impl Cursor {
    /// Create a cursor at the first character of `source`.
    ///
    /// The source must be non-empty and must not contain spaces.
    pub fn new(source: &str) -> ParseResult<Self> {
        let chars: Vec<char> = source.chars().collect();
        if chars.is_empty() {
            return Err(ParseError::EmptySource);
        }
        if let Some(index) = chars.iter().position(|c| *c == ' ') {
            return Err(ParseError::SpaceInSource { index });
        }
        Ok(Self {
            chars,
            pos: 0,
            exhausted: false,
        })
    }

    /// Character at the current position
    pub fn current(&self) -> char {
        self.chars[self.pos]
    }

    /// Advance one position and return the new current character.
    ///
    /// On the last character the position stays put and the cursor is marked
    /// exhausted.
    pub fn next(&mut self) -> char {
        if self.has_next() {
            self.pos += 1;
        } else {
            self.exhausted = true;
        }
        self.current()
    }

    /// Character after the current one, or the current one at the end
    pub fn peek(&self) -> char {
        if self.has_next() {
            self.chars[self.pos + 1]
        } else {
            self.current()
        }
    }

    /// Character before the current one, or the first character at the start
    pub fn previous(&self) -> char {
        self.chars[self.pos.saturating_sub(1)]
    }

    /// True while the cursor is not on the last character
    pub fn has_next(&self) -> bool {
        self.pos < self.chars.len() - 1
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.pos
    }

    /// Number of characters consumed so far.
    ///
    /// Equal to `index()` except after the last character has been stepped
    /// over, where it is the source length.
    pub fn offset(&self) -> usize {
        self.pos + usize::from(self.exhausted)
    }

    /// True once the last character has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Source length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false, construction rejects empty sources
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Read the content between the delimiter under the cursor and its next
    /// occurrence.
    ///
    /// A `g` directly before the delimiter makes it literal, unless that `g`
    /// is itself escaped (`gg`). The returned text is raw: escape sequences are
    /// resolved by the literal parser. Leaves the cursor on the closing
    /// delimiter.
    pub fn read_delimited(&mut self) -> ParseResult<String> {
        let start = self.pos;
        let delimiter = self.current();
        let mut content = String::new();

        loop {
            if !self.has_next() {
                return Err(ParseError::UnterminatedLiteral {
                    delimiter,
                    index: start,
                });
            }
            if self.peek() == delimiter {
                let escaped =
                    self.pos > start && self.current() == ESCAPE && self.previous() != ESCAPE;
                if !escaped {
                    break;
                }
            }
            content.push(self.next());
        }

        self.next();
        Ok(content)
    }

    /// Read a run of uppercase letters and digits, returned lowercased.
    ///
    /// With `keep_position` the cursor is left on the last character of the
    /// run, otherwise on the first character after it.
    pub fn read_identifier(&mut self, keep_position: bool) -> String {
        let mut name = String::new();
        while is_identifier_char(self.current()) && !self.exhausted {
            name.push(self.current().to_ascii_lowercase());
            self.next();
        }
        if keep_position && !self.exhausted && !name.is_empty() {
            self.pos -= 1;
        }
        name
    }
}

/// Characters allowed inside a variable name
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}
