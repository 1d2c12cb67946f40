#![cfg_attr(not(test), no_std)]

/*!
Low-level character cursor used by `argot`. A [`Reader`] owns a piece of
text and a position inside it, and exposes just enough movement and
lookaround to let type strategies consume their own tokens. No argument
handling happens here.
*/

extern crate alloc;

use alloc::{boxed::Box, string::String};
use core::fmt::{self, Debug};

/**
A cursor over an immutable sequence of characters.

The cursor is a signed index and is allowed to wander outside of the text;
every operation that reports a character returns [`None`] in that case
rather than panicking. Stepping past the end is how a [`Reader`] signals
that it is exhausted.

The cursor is private: callers move it only through [`next`][Reader::next],
[`prev`][Reader::prev], [`collect`][Reader::collect] and
[`skip`][Reader::skip].
*/
#[derive(Clone)]
pub struct Reader {
    text: Box<[char]>,
    idx: isize,
}

impl Reader {
    /// Create a new reader positioned at the first character of `text`.
    #[inline]
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            idx: 0,
        }
    }

    #[inline]
    fn get(&self, idx: isize) -> Option<char> {
        usize::try_from(idx)
            .ok()
            .and_then(|idx| self.text.get(idx))
            .copied()
    }

    /// The character under the cursor, or [`None`] if the cursor is out of
    /// bounds.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.get(self.idx)
    }

    /// Move forward one character and return the new current character.
    #[inline]
    pub fn next(&mut self) -> Option<char> {
        self.next_by(1)
    }

    /// Move forward by `amount` characters and return the new current
    /// character.
    #[inline]
    pub fn next_by(&mut self, amount: isize) -> Option<char> {
        self.idx = self.idx.saturating_add(amount);
        self.current()
    }

    /// Move back one character and return the new current character.
    #[inline]
    pub fn prev(&mut self) -> Option<char> {
        self.prev_by(1)
    }

    /// Move back by `amount` characters and return the new current
    /// character.
    #[inline]
    pub fn prev_by(&mut self, amount: isize) -> Option<char> {
        self.idx = self.idx.saturating_sub(amount);
        self.current()
    }

    /// Look at the character `offset` away from the cursor without moving.
    #[inline]
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<char> {
        self.get(self.idx.saturating_add(offset))
    }

    /**
    Look up a character by index.

    A positive `index` is an absolute position in the text. Zero or a
    negative `index` is instead an offset *behind* the cursor, so `at(-2)`
    is two characters back and `at(0)` resolves through that same path to
    the character under the cursor.
     */
    #[inline]
    #[must_use]
    pub fn at(&self, index: isize) -> Option<char> {
        match index > 0 {
            true => self.get(index),
            false => self.get(self.idx.saturating_sub(index.saturating_abs())),
        }
    }

    /// Consume and return the longest run of characters, starting at the
    /// cursor, that satisfy `pred`. Returns an empty string if the current
    /// character doesn't match or the reader is exhausted.
    pub fn collect(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let mut run = String::new();

        while let Some(c) = self.current().filter(|&c| pred(c)) {
            run.push(c);
            self.next();
        }

        run
    }

    /// Advance past the longest run of characters that satisfy `pred`,
    /// without keeping them.
    pub fn skip(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.current().is_some_and(&mut pred) {
            self.next();
        }
    }

    /// The current cursor position. May be negative or past the end.
    #[inline]
    #[must_use]
    pub fn position(&self) -> isize {
        self.idx
    }

    /// The number of characters in the underlying text.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if the cursor no longer points at a character.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    /// Everything from the cursor to the end of the text. Empty if the
    /// cursor is past the end; the whole text if it is before the start.
    #[must_use]
    pub fn remaining(&self) -> String {
        let start = usize::try_from(self.idx).unwrap_or(0);
        self.text.get(start..).unwrap_or(&[]).iter().collect()
    }
}

impl From<&str> for Reader {
    #[inline]
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/**
Debug-print a reader as its text, with the cursor marked by a `|`. A cursor
outside of the text is shown as a plain index instead.
 */
impl Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cursor = usize::try_from(self.idx)
            .ok()
            .filter(|&idx| idx <= self.text.len());

        match cursor {
            Some(cursor) => {
                let (head, tail) = self.text.split_at(cursor);
                let head: String = head.iter().collect();
                let tail: String = tail.iter().collect();
                write!(f, "Reader({head:?}|{tail:?})")
            }
            None => {
                let text: String = self.text.iter().collect();
                write!(f, "Reader({text:?} @ {idx})", idx = self.idx)
            }
        }
    }
}
