//! Immutable text selection.

use core::any::Any;
use core::fmt;
use ripple_core::CustomValue;
use serde::{Deserialize, Serialize};

/// A selection over a text: the text itself plus a clamped start/length
/// pair in characters.
///
/// Values are immutable; every operation returns a new selection. The
/// constructor clamps `start` into the text and `length` to the remainder,
/// so a selection can never address characters outside its text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    text: String,
    start: usize,
    length: usize,
}

impl TextSelection {
    /// Creates a selection over `text`, clamping `start` and `length`.
    pub fn new(text: impl Into<String>, start: usize, length: usize) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        let start = start.min(chars);
        let length = length.min(chars - start);
        Self { text, start, length }
    }

    /// Creates a caret (empty selection) at `position`.
    pub fn caret(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, position, 0)
    }

    /// The full text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selection start, in characters.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Selection length, in characters.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Selection end (exclusive), in characters.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Returns true if the selection is an empty caret.
    #[inline]
    pub fn is_caret(&self) -> bool {
        self.length == 0
    }

    fn char_range(&self, start: usize, len: usize) -> String {
        self.text.chars().skip(start).take(len).collect()
    }

    /// The text before the selection.
    pub fn before(&self) -> String {
        self.char_range(0, self.start)
    }

    /// The selected text.
    pub fn selected(&self) -> String {
        self.char_range(self.start, self.length)
    }

    /// The text after the selection.
    pub fn after(&self) -> String {
        let end = self.end();
        self.char_range(end, self.text.chars().count() - end)
    }

    /// A caret at the selection start over the same text.
    pub fn collapsed(&self) -> TextSelection {
        TextSelection {
            text: self.text.clone(),
            start: self.start,
            length: 0,
        }
    }

    /// Replaces the selected range with `replacement`.
    ///
    /// Returns the selection over the new text, collapsed to a caret
    /// right after the inserted text.
    pub fn replaced_with(&self, replacement: &str) -> TextSelection {
        let mut text = self.before();
        text.push_str(replacement);
        text.push_str(&self.after());
        TextSelection {
            text,
            start: self.start + replacement.chars().count(),
            length: 0,
        }
    }

    /// The same text with a different (re-clamped) selected range.
    pub fn with_selection(&self, start: usize, length: usize) -> TextSelection {
        TextSelection::new(self.text.clone(), start, length)
    }
}

impl fmt::Display for TextSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}..{}]", self.text, self.start, self.end())
    }
}

impl CustomValue for TextSelection {
    fn type_tag(&self) -> &'static str {
        "TextSelection"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn dyn_eq(&self, other: &dyn CustomValue) -> bool {
        other.as_any().downcast_ref::<TextSelection>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
