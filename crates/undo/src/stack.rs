//! Observable undo/redo stack.
//!
//! Two ordered stacks of (label, command) pairs built on the
//! `ObservableObject` base. Stack depths and the labels of the pending
//! undo/redo actions are privately-settable derived properties, so
//! consumers observe the stack like any other observable object and only
//! properties whose values actually change notify.
//!
//! Labels follow the "Undo ..."/"Redo ..." convention: moving an entry to
//! the opposite stack rewrites the first occurrence of the substring, and
//! labels without it pass through unchanged.

use crate::command::{Command, CompositeCommand};
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use ripple_observe::{ObservableObject, PrivateSetter, Value};

/// Property holding the pending undo action's label.
pub const UNDO_TEXT_PROPERTY: &str = "undoText";
/// Property holding the pending redo action's label.
pub const REDO_TEXT_PROPERTY: &str = "redoText";
/// Property holding the undo stack depth.
pub const UNDO_COUNT_PROPERTY: &str = "undoCount";
/// Property holding the redo stack depth.
pub const REDO_COUNT_PROPERTY: &str = "redoCount";

const DEFAULT_UNDO_TEXT: &str = "Undo";
const DEFAULT_REDO_TEXT: &str = "Redo";

type Entry = (String, Box<dyn Command>);

/// An undo/redo stack with observable derived properties.
pub struct UndoStack {
    state: ObservableObject,
    undo_text: PrivateSetter,
    redo_text: PrivateSetter,
    undo_count: PrivateSetter,
    redo_count: PrivateSetter,
    undo: RefCell<Vec<Entry>>,
    redo: RefCell<Vec<Entry>>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        let state = ObservableObject::new();
        // Fresh object, distinct names: installation cannot fail.
        let undo_text = state
            .add_property_with_private_set(UNDO_TEXT_PROPERTY, DEFAULT_UNDO_TEXT.into())
            .unwrap();
        let redo_text = state
            .add_property_with_private_set(REDO_TEXT_PROPERTY, DEFAULT_REDO_TEXT.into())
            .unwrap();
        let undo_count = state
            .add_property_with_private_set(UNDO_COUNT_PROPERTY, Value::Int(0))
            .unwrap();
        let redo_count = state
            .add_property_with_private_set(REDO_COUNT_PROPERTY, Value::Int(0))
            .unwrap();

        Self {
            state,
            undo_text,
            redo_text,
            undo_count,
            redo_count,
            undo: RefCell::new(Vec::new()),
            redo: RefCell::new(Vec::new()),
        }
    }

    /// The observable carrying the derived properties; attach change
    /// observers here.
    pub fn observable(&self) -> &ObservableObject {
        &self.state
    }

    /// Returns the undo stack depth.
    pub fn undo_count(&self) -> usize {
        self.undo.borrow().len()
    }

    /// Returns the redo stack depth.
    pub fn redo_count(&self) -> usize {
        self.redo.borrow().len()
    }

    /// Returns the pending undo action's label.
    pub fn undo_text(&self) -> String {
        self.text(UNDO_TEXT_PROPERTY, DEFAULT_UNDO_TEXT)
    }

    /// Returns the pending redo action's label.
    pub fn redo_text(&self) -> String {
        self.text(REDO_TEXT_PROPERTY, DEFAULT_REDO_TEXT)
    }

    fn text(&self, property: &str, default: &str) -> String {
        self.state
            .get(property)
            .and_then(|v| v.as_str().map(ToString::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    /// Pushes an undo entry; always clears the redo stack.
    pub fn add_undo(&self, label: &str, command: Box<dyn Command>) {
        self.undo.borrow_mut().push((label.to_string(), command));
        self.redo.borrow_mut().clear();
        self.refresh();
    }

    /// Pushes the given commands as one undo entry, wrapped in a
    /// composite; always clears the redo stack.
    pub fn add_undo_all(&self, label: &str, commands: Vec<Box<dyn Command>>) {
        self.add_undo(label, Box::new(CompositeCommand::new(commands)));
    }

    /// Pops and executes the pending undo action.
    ///
    /// The yielded inverse moves to the redo stack under the label with
    /// "Undo" rewritten to "Redo". Returns false when the stack is empty.
    pub fn exec_undo(&self) -> bool {
        let entry = self.undo.borrow_mut().pop();
        let (label, command) = match entry {
            Some(e) => e,
            None => return false,
        };
        if let Some(inverse) = command.exec() {
            let swapped = label.replacen(DEFAULT_UNDO_TEXT, DEFAULT_REDO_TEXT, 1);
            self.redo.borrow_mut().push((swapped, inverse));
        }
        self.refresh();
        true
    }

    /// Pops and executes the pending redo action; symmetric to
    /// `exec_undo` with "Redo" rewritten to "Undo".
    pub fn exec_redo(&self) -> bool {
        let entry = self.redo.borrow_mut().pop();
        let (label, command) = match entry {
            Some(e) => e,
            None => return false,
        };
        if let Some(inverse) = command.exec() {
            let swapped = label.replacen(DEFAULT_REDO_TEXT, DEFAULT_UNDO_TEXT, 1);
            self.undo.borrow_mut().push((swapped, inverse));
        }
        self.refresh();
        true
    }

    /// Executes a command immediately, recording its inverse for undo.
    ///
    /// Returns true when the command yielded an inverse and it was pushed
    /// under `label`; false means nothing was recorded.
    pub fn exec_with_undo(&self, label: &str, command: Box<dyn Command>) -> bool {
        match command.exec() {
            Some(inverse) => {
                self.add_undo(label, inverse);
                true
            }
            None => false,
        }
    }

    /// Empties both stacks and resets the derived properties to their
    /// defaults; only properties whose values change notify.
    pub fn clear(&self) {
        self.undo.borrow_mut().clear();
        self.redo.borrow_mut().clear();
        self.refresh();
    }

    /// Re-derives the four observable properties from the stacks. The
    /// private setters skip notification for unchanged values.
    fn refresh(&self) {
        let undo_label = self
            .undo
            .borrow()
            .last()
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| DEFAULT_UNDO_TEXT.to_string());
        let redo_label = self
            .redo
            .borrow()
            .last()
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| DEFAULT_REDO_TEXT.to_string());
        let undo_len = self.undo.borrow().len() as i64;
        let redo_len = self.redo.borrow().len() as i64;

        self.undo_text.set(Value::String(undo_label));
        self.undo_count.set(Value::Int(undo_len));
        self.redo_text.set(Value::String(redo_label));
        self.redo_count.set(Value::Int(redo_len));
    }
}
