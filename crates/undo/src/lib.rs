//! Ripple Undo - Invertible commands and an observable undo/redo stack.
//!
//! A `Command` runs its forward action once and yields the command that
//! undoes it. `CompositeCommand` sequences commands and inverts them in
//! reverse order. `UndoStack` layers two labeled stacks of commands on top
//! of an `ObservableObject`, exposing stack depths and pending action
//! labels as observable derived properties.
//!
//! # Example
//!
//! ```ignore
//! use ripple_observe::{ObservableObject, Value};
//! use ripple_undo::{SetPropertyCommand, UndoStack};
//!
//! let object = ObservableObject::new();
//! object.add_property("x", Value::Int(1));
//!
//! let stack = UndoStack::new();
//! let set = Box::new(SetPropertyCommand::new(object.clone(), "x", Value::Int(2)));
//! stack.exec_with_undo("Undo: set x", set);
//!
//! stack.exec_undo();   // x back to 1, redo available
//! stack.exec_redo();   // x forward to 2 again
//! ```

#![no_std]

extern crate alloc;

pub mod command;
pub mod stack;

pub use command::{
    Command, CompositeCommand, FnCommand, ListInsertCommand, ListRemoveCommand,
    SetPropertyCommand,
};
pub use stack::{
    UndoStack, REDO_COUNT_PROPERTY, REDO_TEXT_PROPERTY, UNDO_COUNT_PROPERTY, UNDO_TEXT_PROPERTY,
};

// Re-export commonly used types from dependencies
pub use ripple_observe::{Item, ObservableList, ObservableObject, Value};
