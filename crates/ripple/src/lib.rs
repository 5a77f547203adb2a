//! Ripple - Reactive observable state containers for data-bound
//! applications.
//!
//! This crate re-exports the full public surface of the ripple workspace:
//!
//! - `ripple-core`: runtime values, custom-value extension, identity,
//!   errors
//! - `ripple-observe`: observable objects and lists with synchronous
//!   change notification and descriptor serialization
//! - `ripple-undo`: invertible commands and the observable undo/redo stack
//! - `ripple-geom`: collaborator value types (`Vec2`, `TextSelection`)
//!
//! # Example
//!
//! ```rust
//! use ripple::{Item, ObservableList, ObservableObject, Value};
//!
//! let shape = ObservableObject::new();
//! shape.add_property("width", Value::Int(640));
//!
//! let shapes = ObservableList::new();
//! shapes.add(Item::Object(shape.clone()));
//!
//! // Item-level changes forward through the list, stamped with the
//! // item's current index.
//! shapes.add_change_observer(
//!     |event| assert_eq!(event.index, Some(0)),
//!     true,
//! );
//! shape.set("width", Value::Int(800));
//! ```

pub use ripple_core::{
    next_observable_id, CustomValue, Error, Factory, FactoryRegistry, ObservableId, Result, Value,
};
pub use ripple_geom::{register_factories, TextSelection, Vec2};
pub use ripple_observe::{
    ChangeEvent, Item, ListChange, ObservableList, ObservableObject, ObserverHandle,
    ObserverRegistry, PrivateSetter, PropertyOptions, PropertyRecord, SerializedObject, SetFilter,
    Subject, SERIALIZED_DATA_KEY,
};
pub use ripple_undo::{
    Command, CompositeCommand, FnCommand, ListInsertCommand, ListRemoveCommand,
    SetPropertyCommand, UndoStack, REDO_COUNT_PROPERTY, REDO_TEXT_PROPERTY, UNDO_COUNT_PROPERTY,
    UNDO_TEXT_PROPERTY,
};
