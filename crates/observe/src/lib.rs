//! Ripple Observe - Observable state containers with change notification.
//!
//! This crate implements the observation core of ripple:
//!
//! - `ObservableObject`: a property bag whose adds, changes and removals
//!   notify registered observers synchronously
//! - `ObservableList`: an ordered collection that auto-subscribes contained
//!   observable objects and forwards their property changes to its own
//!   observers, stamped with the item's current index
//! - `ObserverRegistry`: ordered observer registration with opaque handles
//! - `ChangeEvent`: the notification payload, carrying a provenance chain
//!   of every relaying layer
//! - Descriptor serialization: snapshot an object's properties into an
//!   ordered record list and reconstruct them through a `FactoryRegistry`
//!
//! All dispatch is synchronous and in-line on the caller's thread. Mutating
//! an observable releases its internal borrows before notifying, so
//! observers may re-read or re-mutate the container reentrantly.
//!
//! # Example
//!
//! ```ignore
//! use ripple_observe::{ObservableObject, Value};
//!
//! let object = ObservableObject::new();
//! object.add_property("width", Value::Int(640));
//!
//! let handle = object.add_change_observer(|event| {
//!     // event.name == "width", event.old_value == previous value
//! });
//!
//! object.set("width", Value::Int(800));
//! object.remove_change_observer(handle);
//! ```

#![no_std]

extern crate alloc;

pub mod event;
pub mod list;
pub mod object;
pub mod registry;
pub mod serial;

pub use event::{ChangeEvent, ListChange, Subject};
pub use list::{Item, ObservableList};
pub use object::{ObservableObject, PrivateSetter, PropertyOptions, SetFilter};
pub use registry::{ObserverCallback, ObserverHandle, ObserverRegistry};
pub use serial::{PropertyRecord, SerializedObject, SERIALIZED_DATA_KEY};

// Re-export commonly used types from dependencies
pub use ripple_core::{CustomValue, Error, FactoryRegistry, ObservableId, Result, Value};
