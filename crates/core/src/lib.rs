//! Ripple Core - Core value and identity types for ripple observables.
//!
//! This crate provides the foundational types shared by the observable
//! state containers:
//!
//! - `Value`: Runtime values stored in observable properties
//! - `CustomValue`: Extension trait for library-external value types
//! - `FactoryRegistry`: Type-tag to factory mapping for deserialization
//! - `ObservableId`: Unique identity for every observable instance
//! - `Error`: Error types for the fallible serialization surface
//!
//! # Example
//!
//! ```rust
//! use ripple_core::Value;
//!
//! let v: Value = 42i64.into();
//! assert_eq!(v.as_i64(), Some(42));
//! assert_eq!(v.type_tag(), "number");
//!
//! // Equal values compare by content, not identity.
//! assert_eq!(v, Value::Int(42));
//! ```

#![no_std]

extern crate alloc;

mod custom;
mod error;
mod ident;
mod value;

pub use custom::{CustomValue, Factory, FactoryRegistry};
pub use error::{Error, Result};
pub use ident::{next_observable_id, ObservableId};
pub use value::Value;
