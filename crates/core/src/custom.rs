//! Extension point for library-external value types.
//!
//! This module defines `CustomValue`, the trait a collaborator type
//! implements to be stored in observable properties, and `FactoryRegistry`,
//! the explicit tag-to-factory mapping used to reconstruct such values
//! from serialized data. A value whose tag has no registered factory is
//! silently dropped during reconstruction.

use crate::value::Value;
use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;
use hashbrown::HashMap;

/// A library-external value that can live inside a `Value`.
///
/// Implementors provide a stable type tag, a JSON form for serialization,
/// and value equality so that rewriting an equal custom value stays a
/// silent no-op.
pub trait CustomValue: fmt::Debug + fmt::Display + 'static {
    /// Stable tag identifying this type in serialized data.
    fn type_tag(&self) -> &'static str;

    /// JSON form of this value, consumed by the matching factory.
    fn to_json(&self) -> serde_json::Value;

    /// Value equality against another custom value.
    fn dyn_eq(&self, other: &dyn CustomValue) -> bool;

    /// Upcast for downcasting by consumers.
    fn as_any(&self) -> &dyn Any;
}

/// Factory reconstructing a `Value` from a JSON payload.
pub type Factory = Box<dyn Fn(&serde_json::Value) -> Option<Value>>;

/// Maps serialization type tags to reconstruction factories.
///
/// Collaborator crates populate the registry with the tags they own;
/// deserialization resolves non-primitive records through it.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Factory>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory for a type tag.
    ///
    /// Returns false if the tag is already registered; the first
    /// registration wins.
    pub fn register<F>(&mut self, tag: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&serde_json::Value) -> Option<Value> + 'static,
    {
        let tag = tag.into();
        if self.factories.contains_key(&tag) {
            return false;
        }
        self.factories.insert(tag, Box::new(factory));
        true
    }

    /// Reconstructs a value through the factory registered for `tag`.
    ///
    /// Returns None when the tag is unregistered or the factory declines
    /// the payload; callers drop the property in that case.
    pub fn resolve(&self, tag: &str, payload: &serde_json::Value) -> Option<Value> {
        self.factories.get(tag).and_then(|f| f(payload))
    }

    /// Returns true if a factory is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Returns the number of registered factories.
    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no factories are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = FactoryRegistry::new();
        assert!(registry.register("Answer", |json| json.as_i64().map(Value::Int)));
        assert!(registry.contains("Answer"));

        let payload = serde_json::Value::Number(42.into());
        assert_eq!(registry.resolve("Answer", &payload), Some(Value::Int(42)));
    }

    #[test]
    fn test_register_duplicate_keeps_first() {
        let mut registry = FactoryRegistry::new();
        assert!(registry.register("T", |_| Some(Value::Int(1))));
        assert!(!registry.register("T", |_| Some(Value::Int(2))));

        assert_eq!(registry.resolve("T", &serde_json::Value::Null), Some(Value::Int(1)));
    }

    #[test]
    fn test_resolve_unknown_tag() {
        let registry = FactoryRegistry::new();
        assert_eq!(registry.resolve("Missing", &serde_json::Value::Null), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_factory_may_decline() {
        let mut registry = FactoryRegistry::new();
        registry.register("Strict", |json| json.as_bool().map(Value::Bool));

        // Wrong payload shape: the factory declines, the caller drops.
        assert_eq!(registry.resolve("Strict", &serde_json::Value::Null), None);
    }
}
