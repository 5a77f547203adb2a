//! Descriptor serialization for observable objects.
//!
//! An object snapshots into an ordered list of property records wrapped
//! under the reserved `ObservableSerializedData` key. Primitive values
//! round-trip exactly; non-primitive values carry their custom type tag
//! and reconstruct through a `FactoryRegistry`. A record whose tag cannot
//! be resolved is dropped silently rather than failing the whole
//! reconstruction.
//!
//! Objects configured for simple serialization skip the wrapper and
//! serialize as a plain keyed structure of their enumerable properties.

use crate::list::{Item, ObservableList};
use crate::object::{ObservableObject, PropertyOptions};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ripple_core::{FactoryRegistry, Result, Value};
use serde::{Deserialize, Serialize};

/// Reserved wrapper key; also the one property name no object may use.
pub const SERIALIZED_DATA_KEY: &str = "ObservableSerializedData";

/// One serialized property descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Property name.
    pub name: String,
    /// JSON form of the value.
    pub value: serde_json::Value,
    /// Whether the property is enumerable.
    pub enumerable: bool,
    /// Whether ordinary assignment is allowed.
    pub writable: bool,
    /// Whether the property is removable.
    pub configurable: bool,
    /// Primitive tag or custom type tag.
    #[serde(rename = "varType")]
    pub var_type: String,
}

/// The serialized form of an observable object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SerializedObject {
    /// Ordered property descriptors.
    #[serde(rename = "ObservableSerializedData")]
    pub properties: Vec<PropertyRecord>,
}

impl ObservableObject {
    /// Snapshots every property into an ordered record list.
    ///
    /// Privately-settable properties record `writable: false` (their
    /// external contract); set-filters have no serialized form.
    pub fn to_records(&self) -> Vec<PropertyRecord> {
        self.core
            .props
            .borrow()
            .iter()
            .map(|p| PropertyRecord {
                name: p.name.clone(),
                value: p.value.to_json(),
                enumerable: p.enumerable,
                writable: p.writable,
                configurable: p.removable,
                var_type: p.value.type_tag().to_string(),
            })
            .collect()
    }

    /// Snapshots this object into its serialized wrapper form.
    pub fn to_serialized(&self) -> SerializedObject {
        SerializedObject {
            properties: self.to_records(),
        }
    }

    /// Converts this object to JSON.
    ///
    /// Simple serialization yields a plain keyed structure of the
    /// enumerable properties; otherwise the descriptor wrapper is
    /// produced.
    pub fn to_json(&self) -> serde_json::Value {
        if self.is_simple_serialization() {
            let mut map = serde_json::Map::new();
            for p in self.core.props.borrow().iter().filter(|p| p.enumerable) {
                map.insert(p.name.clone(), p.value.to_json());
            }
            serde_json::Value::Object(map)
        } else {
            serde_json::to_value(self.to_serialized()).unwrap_or(serde_json::Value::Null)
        }
    }

    /// Renders this object's JSON form as text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Reconstructs an object from serialized records.
    ///
    /// Primitive records reconstruct inline; other tags resolve through
    /// the registry. Records whose tag is unregistered, whose factory
    /// declines, or whose name is invalid are silently dropped. Flags are
    /// restored: a non-writable record yields a read-only property.
    pub fn from_serialized(data: &SerializedObject, registry: &FactoryRegistry) -> Self {
        let object = ObservableObject::new();
        for record in &data.properties {
            let value = Value::from_tagged_json(&record.var_type, &record.value)
                .or_else(|| registry.resolve(&record.var_type, &record.value));
            let value = match value {
                Some(v) => v,
                None => continue,
            };
            let _ = object.add_property_with(
                &record.name,
                value,
                PropertyOptions {
                    removable: record.configurable,
                    writable: record.writable,
                    enumerable: record.enumerable,
                },
            );
        }
        object
    }

    /// Parses serialized JSON text and reconstructs the object.
    ///
    /// This is the only fallible entry point: malformed text or a missing
    /// wrapper key is an error, while individually unresolvable records
    /// still degrade to silent drops.
    pub fn from_json_str(text: &str, registry: &FactoryRegistry) -> Result<Self> {
        let data: SerializedObject = serde_json::from_str(text)?;
        Ok(Self::from_serialized(&data, registry))
    }
}

impl Item {
    /// Converts this item to JSON, recursing into contained objects.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Item::Value(v) => v.to_json(),
            Item::Object(o) => o.to_json(),
        }
    }
}

impl ObservableList {
    /// Serializes the list as an ordered array of its items' own forms.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.to_array().iter().map(|item| item.to_json()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::Any;
    use core::fmt;
    use ripple_core::CustomValue;

    /// Minimal custom value participating in serialization.
    #[derive(Clone, Debug, PartialEq)]
    struct Token(i64);

    impl fmt::Display for Token {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "token:{}", self.0)
        }
    }

    impl CustomValue for Token {
        fn type_tag(&self) -> &'static str {
            "Token"
        }

        fn to_json(&self) -> serde_json::Value {
            serde_json::Value::Number(self.0.into())
        }

        fn dyn_eq(&self, other: &dyn CustomValue) -> bool {
            other.as_any().downcast_ref::<Token>() == Some(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn token_registry() -> FactoryRegistry {
        let mut registry = FactoryRegistry::new();
        registry.register("Token", |json| {
            json.as_i64().map(|v| Value::custom(Token(v)))
        });
        registry
    }

    #[test]
    fn test_primitive_roundtrip_preserves_values_and_flags() {
        let object = ObservableObject::new();
        object.add_property("name", Value::String("rect".into()));
        object.add_ro_property("kind", Value::String("shape".into()));
        object.add_property("width", Value::Int(640));
        object.add_property("opacity", Value::Number(0.5));
        object.add_property("visible", Value::Bool(true));
        object.add_property("tag", Value::Null);

        let serialized = object.to_serialized();
        let registry = FactoryRegistry::new();
        let rebuilt = ObservableObject::from_serialized(&serialized, &registry);

        assert_eq!(rebuilt.property_names(), object.property_names());
        for name in ["name", "kind", "width", "opacity", "visible", "tag"] {
            assert_eq!(rebuilt.get(name), object.get(name), "property {}", name);
            assert_eq!(rebuilt.is_writable(name), object.is_writable(name));
            assert_eq!(rebuilt.is_removable(name), object.is_removable(name));
        }
    }

    #[test]
    fn test_json_text_roundtrip() {
        let object = ObservableObject::new();
        object.add_property("x", Value::Int(3));
        object.add_property("label", Value::String("axis".into()));

        let text = object.to_json_string().unwrap();
        let registry = FactoryRegistry::new();
        let rebuilt = ObservableObject::from_json_str(&text, &registry).unwrap();

        assert_eq!(rebuilt.get("x"), Some(Value::Int(3)));
        assert_eq!(rebuilt.get("label"), Some(Value::String("axis".into())));
    }

    #[test]
    fn test_custom_value_roundtrip_through_registry() {
        let object = ObservableObject::new();
        object.add_property("token", Value::custom(Token(42)));

        let serialized = object.to_serialized();
        assert_eq!(serialized.properties[0].var_type, "Token");

        let rebuilt = ObservableObject::from_serialized(&serialized, &token_registry());
        assert_eq!(rebuilt.get("token"), Some(Value::custom(Token(42))));
    }

    #[test]
    fn test_unresolvable_record_is_dropped() {
        let object = ObservableObject::new();
        object.add_property("token", Value::custom(Token(42)));
        object.add_property("kept", Value::Int(1));

        let serialized = object.to_serialized();
        let registry = FactoryRegistry::new(); // no Token factory
        let rebuilt = ObservableObject::from_serialized(&serialized, &registry);

        assert!(!rebuilt.has_property("token"));
        assert_eq!(rebuilt.get("kept"), Some(Value::Int(1)));
    }

    #[test]
    fn test_simple_serialization_form() {
        let object = ObservableObject::new();
        object.add_property("a", Value::Int(1));
        object.add_property("b", Value::Bool(false));
        object.set_simple_serialization(true);

        let json = object.to_json();
        assert_eq!(json["a"], serde_json::Value::Number(1.into()));
        assert_eq!(json["b"], serde_json::Value::Bool(false));
        assert!(json.get(SERIALIZED_DATA_KEY).is_none());
    }

    #[test]
    fn test_wrapper_form_uses_reserved_key() {
        let object = ObservableObject::new();
        object.add_property("a", Value::Int(1));

        let json = object.to_json();
        let records = json.get(SERIALIZED_DATA_KEY).and_then(|v| v.as_array());
        assert_eq!(records.map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_from_json_str_malformed_is_error() {
        let registry = FactoryRegistry::new();
        assert!(ObservableObject::from_json_str("not json", &registry).is_err());
        assert!(ObservableObject::from_json_str("{\"wrong\": []}", &registry).is_err());
    }

    #[test]
    fn test_private_set_serializes_as_read_only() {
        let object = ObservableObject::new();
        let _setter = object
            .add_property_with_private_set("count", Value::Int(3))
            .unwrap();

        let serialized = object.to_serialized();
        assert!(!serialized.properties[0].writable);

        let registry = FactoryRegistry::new();
        let rebuilt = ObservableObject::from_serialized(&serialized, &registry);
        assert_eq!(rebuilt.get("count"), Some(Value::Int(3)));
        assert!(!rebuilt.set("count", Value::Int(4)));
    }

    #[test]
    fn test_list_serializes_as_array() {
        let list = ObservableList::new();
        list.add(Item::from(1));
        let nested = ObservableObject::new();
        nested.add_property("x", Value::Int(2));
        nested.set_simple_serialization(true);
        list.add(Item::Object(nested));

        let json = list.to_json();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], serde_json::Value::Number(1.into()));
        assert_eq!(entries[1]["x"], serde_json::Value::Number(2.into()));
    }

    #[test]
    fn test_record_order_matches_insertion_order() {
        let object = ObservableObject::new();
        for i in 0..5 {
            object.add_property(&format!("p{}", i), Value::Int(i));
        }
        let names: Vec<_> = object
            .to_records()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_custom_equality_by_value() {
        let a = Value::custom(Token(1));
        let b = Value::custom(Token(1));
        let c = Value::custom(Token(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
