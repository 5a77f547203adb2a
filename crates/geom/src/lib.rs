//! Ripple Geom - Collaborator value types for ripple.
//!
//! Immutable value helpers consumed by observable state: a 2-D vector and
//! a text-selection triple. Both implement `CustomValue` so they can live
//! inside observable properties and round-trip through descriptor
//! serialization once their factories are registered.
//!
//! # Example
//!
//! ```rust
//! use ripple_core::FactoryRegistry;
//! use ripple_geom::{register_factories, Vec2};
//!
//! let mut registry = FactoryRegistry::new();
//! register_factories(&mut registry);
//!
//! let v = Vec2::new(3.0, 4.0);
//! assert_eq!(v.length(), 5.0);
//! ```

mod selection;
mod vec2;

pub use selection::TextSelection;
pub use vec2::Vec2;

use ripple_core::{FactoryRegistry, Value};

/// Registers the deserialization factories for the geom value types.
///
/// Returns false if any tag was already taken (first registration wins).
pub fn register_factories(registry: &mut FactoryRegistry) -> bool {
    let vec2 = registry.register("Vec2", |payload| {
        serde_json::from_value::<Vec2>(payload.clone())
            .ok()
            .map(Value::custom)
    });
    let selection = registry.register("TextSelection", |payload| {
        serde_json::from_value::<TextSelection>(payload.clone())
            .ok()
            .map(Value::custom)
    });
    vec2 && selection
}
