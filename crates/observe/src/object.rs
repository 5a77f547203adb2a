//! Observable property bag.
//!
//! `ObservableObject` maps unique property names to descriptors holding the
//! value and its flags. Adding, changing or removing any property triggers
//! exactly one notification pass over the registered observers. All reads
//! and writes go through a uniform accessor path that checks the flags and
//! runs the optional set-filter, so the descriptor table itself carries the
//! property semantics.
//!
//! Handles are cheap clones of the same underlying object; equality is
//! handle identity. Internal borrows are released before observers run, so
//! a callback may read or mutate the object it is observing.

use crate::event::{ChangeEvent, Subject};
use crate::list::Item;
use crate::registry::{ObserverHandle, ObserverRegistry};
use crate::serial::SERIALIZED_DATA_KEY;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use ripple_core::{next_observable_id, ObservableId, Value};

/// Set-filter: maps (proposed value, current value) to the accepted value.
pub type SetFilter = Rc<dyn Fn(&Value, &Value) -> Value>;

/// Flags controlling a property added with `add_property_with`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyOptions {
    /// The property may be removed again.
    pub removable: bool,
    /// Ordinary assignment through `set` is allowed.
    pub writable: bool,
    /// The property shows up in `property_names` and simple serialization.
    pub enumerable: bool,
}

impl Default for PropertyOptions {
    fn default() -> Self {
        Self {
            removable: true,
            writable: true,
            enumerable: true,
        }
    }
}

pub(crate) struct PropertyDescriptor {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) removable: bool,
    pub(crate) writable: bool,
    pub(crate) enumerable: bool,
    pub(crate) filter: Option<SetFilter>,
    pub(crate) private_set: bool,
}

pub(crate) struct ObjectCore {
    pub(crate) id: ObservableId,
    pub(crate) props: RefCell<Vec<PropertyDescriptor>>,
    pub(crate) observers: ObserverRegistry,
    pub(crate) simple_serial: Cell<bool>,
}

/// An observable property bag.
#[derive(Clone)]
pub struct ObservableObject {
    pub(crate) core: Rc<ObjectCore>,
}

impl Default for ObservableObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservableObject {
    /// Creates an empty observable object.
    pub fn new() -> Self {
        Self {
            core: Rc::new(ObjectCore {
                id: next_observable_id(),
                props: RefCell::new(Vec::new()),
                observers: ObserverRegistry::new(),
                simple_serial: Cell::new(false),
            }),
        }
    }

    /// Creates an object from a plain keyed structure.
    ///
    /// Each pair is installed as a fresh plain property; invalid names are
    /// skipped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let object = Self::new();
        for (name, value) in pairs {
            let _ = object.add_property(&name, value);
        }
        object
    }

    /// Returns the identity of this object.
    #[inline]
    pub fn id(&self) -> ObservableId {
        self.core.id
    }

    fn valid_name(name: &str) -> bool {
        !name.is_empty() && name != SERIALIZED_DATA_KEY
    }

    fn add_internal(
        &self,
        name: &str,
        value: Value,
        opts: PropertyOptions,
        filter: Option<SetFilter>,
        private_set: bool,
    ) -> bool {
        if !Self::valid_name(name) {
            return false;
        }
        {
            let mut props = self.core.props.borrow_mut();
            if props.iter().any(|p| p.name == name) {
                return false;
            }
            props.push(PropertyDescriptor {
                name: name.into(),
                value,
                removable: opts.removable,
                writable: opts.writable,
                enumerable: opts.enumerable,
                filter,
                private_set,
            });
        }
        self.notify(name, None);
        true
    }

    /// Adds a plain property (removable, writable, enumerable).
    ///
    /// Fails if the name is empty, reserved, or already present. A
    /// successful add notifies observers with no prior value.
    pub fn add_property(&self, name: &str, value: Value) -> bool {
        self.add_property_with(name, value, PropertyOptions::default())
    }

    /// Adds a property with explicit flags.
    pub fn add_property_with(&self, name: &str, value: Value, opts: PropertyOptions) -> bool {
        self.add_internal(name, value, opts, None, false)
    }

    /// Adds a non-removable, non-writable property.
    pub fn add_ro_property(&self, name: &str, value: Value) -> bool {
        self.add_internal(
            name,
            value,
            PropertyOptions {
                removable: false,
                writable: false,
                enumerable: true,
            },
            None,
            false,
        )
    }

    /// Adds a writable property whose assignments pass through `filter`.
    ///
    /// Every `set` maps (proposed, current) through the filter; the result
    /// becomes the candidate value, and observers are notified only when
    /// the candidate differs from the current value.
    pub fn add_property_with_set_filter<F>(&self, name: &str, value: Value, filter: F) -> bool
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        self.add_internal(
            name,
            value,
            PropertyOptions::default(),
            Some(Rc::new(filter)),
            false,
        )
    }

    /// Adds a read-accessible property writable only through the returned
    /// private setter.
    ///
    /// Ordinary assignment through `set` is rejected. Returns None if the
    /// property could not be installed.
    pub fn add_property_with_private_set(&self, name: &str, value: Value) -> Option<PrivateSetter> {
        let installed = self.add_internal(
            name,
            value,
            PropertyOptions {
                removable: false,
                writable: false,
                enumerable: true,
            },
            None,
            true,
        );
        if installed {
            Some(PrivateSetter {
                target: Rc::downgrade(&self.core),
                name: name.into(),
            })
        } else {
            None
        }
    }

    /// Assigns a new value to a property.
    ///
    /// Returns false for absent, read-only, or privately-settable
    /// properties. Assigning a value equal to the current one is a silent
    /// no-op; otherwise observers are notified with the prior value.
    pub fn set(&self, name: &str, value: Value) -> bool {
        self.store(name, value, false)
    }

    fn store(&self, name: &str, value: Value, via_private: bool) -> bool {
        let old = {
            let mut props = self.core.props.borrow_mut();
            let desc = match props.iter_mut().find(|p| p.name == name) {
                Some(d) => d,
                None => return false,
            };
            if via_private {
                if !desc.private_set {
                    return false;
                }
            } else if !desc.writable || desc.private_set {
                return false;
            }
            let candidate = match (&desc.filter, via_private) {
                (Some(filter), false) => filter(&value, &desc.value),
                _ => value,
            };
            if candidate == desc.value {
                return true;
            }
            core::mem::replace(&mut desc.value, candidate)
        };
        self.notify(name, Some(Item::Value(old)));
        true
    }

    /// Reads a property value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.core
            .props
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.clone())
    }

    /// Returns true if a property with this name exists.
    pub fn has_property(&self, name: &str) -> bool {
        self.core.props.borrow().iter().any(|p| p.name == name)
    }

    /// Returns the enumerable property names in insertion order.
    pub fn property_names(&self) -> Vec<String> {
        self.core
            .props
            .borrow()
            .iter()
            .filter(|p| p.enumerable)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Returns the total number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.props.borrow().len()
    }

    /// Returns true if the object has no properties.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.props.borrow().is_empty()
    }

    fn flag(&self, name: &str, select: impl Fn(&PropertyDescriptor) -> bool) -> Option<bool> {
        self.core
            .props
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .map(|p| select(p))
    }

    /// Returns whether a property is removable, if it exists.
    pub fn is_removable(&self, name: &str) -> Option<bool> {
        self.flag(name, |p| p.removable)
    }

    /// Returns whether a property accepts ordinary assignment, if it exists.
    pub fn is_writable(&self, name: &str) -> Option<bool> {
        self.flag(name, |p| p.writable && !p.private_set)
    }

    /// Returns whether a property is enumerable, if it exists.
    pub fn is_enumerable(&self, name: &str) -> Option<bool> {
        self.flag(name, |p| p.enumerable)
    }

    /// Removes a property.
    ///
    /// Fails if the property is absent or not removable; otherwise deletes
    /// it and notifies observers with the removed value as the prior value.
    pub fn remove_property(&self, name: &str) -> bool {
        let old = {
            let mut props = self.core.props.borrow_mut();
            let pos = match props.iter().position(|p| p.name == name) {
                Some(p) => p,
                None => return false,
            };
            if !props[pos].removable {
                return false;
            }
            props.remove(pos).value
        };
        self.notify(name, Some(Item::Value(old)));
        true
    }

    /// Registers a change observer; the returned handle removes it again.
    pub fn add_change_observer<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.core.observers.add(Rc::new(callback), None, true)
    }

    /// Registers a change observer with a user context that is delivered
    /// back inside every event.
    pub fn add_change_observer_with_context<F>(&self, callback: F, context: Value) -> ObserverHandle
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.core.observers.add(Rc::new(callback), Some(context), true)
    }

    /// Removes an observer by handle; returns whether a match was found.
    pub fn remove_change_observer(&self, handle: ObserverHandle) -> bool {
        self.core.observers.remove(handle)
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.core.observers.len()
    }

    /// Dispatches a change on `name` to all observers, stamping this
    /// object as the subject and immediate sender.
    pub(crate) fn notify(&self, name: &str, old_value: Option<Item>) {
        let subject = Subject::Object(self.clone());
        let event = ChangeEvent::property(self, name, old_value);
        self.core.observers.notify(&event, &subject, false);
    }

    /// Selects the plain keyed serialization form instead of the
    /// descriptor wrapper.
    pub fn set_simple_serialization(&self, simple: bool) {
        self.core.simple_serial.set(simple);
    }

    /// Returns whether simple serialization is selected.
    pub fn is_simple_serialization(&self) -> bool {
        self.core.simple_serial.get()
    }
}

impl PartialEq for ObservableObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for ObservableObject {}

impl fmt::Debug for ObservableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableObject")
            .field("id", &self.core.id)
            .finish()
    }
}

impl fmt::Display for ObservableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let props = self.core.props.borrow();
        let mut first = true;
        for p in props.iter().filter(|p| p.enumerable) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.value)?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// Private write access to a single privately-settable property.
///
/// Holds a weak reference to the owning object; `set` returns false once
/// the object is gone.
pub struct PrivateSetter {
    target: Weak<ObjectCore>,
    name: String,
}

impl PrivateSetter {
    /// Returns the property name this setter writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes the property, notifying observers when the value actually
    /// changes.
    pub fn set(&self, value: Value) -> bool {
        match self.target.upgrade() {
            Some(core) => ObservableObject { core }.store(&self.name, value, true),
            None => false,
        }
    }
}
