//! Change event payload delivered to observers.
//!
//! Every notification carries the originating subject, the property name
//! (or decimal index for list-structural events), the prior value, and a
//! provenance chain of every layer that relayed the event. Each observer
//! receives its own copy with its registration context filled in.

use crate::list::{Item, ObservableList};
use crate::object::ObservableObject;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ripple_core::{ObservableId, Value};

/// The kind of structural change to a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListChange {
    /// An item was inserted.
    Add,
    /// An item was removed.
    Remove,
    /// An item was replaced in place.
    Replace,
}

/// The observable a change event originates from or was relayed by.
#[derive(Clone, Debug)]
pub enum Subject {
    /// An observable object.
    Object(ObservableObject),
    /// An observable list.
    List(ObservableList),
}

impl Subject {
    /// Returns the identity of the underlying observable.
    pub fn id(&self) -> ObservableId {
        match self {
            Subject::Object(o) => o.id(),
            Subject::List(l) => l.id(),
        }
    }

    /// Returns the object if this subject is one.
    pub fn as_object(&self) -> Option<&ObservableObject> {
        match self {
            Subject::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the list if this subject is one.
    pub fn as_list(&self) -> Option<&ObservableList> {
        match self {
            Subject::List(l) => Some(l),
            _ => None,
        }
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Subject {}

/// A change notification.
///
/// For a property change, `subject` is the object that changed and `name`
/// is the property name. For a list-structural change, `subject` is the
/// list and `name` is the decimal index. A forwarded item-property change
/// keeps the originating object as `subject` and additionally carries the
/// item's current `index` and the `list_item` reference.
///
/// `senders` accumulates every relaying layer; the last entry is the relay
/// closest to the observer.
#[derive(Clone, Debug)]
pub struct ChangeEvent {
    /// The observable the change originated from.
    pub subject: Subject,
    /// Property name, or decimal index for list-structural events.
    pub name: String,
    /// Prior value; None marks a property that did not exist before.
    pub old_value: Option<Item>,
    /// Set on list-structural events.
    pub list_change: Option<ListChange>,
    /// Item index for list-structural and forwarded events.
    pub index: Option<usize>,
    /// The contained item, on forwarded item-property events.
    pub list_item: Option<Item>,
    /// Provenance chain of relaying observables, outermost last.
    pub senders: Vec<Subject>,
    /// The receiving observer's registration context.
    pub context: Option<Value>,
}

impl ChangeEvent {
    /// Builds a property-change event for an object.
    pub(crate) fn property(object: &ObservableObject, name: &str, old_value: Option<Item>) -> Self {
        Self {
            subject: Subject::Object(object.clone()),
            name: name.into(),
            old_value,
            list_change: None,
            index: None,
            list_item: None,
            senders: Vec::new(),
            context: None,
        }
    }

    /// Builds a structural event for a list.
    pub(crate) fn structural(
        list: &ObservableList,
        change: ListChange,
        index: usize,
        old_value: Option<Item>,
    ) -> Self {
        Self {
            subject: Subject::List(list.clone()),
            name: index.to_string(),
            old_value,
            list_change: Some(change),
            index: Some(index),
            list_item: None,
            senders: Vec::new(),
            context: None,
        }
    }

    /// Returns true if this event was forwarded from a contained item
    /// rather than raised by the list itself.
    pub fn is_item_event(&self) -> bool {
        self.list_item.is_some()
    }
}
