//! Observer registration and dispatch.
//!
//! This module provides `ObserverRegistry`, the ordered collection of
//! registered callbacks embedded in every observable. Registration returns
//! an opaque handle; removal compares by handle identity.

use crate::event::{ChangeEvent, Subject};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use ripple_core::Value;

/// Opaque token identifying a registered observer.
pub type ObserverHandle = u64;

/// Callback type for change notifications.
pub type ObserverCallback = Rc<dyn Fn(&ChangeEvent)>;

#[derive(Clone)]
struct ObserverEntry {
    handle: ObserverHandle,
    callback: ObserverCallback,
    context: Option<Value>,
    /// Whether this observer wants forwarded item-level events.
    item_events: bool,
}

/// Ordered registry of change observers.
///
/// Dispatch order is registration order. Each pass iterates a snapshot of
/// the entries taken when the pass starts: observers registered or removed
/// from within a callback do not affect the in-flight pass, so a
/// just-removed observer may still be invoked once before the removal
/// takes effect.
pub struct ObserverRegistry {
    entries: RefCell<Vec<ObserverEntry>>,
    next_handle: Cell<ObserverHandle>,
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
        }
    }

    /// Registers an observer and returns its handle.
    pub fn add(
        &self,
        callback: ObserverCallback,
        context: Option<Value>,
        item_events: bool,
    ) -> ObserverHandle {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);

        self.entries.borrow_mut().push(ObserverEntry {
            handle,
            callback,
            context,
            item_events,
        });

        handle
    }

    /// Removes an observer by handle.
    ///
    /// Returns true if the handle matched a registered observer; a second
    /// removal of the same handle returns false.
    pub fn remove(&self, handle: ObserverHandle) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.handle != handle);
        entries.len() != before
    }

    /// Returns the number of registered observers.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if no observers are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Dispatches an event to every registered observer.
    ///
    /// `relay` is appended to the provenance chain once for the pass; each
    /// observer then receives its own copy of the event with its
    /// registration context filled in. When `item_level` is set, observers
    /// that did not ask for item events are skipped.
    pub fn notify(&self, event: &ChangeEvent, relay: &Subject, item_level: bool) {
        let snapshot: Vec<ObserverEntry> = self.entries.borrow().clone();
        if snapshot.is_empty() {
            return;
        }

        let mut relayed = event.clone();
        relayed.senders.push(relay.clone());

        for entry in snapshot {
            if item_level && !entry.item_events {
                continue;
            }
            let mut delivered = relayed.clone();
            delivered.context = entry.context.clone();
            (entry.callback)(&delivered);
        }
    }
}
