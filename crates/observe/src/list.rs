//! Observable ordered collection.
//!
//! `ObservableList` holds arbitrary items. Items that are themselves
//! observable objects are auto-subscribed on entry: their property changes
//! are forwarded to the list's own observers, stamped with the item and its
//! current index, with the list appended to the provenance chain. The
//! subscription is torn down exactly when the item leaves the list.
//!
//! Each slot shares its index cell with the forwarding callback; structural
//! mutations restamp the cells of every shifted slot, so a forwarded event
//! always reports the position the item occupies at delivery time.

use crate::event::{ChangeEvent, ListChange, Subject};
use crate::object::ObservableObject;
use crate::registry::{ObserverHandle, ObserverRegistry};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::ops::ControlFlow;
use ripple_core::{next_observable_id, ObservableId, Value};

/// An element of an observable list.
///
/// Plain values compare by value equality; objects compare by handle
/// identity.
#[derive(Clone, Debug)]
pub enum Item {
    /// A plain data value.
    Value(Value),
    /// A contained observable object, auto-subscribed while in a list.
    Object(ObservableObject),
}

impl Item {
    /// Returns the plain value if this item is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Item::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the object if this item is one.
    pub fn as_object(&self) -> Option<&ObservableObject> {
        match self {
            Item::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true if this item is an observable object.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Item::Object(_))
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Value(a), Item::Value(b)) => a == b,
            (Item::Object(a), Item::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Value(v) => write!(f, "{}", v),
            Item::Object(o) => write!(f, "{}", o),
        }
    }
}

impl From<Value> for Item {
    fn from(v: Value) -> Self {
        Item::Value(v)
    }
}

impl From<ObservableObject> for Item {
    fn from(o: ObservableObject) -> Self {
        Item::Object(o)
    }
}

impl From<bool> for Item {
    fn from(v: bool) -> Self {
        Item::Value(v.into())
    }
}

impl From<i64> for Item {
    fn from(v: i64) -> Self {
        Item::Value(v.into())
    }
}

impl From<f64> for Item {
    fn from(v: f64) -> Self {
        Item::Value(v.into())
    }
}

impl From<&str> for Item {
    fn from(v: &str) -> Self {
        Item::Value(v.into())
    }
}

pub(crate) struct Slot {
    pub(crate) item: Item,
    /// Index cell shared with the forwarding callback; restamped on every
    /// structural mutation.
    pub(crate) position: Rc<Cell<usize>>,
    /// Subscription on the contained object, present for object items.
    pub(crate) watch: Option<ObserverHandle>,
}

pub(crate) struct ListCore {
    pub(crate) id: ObservableId,
    pub(crate) slots: RefCell<Vec<Slot>>,
    pub(crate) observers: ObserverRegistry,
    pub(crate) validator: Option<Box<dyn Fn(&Item) -> bool>>,
}

/// An observable ordered collection of items.
#[derive(Clone)]
pub struct ObservableList {
    pub(crate) core: Rc<ListCore>,
}

impl Default for ObservableList {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservableList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates an empty list whose insertions must pass `validator`.
    pub fn with_validator<F>(validator: F) -> Self
    where
        F: Fn(&Item) -> bool + 'static,
    {
        Self::build(Some(Box::new(validator)))
    }

    /// Creates a list from the given items, inserted through the normal
    /// add path (items rejected by a validator are skipped).
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        let list = Self::new();
        for item in items {
            let _ = list.add(item);
        }
        list
    }

    fn build(validator: Option<Box<dyn Fn(&Item) -> bool>>) -> Self {
        Self {
            core: Rc::new(ListCore {
                id: next_observable_id(),
                slots: RefCell::new(Vec::new()),
                observers: ObserverRegistry::new(),
                validator,
            }),
        }
    }

    /// Returns the identity of this list.
    #[inline]
    pub fn id(&self) -> ObservableId {
        self.core.id
    }

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.slots.borrow().len()
    }

    /// Returns true if the list has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.slots.borrow().is_empty()
    }

    /// Returns the item at `index`, or None when out of range.
    pub fn at(&self, index: usize) -> Option<Item> {
        self.core.slots.borrow().get(index).map(|s| s.item.clone())
    }

    /// Appends an item.
    pub fn add(&self, item: Item) -> bool {
        self.insert(self.len(), item)
    }

    /// Inserts an item at `index` (valid range `[0, len]`).
    ///
    /// The validator may reject the item. Object items are subscribed so
    /// their property changes forward through this list. Notifies an Add
    /// event named after the insertion index.
    pub fn insert(&self, index: usize, item: Item) -> bool {
        if index > self.len() {
            return false;
        }
        if let Some(validator) = &self.core.validator {
            if !validator(&item) {
                return false;
            }
        }

        let position = Rc::new(Cell::new(index));
        let watch = match &item {
            Item::Object(object) => Some(self.subscribe_item(object, &item, &position)),
            _ => None,
        };

        {
            let mut slots = self.core.slots.borrow_mut();
            slots.insert(index, Slot { item, position, watch });
            for (i, slot) in slots.iter().enumerate().skip(index) {
                slot.position.set(i);
            }
        }

        self.notify_structural(ListChange::Add, index, None);
        true
    }

    /// Removes up to `count` items starting at `start`.
    ///
    /// Returns 0 (and leaves the list unchanged) when `start` is out of
    /// range or `count` is 0; otherwise clamps `count` to the remaining
    /// length. Subscriptions of removed object items are torn down before
    /// observers hear about the removal; one Remove event fires per
    /// removed item, named after the item's original position.
    pub fn remove_range(&self, start: usize, count: usize) -> usize {
        let len = self.len();
        if start >= len || count == 0 {
            return 0;
        }
        let count = count.min(len - start);

        let removed: Vec<Slot> = {
            let mut slots = self.core.slots.borrow_mut();
            let removed: Vec<Slot> = slots.drain(start..start + count).collect();
            for (i, slot) in slots.iter().enumerate().skip(start) {
                slot.position.set(i);
            }
            removed
        };

        for slot in &removed {
            if let (Item::Object(object), Some(handle)) = (&slot.item, slot.watch) {
                object.remove_change_observer(handle);
            }
        }
        for (offset, slot) in removed.into_iter().enumerate() {
            self.notify_structural(ListChange::Remove, start + offset, Some(slot.item));
        }

        count
    }

    /// Removes the item at `index`.
    pub fn remove(&self, index: usize) -> bool {
        self.remove_range(index, 1) == 1
    }

    /// Removes the final item if present.
    pub fn remove_last(&self) -> bool {
        let len = self.len();
        len > 0 && self.remove_range(len - 1, 1) == 1
    }

    /// Removes all items.
    pub fn clear(&self) {
        self.remove_range(0, self.len());
    }

    /// Replaces the item at `index`.
    ///
    /// Replacing with an item identical to the current one is a silent
    /// no-op that keeps the existing subscription. Otherwise the old
    /// item's subscription is torn down, the new item is installed (and
    /// subscribed if applicable), and a Replace event fires with the old
    /// item as the prior value.
    pub fn replace(&self, index: usize, item: Item) -> bool {
        if index >= self.len() {
            return false;
        }
        {
            let slots = self.core.slots.borrow();
            if slots[index].item == item {
                return true;
            }
        }

        let position = self.core.slots.borrow()[index].position.clone();
        let watch = match &item {
            Item::Object(object) => Some(self.subscribe_item(object, &item, &position)),
            _ => None,
        };

        let (old_item, old_watch) = {
            let mut slots = self.core.slots.borrow_mut();
            let slot = &mut slots[index];
            let old_watch = slot.watch.take();
            let old_item = core::mem::replace(&mut slot.item, item);
            slot.watch = watch;
            (old_item, old_watch)
        };

        if let (Item::Object(object), Some(handle)) = (&old_item, old_watch) {
            object.remove_change_observer(handle);
        }

        self.notify_structural(ListChange::Replace, index, Some(old_item));
        true
    }

    /// Removes and inserts with array-splice semantics.
    ///
    /// A negative `start` counts from the end; out-of-range values clamp
    /// into `[0, len]`. A missing `delete_count` removes the rest of the
    /// list. The given items are then inserted at ascending positions
    /// starting at `start` (each through the validated add path). Returns
    /// the removed items with their pre-removal values.
    pub fn splice(
        &self,
        start: isize,
        delete_count: Option<usize>,
        items: Vec<Item>,
    ) -> Vec<Item> {
        let len = self.len();
        let start = if start < 0 {
            let from_end = len as isize + start;
            if from_end < 0 {
                0
            } else {
                from_end as usize
            }
        } else {
            (start as usize).min(len)
        };
        let delete = delete_count.unwrap_or(len - start).min(len - start);

        let removed: Vec<Item> = (start..start + delete).filter_map(|i| self.at(i)).collect();
        self.remove_range(start, delete);

        let mut at = start;
        for item in items {
            if self.insert(at, item) {
                at += 1;
            }
        }

        removed
    }

    /// Returns the index of the first item equal to `item` at or after
    /// `start`.
    pub fn index_of(&self, item: &Item, start: usize) -> Option<usize> {
        let mut i = start;
        while i < self.len() {
            if self.at(i).as_ref() == Some(item) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Returns the first item at or after `start` matching the predicate.
    pub fn first<P>(&self, predicate: P, start: usize) -> Option<Item>
    where
        P: Fn(&Item) -> bool,
    {
        let mut i = start;
        while i < self.len() {
            if let Some(item) = self.at(i) {
                if predicate(&item) {
                    return Some(item);
                }
            }
            i += 1;
        }
        None
    }

    /// Returns the last item at or after `start` matching the predicate.
    pub fn last<P>(&self, predicate: P, start: usize) -> Option<Item>
    where
        P: Fn(&Item) -> bool,
    {
        let mut found = None;
        let mut i = start;
        while i < self.len() {
            if let Some(item) = self.at(i) {
                if predicate(&item) {
                    found = Some(item);
                }
            }
            i += 1;
        }
        found
    }

    /// Returns true if every item matches the predicate.
    pub fn every<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Item) -> bool,
    {
        let mut i = 0;
        while i < self.len() {
            if let Some(item) = self.at(i) {
                if !predicate(&item) {
                    return false;
                }
            }
            i += 1;
        }
        true
    }

    /// Returns the items matching the predicate.
    pub fn filter<P>(&self, predicate: P) -> Vec<Item>
    where
        P: Fn(&Item) -> bool,
    {
        let mut out = Vec::new();
        let mut i = 0;
        while i < self.len() {
            if let Some(item) = self.at(i) {
                if predicate(&item) {
                    out.push(item);
                }
            }
            i += 1;
        }
        out
    }

    /// Visits items in order over the live sequence; `Break` stops early.
    ///
    /// Items inserted or removed by the callback are visible to the
    /// remainder of the walk.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Item) -> ControlFlow<()>,
    {
        let mut i = 0;
        while i < self.len() {
            if let Some(item) = self.at(i) {
                if f(i, &item).is_break() {
                    return;
                }
            }
            i += 1;
        }
    }

    /// Registers a change observer.
    ///
    /// With `wants_item_changes` unset, the observer receives only
    /// list-structural events, not property changes forwarded from
    /// contained objects.
    pub fn add_change_observer<F>(&self, callback: F, wants_item_changes: bool) -> ObserverHandle
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.core
            .observers
            .add(Rc::new(callback), None, wants_item_changes)
    }

    /// Registers a change observer with a user context.
    pub fn add_change_observer_with_context<F>(
        &self,
        callback: F,
        context: Value,
        wants_item_changes: bool,
    ) -> ObserverHandle
    where
        F: Fn(&ChangeEvent) + 'static,
    {
        self.core
            .observers
            .add(Rc::new(callback), Some(context), wants_item_changes)
    }

    /// Removes an observer by handle; returns whether a match was found.
    pub fn remove_change_observer(&self, handle: ObserverHandle) -> bool {
        self.core.observers.remove(handle)
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.core.observers.len()
    }

    /// Materializes the current items.
    pub fn to_array(&self) -> Vec<Item> {
        self.core
            .slots
            .borrow()
            .iter()
            .map(|s| s.item.clone())
            .collect()
    }

    /// Subscribes to a contained object, forwarding its events through
    /// this list stamped with the item and its current position.
    fn subscribe_item(
        &self,
        object: &ObservableObject,
        item: &Item,
        position: &Rc<Cell<usize>>,
    ) -> ObserverHandle {
        let list = Rc::downgrade(&self.core);
        let position = position.clone();
        let item = item.clone();
        object.add_change_observer(move |event| {
            if let Some(core) = list.upgrade() {
                let list = ObservableList { core };
                list.relay_item_event(event, position.get(), &item);
            }
        })
    }

    fn relay_item_event(&self, event: &ChangeEvent, index: usize, item: &Item) {
        let mut forwarded = event.clone();
        forwarded.index = Some(index);
        forwarded.list_item = Some(item.clone());
        self.core
            .observers
            .notify(&forwarded, &Subject::List(self.clone()), true);
    }

    fn notify_structural(&self, change: ListChange, index: usize, old_value: Option<Item>) {
        let subject = Subject::List(self.clone());
        let event = ChangeEvent::structural(self, change, index, old_value);
        self.core.observers.notify(&event, &subject, false);
    }
}

impl PartialEq for ObservableList {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for ObservableList {}

impl fmt::Debug for ObservableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("id", &self.core.id)
            .finish()
    }
}

impl fmt::Display for ObservableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.core.slots.borrow();
        let mut first = true;
        for slot in slots.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", slot.item)?;
            first = false;
        }
        Ok(())
    }
}
