//! Integration tests for item-level event forwarding through lists.

use ripple::{ChangeEvent, Item, ObservableList, ObservableObject, Subject, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn shape(x: i64) -> ObservableObject {
    let object = ObservableObject::new();
    object.add_property("x", Value::Int(x));
    object
}

#[test]
fn forwarded_event_keeps_subject_and_appends_list_to_senders() {
    let list = ObservableList::new();
    let object = shape(1);
    list.add(Item::Object(object.clone()));

    let events: Rc<RefCell<Vec<ChangeEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let events_clone = events.clone();
    list.add_change_observer(
        move |event| events_clone.borrow_mut().push(event.clone()),
        true,
    );

    object.set("x", Value::Int(2));

    let seen = events.borrow();
    assert_eq!(seen.len(), 1);
    let event = &seen[0];

    // The subject is the nested object, not the list.
    assert_eq!(event.subject, Subject::Object(object.clone()));
    assert_eq!(event.name, "x");
    assert_eq!(event.old_value, Some(Item::Value(Value::Int(1))));
    assert_eq!(event.index, Some(0));
    assert_eq!(event.list_item, Some(Item::Object(object.clone())));

    // Provenance: originating object first, relaying list last.
    assert_eq!(event.senders.len(), 2);
    assert_eq!(event.senders[0], Subject::Object(object.clone()));
    assert_eq!(event.senders[1], Subject::List(list.clone()));
}

#[test]
fn direct_observer_sees_shorter_provenance_than_list_observer() {
    let list = ObservableList::new();
    let object = shape(1);
    list.add(Item::Object(object.clone()));

    let direct = Rc::new(RefCell::new(0usize));
    let direct_clone = direct.clone();
    object.add_change_observer(move |event| {
        *direct_clone.borrow_mut() = event.senders.len();
    });

    let relayed = Rc::new(RefCell::new(0usize));
    let relayed_clone = relayed.clone();
    list.add_change_observer(
        move |event| {
            *relayed_clone.borrow_mut() = event.senders.len();
        },
        true,
    );

    object.set("x", Value::Int(2));

    assert_eq!(*direct.borrow(), 1);
    assert_eq!(*relayed.borrow(), 2);
}

#[test]
fn provenance_ids_are_innermost_first() {
    let inner = ObservableList::new();
    let object = shape(1);
    inner.add(Item::Object(object.clone()));

    let ids = Rc::new(RefCell::new(Vec::new()));
    let ids_clone = ids.clone();
    inner.add_change_observer(
        move |event| {
            ids_clone
                .borrow_mut()
                .extend(event.senders.iter().map(|s| s.id()));
        },
        true,
    );

    object.set("x", Value::Int(5));

    assert_eq!(*ids.borrow(), vec![object.id(), inner.id()]);
}

#[test]
fn splice_restamps_forwarded_indices() {
    let list = ObservableList::new();
    let object = shape(1);
    list.add(Item::from("a"));
    list.add(Item::Object(object.clone()));
    list.add(Item::from("b"));

    let index = Rc::new(RefCell::new(None));
    let index_clone = index.clone();
    list.add_change_observer(move |event| *index_clone.borrow_mut() = event.index, true);

    // Remove "a" and prepend two strings: the object moves from 1 to 2.
    list.splice(0, Some(1), vec![Item::from("p"), Item::from("q")]);

    object.set("x", Value::Int(2));
    assert_eq!(*index.borrow(), Some(2));
}

#[test]
fn replace_tears_down_old_subscription_and_installs_new() {
    let list = ObservableList::new();
    let old = shape(1);
    let new = shape(10);
    list.add(Item::Object(old.clone()));

    let count = Rc::new(RefCell::new(0));
    let count_clone = count.clone();
    list.add_change_observer(
        move |event| {
            if event.is_item_event() {
                *count_clone.borrow_mut() += 1;
            }
        },
        true,
    );

    list.replace(0, Item::Object(new.clone()));

    old.set("x", Value::Int(2)); // no longer forwarded
    assert_eq!(*count.borrow(), 0);

    new.set("x", Value::Int(11)); // forwarded
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn clear_tears_down_every_subscription() {
    let list = ObservableList::new();
    let objects: Vec<_> = (0..4).map(shape).collect();
    for object in &objects {
        list.add(Item::Object(object.clone()));
    }
    for object in &objects {
        assert_eq!(object.observer_count(), 1);
    }

    list.clear();

    for object in &objects {
        assert_eq!(object.observer_count(), 0);
    }
    assert!(list.is_empty());
}

#[test]
fn structural_observer_receives_context_but_not_item_events() {
    let list = ObservableList::new();
    let object = shape(1);
    list.add(Item::Object(object.clone()));

    let contexts = Rc::new(RefCell::new(Vec::new()));
    let contexts_clone = contexts.clone();
    list.add_change_observer_with_context(
        move |event| contexts_clone.borrow_mut().push(event.context.clone()),
        Value::String("ui-binding".into()),
        false,
    );

    object.set("x", Value::Int(2)); // filtered out
    list.add(Item::from(7)); // delivered with context

    let seen = contexts.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], Some(Value::String("ui-binding".into())));
}

#[test]
fn same_object_at_two_indices_forwards_twice() {
    let list = ObservableList::new();
    let object = shape(1);
    list.add(Item::Object(object.clone()));
    list.add(Item::Object(object.clone()));

    let indices = Rc::new(RefCell::new(Vec::new()));
    let indices_clone = indices.clone();
    list.add_change_observer(
        move |event| indices_clone.borrow_mut().push(event.index),
        true,
    );

    object.set("x", Value::Int(2));

    assert_eq!(*indices.borrow(), vec![Some(0), Some(1)]);
}
