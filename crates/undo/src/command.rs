//! Invertible commands.
//!
//! A command executes its forward action exactly once and yields the
//! command that undoes it. Executing that inverse yields the original
//! action again, so undo/redo is replay of commands bouncing between two
//! stacks. A command with nothing to undo yields None.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use ripple_observe::{Item, ObservableList, ObservableObject, Value};

/// A reversible unit of action.
pub trait Command {
    /// Executes the forward action, yielding the command that undoes it.
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>>;
}

/// A command sequencing other commands.
///
/// Execution runs the sub-commands in order; the yielded inverse holds the
/// collected inverses in reverse order, so undoing unwinds the sequence
/// back to front. Sub-commands yielding no inverse contribute nothing.
pub struct CompositeCommand {
    commands: Vec<Box<dyn Command>>,
}

impl CompositeCommand {
    /// Creates a composite over the given commands.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self { commands }
    }

    /// Returns the number of sub-commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the composite holds no sub-commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for CompositeCommand {
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>> {
        let mut inverses: Vec<Box<dyn Command>> = Vec::new();
        for command in self.commands {
            if let Some(inverse) = command.exec() {
                inverses.push(inverse);
            }
        }
        inverses.reverse();
        Some(Box::new(CompositeCommand::new(inverses)))
    }
}

/// A command wrapping an arbitrary reversible closure.
pub struct FnCommand {
    action: Box<dyn FnOnce() -> Option<Box<dyn Command>>>,
}

impl FnCommand {
    /// Wraps a closure as a command.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> Option<Box<dyn Command>> + 'static,
    {
        Self {
            action: Box::new(action),
        }
    }
}

impl Command for FnCommand {
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>> {
        (self.action)()
    }
}

/// Sets an observable property; the inverse restores the prior value.
pub struct SetPropertyCommand {
    object: ObservableObject,
    name: String,
    value: Value,
}

impl SetPropertyCommand {
    /// Creates a command setting `name` to `value` on `object`.
    pub fn new(object: ObservableObject, name: impl Into<String>, value: Value) -> Self {
        Self {
            object,
            name: name.into(),
            value,
        }
    }
}

impl Command for SetPropertyCommand {
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>> {
        let this = *self;
        let old = this.object.get(&this.name)?;
        if !this.object.set(&this.name, this.value) {
            return None;
        }
        Some(Box::new(SetPropertyCommand {
            object: this.object,
            name: this.name,
            value: old,
        }))
    }
}

/// Inserts an item into an observable list; the inverse removes it again.
pub struct ListInsertCommand {
    list: ObservableList,
    index: usize,
    item: Item,
}

impl ListInsertCommand {
    /// Creates a command inserting `item` at `index`.
    pub fn new(list: ObservableList, index: usize, item: Item) -> Self {
        Self { list, index, item }
    }
}

impl Command for ListInsertCommand {
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>> {
        let this = *self;
        if !this.list.insert(this.index, this.item) {
            return None;
        }
        Some(Box::new(ListRemoveCommand {
            list: this.list,
            index: this.index,
        }))
    }
}

/// Removes the item at an index; the inverse re-inserts it.
pub struct ListRemoveCommand {
    list: ObservableList,
    index: usize,
}

impl ListRemoveCommand {
    /// Creates a command removing the item at `index`.
    pub fn new(list: ObservableList, index: usize) -> Self {
        Self { list, index }
    }
}

impl Command for ListRemoveCommand {
    fn exec(self: Box<Self>) -> Option<Box<dyn Command>> {
        let this = *self;
        let item = this.list.at(this.index)?;
        if !this.list.remove(this.index) {
            return None;
        }
        Some(Box::new(ListInsertCommand {
            list: this.list,
            index: this.index,
            item,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn test_set_property_roundtrip() {
        let object = ObservableObject::new();
        object.add_property("x", Value::Int(1));

        let set = Box::new(SetPropertyCommand::new(object.clone(), "x", Value::Int(2)));
        let undo = set.exec().unwrap();
        assert_eq!(object.get("x"), Some(Value::Int(2)));

        let redo = undo.exec().unwrap();
        assert_eq!(object.get("x"), Some(Value::Int(1)));

        redo.exec().unwrap();
        assert_eq!(object.get("x"), Some(Value::Int(2)));
    }

    #[test]
    fn test_set_property_fails_on_read_only() {
        let object = ObservableObject::new();
        object.add_ro_property("fixed", Value::Int(1));

        let set = Box::new(SetPropertyCommand::new(object.clone(), "fixed", Value::Int(2)));
        assert!(set.exec().is_none());
        assert_eq!(object.get("fixed"), Some(Value::Int(1)));
    }

    #[test]
    fn test_list_insert_remove_inverses() {
        let list = ObservableList::from_items(vec![Item::from(1), Item::from(3)]);

        let insert = Box::new(ListInsertCommand::new(list.clone(), 1, Item::from(2)));
        let remove = insert.exec().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.at(1), Some(Item::from(2)));

        let insert_again = remove.exec().unwrap();
        assert_eq!(list.len(), 2);

        insert_again.exec().unwrap();
        assert_eq!(list.at(1), Some(Item::from(2)));
    }

    #[test]
    fn test_list_remove_out_of_range_yields_none() {
        let list = ObservableList::new();
        let remove = Box::new(ListRemoveCommand::new(list, 0));
        assert!(remove.exec().is_none());
    }

    fn logging_command(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Box<dyn Command> {
        let log = log.clone();
        Box::new(FnCommand::new(move || {
            log.borrow_mut().push(tag.to_string());
            let log = log.clone();
            Some(Box::new(FnCommand::new(move || {
                log.borrow_mut().push(alloc::format!("undo-{}", tag));
                None
            })) as Box<dyn Command>)
        }))
    }

    #[test]
    fn test_composite_inverse_runs_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composite = Box::new(CompositeCommand::new(vec![
            logging_command(&log, "a"),
            logging_command(&log, "b"),
            logging_command(&log, "c"),
        ]));

        let inverse = composite.exec().unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);

        let _ = inverse.exec();
        assert_eq!(
            *log.borrow(),
            vec!["a", "b", "c", "undo-c", "undo-b", "undo-a"]
        );
    }

    #[test]
    fn test_composite_skips_missing_inverses() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let one_way = Box::new(FnCommand::new(move || {
            log_clone.borrow_mut().push("one-way".to_string());
            None
        }));

        let composite = Box::new(CompositeCommand::new(vec![
            one_way,
            logging_command(&log, "a"),
        ]));

        let inverse = composite.exec().unwrap();
        let _ = inverse.exec();
        assert_eq!(*log.borrow(), vec!["one-way", "a", "undo-a"]);
    }
}
