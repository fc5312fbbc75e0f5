//! [`MenuModel`]: the observable list of root items.

use std::fmt;
use std::sync::mpsc::Sender;

use sidenav_core::{ListenerId, Msg, Subject, Topic};

use crate::flatten::{self, FlatEntry};
use crate::item::{self, Action, MenuItem};

/// Ordered root items plus an observer list.
///
/// Every successful mutation calls [`Subject::notify`] exactly once, which
/// posts a [`Msg::Changed`] carrying [`topic`](Self::topic) to each
/// subscriber's channel. Out-of-range indices are no-ops and notify nobody.
#[derive(Debug, Default)]
pub struct MenuModel {
    items: Vec<MenuItem>,
    subject: Subject,
}

impl MenuModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from root items, stamping them (and their subtrees)
    /// as level 0.
    pub fn from_items(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let items = items
            .into_iter()
            .map(|mut item| {
                item.set_level(0);
                item
            })
            .collect();
        Self {
            items,
            subject: Subject::new(),
        }
    }

    // -- Observers --

    pub fn subscribe(&mut self, tx: Sender<Msg>) -> ListenerId {
        self.subject.subscribe(tx)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.subject.unsubscribe(id)
    }

    /// Topic carried by this model's change messages.
    pub fn topic(&self) -> Topic {
        self.subject.topic()
    }

    pub fn listener_count(&self) -> usize {
        self.subject.listener_count()
    }

    fn fire(&mut self) {
        self.subject.notify();
    }

    // -- Mutations --

    pub fn add_item(&mut self, mut item: MenuItem) {
        item.set_level(0);
        self.items.push(item);
        self.fire();
    }

    /// Insert at `index`; `index == item_count()` appends. Returns `false`
    /// for anything larger.
    pub fn insert_item(&mut self, index: usize, mut item: MenuItem) -> bool {
        if index > self.items.len() {
            return false;
        }
        item.set_level(0);
        self.items.insert(index, item);
        self.fire();
        true
    }

    pub fn remove_item(&mut self, index: usize) -> Option<MenuItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.fire();
        Some(removed)
    }

    /// Remove the first root equal to `item` (same text).
    pub fn remove(&mut self, item: &MenuItem) -> Option<MenuItem> {
        let index = self.index_of(item)?;
        self.remove_item(index)
    }

    /// Clearing an already empty model is not a change.
    pub fn remove_all(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.fire();
    }

    pub fn set_items(&mut self, items: impl IntoIterator<Item = MenuItem>) {
        self.items = items
            .into_iter()
            .map(|mut item| {
                item.set_level(0);
                item
            })
            .collect();
        self.fire();
    }

    /// Reorder the children of the node at `parent` (the roots when
    /// `parent` is empty).
    pub fn move_within(&mut self, parent: &[usize], from: usize, to: usize) -> bool {
        let moved = if parent.is_empty() {
            item::move_within(&mut self.items, from, to)
        } else {
            match self.item_at_mut(parent) {
                Some(node) => node.move_child(from, to),
                None => false,
            }
        };
        if moved && from != to {
            self.fire();
        }
        moved
    }

    /// Remove the node at `path` along with its subtree.
    pub fn remove_at(&mut self, path: &[usize]) -> Option<MenuItem> {
        let (&last, parent) = path.split_last()?;
        if parent.is_empty() {
            return self.remove_item(last);
        }
        let removed = self.item_at_mut(parent)?.remove_child(last)?;
        self.fire();
        Some(removed)
    }

    /// Append `child` under the node at `parent`. Returns the new child's
    /// path.
    pub fn add_child_at(&mut self, parent: &[usize], child: MenuItem) -> Option<Vec<usize>> {
        let node = self.item_at_mut(parent)?;
        node.add_child(child);
        let mut path = parent.to_vec();
        path.push(node.child_count() - 1);
        self.fire();
        Some(path)
    }

    /// Apply `f` to the node at `path` and notify once.
    pub fn edit_at<R>(&mut self, path: &[usize], f: impl FnOnce(&mut MenuItem) -> R) -> Option<R> {
        let result = f(self.item_at_mut(path)?);
        self.fire();
        Some(result)
    }

    /// Attach `action` to the first node (pre-order, roots first) whose
    /// text is `text`. Binding an action is not a structural change, so no
    /// notification is sent.
    pub fn bind_action(&mut self, text: &str, action: impl Fn(&str) + 'static) -> bool {
        match self.find_by_text_mut(text) {
            Some(item) => {
                let action: Action = std::rc::Rc::new(action);
                item.set_action(Some(action));
                true
            }
            None => {
                log::debug!("bind_action: no item named {text:?}");
                false
            }
        }
    }

    // -- Queries --

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, item: &MenuItem) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    pub fn find_by_text(&self, text: &str) -> Option<&MenuItem> {
        self.items.iter().find_map(|i| i.find_by_text(text))
    }

    pub fn find_by_text_mut(&mut self, text: &str) -> Option<&mut MenuItem> {
        self.items.iter_mut().find_map(|i| i.find_by_text_mut(text))
    }

    pub fn item_at(&self, path: &[usize]) -> Option<&MenuItem> {
        let (&first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.items.get(first)?, |node, &i| node.child(i))
    }

    /// Mutable access without notification; prefer [`edit_at`](Self::edit_at)
    /// when observers should hear about the change.
    pub fn item_at_mut(&mut self, path: &[usize]) -> Option<&mut MenuItem> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.items.get_mut(first)?;
        for &i in rest {
            node = node.child_mut(i)?;
        }
        Some(node)
    }

    /// Rows the view shows: see [`flatten::flatten`].
    pub fn flatten(&self) -> Vec<FlatEntry<'_>> {
        flatten::flatten(&self.items)
    }

    /// Expand-aware rows including items that are not shown.
    pub fn outline(&self) -> Vec<FlatEntry<'_>> {
        flatten::flatten_outline(&self.items)
    }

    pub fn flatten_all(&self) -> Vec<FlatEntry<'_>> {
        flatten::flatten_all(&self.items)
    }

    /// Deep copy of the tree with a fresh subject and no listeners.
    pub fn working_copy(&self) -> MenuModel {
        MenuModel {
            items: self.items.clone(),
            subject: Subject::new(),
        }
    }

    pub fn description(&self) -> String {
        format!("MenuModel[{} items]", self.items.len())
    }
}

impl fmt::Display for MenuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl FromIterator<MenuItem> for MenuModel {
    fn from_iter<T: IntoIterator<Item = MenuItem>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Receiver};

    fn observed(model: &mut MenuModel) -> Receiver<Msg> {
        let (tx, rx) = mpsc::channel();
        model.subscribe(tx);
        rx
    }

    fn texts(model: &MenuModel) -> Vec<&str> {
        model.items().iter().map(MenuItem::text).collect()
    }

    #[test]
    fn mutations_preserve_order_and_count() {
        let mut model = MenuModel::new();
        model.add_item(MenuItem::new("a"));
        model.add_item(MenuItem::new("b"));
        assert!(model.insert_item(1, MenuItem::new("x")));
        assert!(model.insert_item(3, MenuItem::new("end")));
        assert!(!model.insert_item(9, MenuItem::new("nope")));
        assert_eq!(texts(&model), ["a", "x", "b", "end"]);
        assert_eq!(model.remove_item(0).map(|i| i.text().to_string()), Some("a".into()));
        assert!(model.remove_item(10).is_none());
        assert!(model.remove(&MenuItem::new("b")).is_some());
        assert_eq!(model.item_count(), 2);
        assert_eq!(model.index_of(&MenuItem::new("end")), Some(1));
        assert!(model.item(5).is_none());
    }

    #[test]
    fn one_notification_per_successful_mutation() {
        let mut model = MenuModel::new();
        let rx = observed(&mut model);
        let topic = model.topic();

        model.add_item(MenuItem::new("a"));
        model.insert_item(0, MenuItem::new("b"));
        model.remove_item(7);
        model.insert_item(7, MenuItem::new("c"));
        model.remove_item(0);
        model.set_items(vec![MenuItem::new("z")]);
        model.remove_all();
        model.remove_all();

        let msgs: Vec<_> = rx.try_iter().collect();
        assert_eq!(msgs.len(), 5);
        assert!(msgs.iter().all(|m| matches!(m, Msg::Changed { topic: t } if *t == topic)));
    }

    #[test]
    fn unsubscribed_listeners_hear_nothing() {
        let mut model = MenuModel::new();
        let (tx, rx) = mpsc::channel();
        let id = model.subscribe(tx);
        assert!(model.unsubscribe(id));
        model.add_item(MenuItem::new("a"));
        assert!(rx.try_recv().is_err());
        assert!(!model.unsubscribe(id));
    }

    #[test]
    fn roots_are_level_zero() {
        let mut nested = MenuItem::new("n");
        nested.set_level(4);
        let mut model = MenuModel::from_items(vec![nested.clone()]);
        model.add_item(nested.with_child(MenuItem::new("c")));
        assert_eq!(model.item(0).unwrap().level(), 0);
        assert_eq!(model.item(1).unwrap().level(), 0);
        assert_eq!(model.item_at(&[1, 0]).unwrap().level(), 1);
    }

    #[test]
    fn find_searches_roots_then_subtrees() {
        let model = MenuModel::from_items(vec![
            MenuItem::new("Home"),
            MenuItem::new("Profile").with_child(MenuItem::new("Settings").with_tooltip("nested")),
            MenuItem::new("Settings").with_tooltip("root"),
        ]);
        assert_eq!(model.find_by_text("Settings").unwrap().tooltip(), Some("nested"));
        assert!(model.find_by_text("Nope").is_none());
    }

    #[test]
    fn bind_action_reaches_nested_items() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut model = MenuModel::from_items(vec![
            MenuItem::new("Profile").with_child(MenuItem::new("Settings")),
        ]);
        assert!(model.bind_action("Settings", move |t| sink.borrow_mut().push(t.to_string())));
        assert!(!model.bind_action("Missing", |_| {}));
        assert!(model.item_at(&[0, 0]).unwrap().execute_action());
        assert_eq!(*seen.borrow(), ["Settings"]);
    }

    #[test]
    fn path_operations() {
        let mut model = MenuModel::from_items(vec![
            MenuItem::new("Profile").with_children(["a", "b", "c"].map(MenuItem::new)),
        ]);
        let rx = observed(&mut model);

        assert!(model.move_within(&[0], 2, 0));
        let kids: Vec<_> = model.item(0).unwrap().children().iter().map(MenuItem::text).collect();
        assert_eq!(kids, ["c", "a", "b"]);
        assert!(!model.move_within(&[0], 0, 3));
        assert!(!model.move_within(&[5], 0, 1));

        assert_eq!(model.add_child_at(&[0, 1], MenuItem::new("deep")), Some(vec![0, 1, 0]));
        assert_eq!(model.item_at(&[0, 1, 0]).unwrap().level(), 2);

        assert_eq!(model.edit_at(&[0, 0], |i| i.set_enabled(false)), Some(()));
        assert!(!model.item_at(&[0, 0]).unwrap().is_enabled());
        assert!(model.edit_at(&[3], |_| ()).is_none());

        assert_eq!(model.remove_at(&[0, 1]).unwrap().text(), "a");
        assert!(model.remove_at(&[]).is_none());
        assert_eq!(rx.try_iter().count(), 4);
    }

    #[test]
    fn working_copy_is_deep_and_detached() {
        let mut model = MenuModel::from_items(vec![
            MenuItem::new("Profile")
                .with_tooltip("tip")
                .with_expanded(true)
                .with_child(MenuItem::new("Settings").with_shown(false).with_user_data("k=v")),
        ]);
        let rx = observed(&mut model);
        let mut copy = model.working_copy();
        assert_eq!(copy.listener_count(), 0);
        assert_ne!(copy.topic(), model.topic());

        copy.edit_at(&[0, 0], |i| i.set_text("Changed"));
        assert_eq!(model.item_at(&[0, 0]).unwrap().text(), "Settings");
        let child = copy.item_at(&[0, 0]).unwrap();
        assert!(!child.is_shown());
        assert_eq!(child.user_data(), Some("k=v"));
        assert_eq!(child.level(), 1);
        assert!(copy.item(0).unwrap().is_expanded());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn description() {
        let model: MenuModel = ["a", "b"].map(MenuItem::new).into_iter().collect();
        assert_eq!(model.to_string(), "MenuModel[2 items]");
    }
}
