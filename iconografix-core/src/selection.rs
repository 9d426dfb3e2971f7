//! Selection state machine
//!
//! Tracks which items the user picked, in insertion order. In
//! [`SelectionMode::Single`] at most one item is selected; in
//! [`SelectionMode::Multi`] the selection behaves like an ordered set.
//!
//! Every mutating call pushes the full new snapshot to every subscriber
//! before it returns.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

use crate::catalog::ItemRecord;

/// Selection mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multi,
}

/// Serializable view of the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub mode: SelectionMode,
    /// Selected item ids in insertion order
    pub selected: Vec<String>,
}

/// Handle returned by [`SelectionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&[ItemRecord]) + Send + Sync>;

/// Owner of the current selection
pub struct SelectionStore {
    mode: SelectionMode,
    selected: Vec<ItemRecord>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
    snapshots: watch::Sender<Vec<ItemRecord>>,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("mode", &self.mode)
            .field("selected", &self.state().selected)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    /// Empty selection in single mode
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            mode: SelectionMode::Single,
            selected: Vec::new(),
            subscribers: Vec::new(),
            next_subscriber: 0,
            snapshots,
        }
    }

    /// Register a callback invoked with every new snapshot
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: Fn(&[ItemRecord]) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Channel view of the selection, always holding the latest snapshot
    pub fn watch(&self) -> watch::Receiver<Vec<ItemRecord>> {
        self.snapshots.subscribe()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Single: select exactly `item`. Multi: remove if present, else append.
    pub fn toggle(&mut self, item: &ItemRecord) {
        match self.mode {
            SelectionMode::Single => self.replace_with(item),
            SelectionMode::Multi => match self.position(item) {
                Some(index) => {
                    self.selected.remove(index);
                }
                None => self.selected.push(item.clone()),
            },
        }
        self.notify();
    }

    /// Single: select exactly `item`. Multi: append unless already selected.
    pub fn add(&mut self, item: &ItemRecord) {
        match self.mode {
            SelectionMode::Single => self.replace_with(item),
            SelectionMode::Multi => {
                if self.position(item).is_none() {
                    self.selected.push(item.clone());
                }
            }
        }
        self.notify();
    }

    /// Single: clear everything. Multi: remove `item` if selected.
    pub fn remove(&mut self, item: &ItemRecord) {
        match self.mode {
            SelectionMode::Single => self.selected.clear(),
            SelectionMode::Multi => {
                if let Some(index) = self.position(item) {
                    self.selected.remove(index);
                }
            }
        }
        self.notify();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.notify();
    }

    /// Switch modes; going to single keeps only the earliest selected item
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == SelectionMode::Single {
            self.selected.truncate(1);
        }
        self.mode = mode;
        self.notify();
    }

    /// Selected items in insertion order
    pub fn snapshot(&self) -> Vec<ItemRecord> {
        self.selected.clone()
    }

    pub fn is_selected(&self, item: &ItemRecord) -> bool {
        self.position(item).is_some()
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn state(&self) -> SelectionState {
        SelectionState {
            mode: self.mode,
            selected: self.selected.iter().map(|i| i.id.clone()).collect(),
        }
    }

    fn position(&self, item: &ItemRecord) -> Option<usize> {
        self.selected.iter().position(|i| i.id == item.id)
    }

    fn replace_with(&mut self, item: &ItemRecord) {
        self.selected.clear();
        self.selected.push(item.clone());
    }

    fn notify(&self) {
        trace!(
            "Selection changed ({:?}): {} item(s)",
            self.mode,
            self.selected.len()
        );
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.selected);
        }
        self.snapshots.send_replace(self.selected.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn item(name: &str) -> ItemRecord {
        ItemRecord::from_file_name("TEST", &format!("{name}.svg"))
    }

    fn names(store: &SelectionStore) -> Vec<String> {
        store.snapshot().into_iter().map(|i| i.name).collect()
    }

    fn multi() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.set_mode(SelectionMode::Multi);
        store
    }

    #[test]
    fn test_initial_state() {
        let store = SelectionStore::new();
        assert_eq!(store.mode(), SelectionMode::Single);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_single_toggle_replaces() {
        let mut store = SelectionStore::new();
        store.toggle(&item("a"));
        store.toggle(&item("b"));
        assert_eq!(names(&store), vec!["b"]);

        // Toggling the sole selection keeps it selected
        store.toggle(&item("b"));
        assert_eq!(names(&store), vec!["b"]);
    }

    #[test]
    fn test_single_add_and_remove() {
        let mut store = SelectionStore::new();
        store.add(&item("a"));
        store.add(&item("b"));
        assert_eq!(names(&store), vec!["b"]);

        // Remove clears regardless of the item passed
        store.remove(&item("unrelated"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_multi_toggle_twice_restores() {
        let mut store = multi();
        store.toggle(&item("a"));
        store.toggle(&item("b"));
        let before = store.snapshot();

        store.toggle(&item("x"));
        assert_eq!(names(&store), vec!["a", "b", "x"]);
        store.toggle(&item("x"));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_multi_add_remove_are_set_operations() {
        let mut store = multi();
        store.add(&item("a"));
        store.add(&item("b"));
        store.add(&item("a"));
        assert_eq!(names(&store), vec!["a", "b"]);

        store.remove(&item("a"));
        store.remove(&item("missing"));
        assert_eq!(names(&store), vec!["b"]);
        assert!(store.is_selected(&item("b")));
        assert!(!store.is_selected(&item("a")));
    }

    #[test]
    fn test_multi_to_single_keeps_earliest() {
        let mut store = multi();
        for name in ["a", "b", "c"] {
            store.toggle(&item(name));
        }

        store.set_mode(SelectionMode::Single);
        assert_eq!(names(&store), vec!["a"]);
        assert_eq!(store.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_single_to_multi_preserves() {
        let mut store = SelectionStore::new();
        store.toggle(&item("a"));
        store.set_mode(SelectionMode::Multi);
        assert_eq!(names(&store), vec!["a"]);

        store.toggle(&item("b"));
        assert_eq!(names(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_in_both_modes() {
        let mut store = multi();
        store.toggle(&item("a"));
        store.toggle(&item("b"));
        store.clear();
        assert!(store.is_empty());

        store.set_mode(SelectionMode::Single);
        store.toggle(&item("a"));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_every_mutation_notifies_synchronously() {
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
        let mut store = SelectionStore::new();
        let sink = Arc::clone(&seen);
        store.subscribe(move |snapshot| {
            sink.lock()
                .unwrap()
                .push(snapshot.iter().map(|i| i.name.clone()).collect());
        });

        store.set_mode(SelectionMode::Multi);
        store.toggle(&item("a"));
        store.add(&item("b"));
        store.remove(&item("a"));
        store.clear();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                vec![],
                vec!["a".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec!["b".to_string()],
                vec![],
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Arc::new(Mutex::new(0));
        let mut store = SelectionStore::new();
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.toggle(&item("a"));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle(&item("b"));

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_watch_receives_latest_snapshot() {
        let mut store = SelectionStore::new();
        let receiver = store.watch();

        store.toggle(&item("a"));
        store.toggle(&item("b"));

        let latest: Vec<String> = receiver.borrow().iter().map(|i| i.name.clone()).collect();
        assert_eq!(latest, vec!["b"]);
    }

    #[test]
    fn test_state_view() {
        let mut store = multi();
        store.toggle(&item("a"));
        let state = store.state();
        assert_eq!(state.mode, SelectionMode::Multi);
        assert_eq!(state.selected, vec!["TEST_a"]);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mode"], "multi");
    }
}
