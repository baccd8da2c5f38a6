//! Selected user ids, kept outside render state.
//!
//! Grid cells subscribe to their own id and repaint only when their
//! membership flips, so toggling one card never re-renders the others.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::models::UserId;

type Listener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct Inner {
    selected: HashSet<UserId>,
    listeners: HashMap<UserId, Vec<(u64, Listener)>>,
    next_key: u64,
}

impl Inner {
    fn listeners_for(&self, id: UserId) -> Vec<Listener> {
        self.listeners
            .get(&id)
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default()
    }
}

/// Clones share the same selection.
#[derive(Clone, Default)]
pub struct SelectionStore {
    inner: Rc<RefCell<Inner>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.inner.borrow().selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().selected.is_empty()
    }

    /// Selected ids in ascending order
    pub fn selected(&self) -> Vec<UserId> {
        let mut ids: Vec<_> = self.inner.borrow().selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Flip membership of `id` and notify its listeners. Returns the new membership.
    pub fn toggle(&self, id: UserId) -> bool {
        let (selected, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let selected = if inner.selected.remove(&id) {
                false
            } else {
                inner.selected.insert(id);
                true
            };
            (selected, inner.listeners_for(id))
        };
        // Borrow released: listeners may read the store.
        for listener in listeners {
            listener(selected);
        }
        selected
    }

    /// Select every id in `ids`, or clear the selection when they are all
    /// selected already.
    pub fn select_all(&self, ids: &[UserId]) {
        let all_selected = {
            let inner = self.inner.borrow();
            !ids.is_empty() && ids.iter().all(|id| inner.selected.contains(id))
        };
        if all_selected {
            self.clear();
            return;
        }

        let changed: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            let added: Vec<_> = ids
                .iter()
                .copied()
                .filter(|id| inner.selected.insert(*id))
                .collect();
            added.into_iter().map(|id| inner.listeners_for(id)).collect()
        };
        for listener in changed.into_iter().flatten() {
            listener(true);
        }
    }

    pub fn clear(&self) {
        let changed: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            let cleared: Vec<_> = inner.selected.drain().collect();
            cleared.into_iter().map(|id| inner.listeners_for(id)).collect()
        };
        for listener in changed.into_iter().flatten() {
            listener(false);
        }
    }

    /// Listen to membership changes of `id`. The listener runs immediately
    /// with the current membership, then on every change until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, id: UserId, listener: impl Fn(bool) + 'static) -> Subscription {
        let listener: Listener = Rc::new(listener);
        let (key, selected) = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_key;
            inner.next_key += 1;
            inner
                .listeners
                .entry(id)
                .or_default()
                .push((key, Rc::clone(&listener)));
            (key, inner.selected.contains(&id))
        };
        listener(selected);

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
            key,
        }
    }

    #[cfg(test)]
    fn listener_count(&self, id: UserId) -> usize {
        self.inner.borrow().listeners.get(&id).map_or(0, Vec::len)
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selected", &self.selected())
            .finish_non_exhaustive()
    }
}

/// Removes its listener when dropped
#[derive(Debug)]
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<RefCell<Inner>>,
    id: UserId,
    key: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let mut inner = store.borrow_mut();
        if let Some(entries) = inner.listeners.get_mut(&self.id) {
            entries.retain(|(key, _)| *key != self.key);
            if entries.is_empty() {
                inner.listeners.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl Fn(bool) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |selected| sink.borrow_mut().push(selected))
    }

    #[test]
    fn subscribe_reports_current_membership() {
        let store = SelectionStore::new();
        let id = UserId::new(3);
        store.toggle(id);

        let (calls, listener) = recorder();
        let _subscription = store.subscribe(id, listener);
        assert_eq!(*calls.borrow(), vec![true]);
    }

    #[test]
    fn toggle_notifies_only_that_id() {
        let store = SelectionStore::new();
        let (first_calls, first) = recorder();
        let (second_calls, second) = recorder();
        let _a = store.subscribe(UserId::new(1), first);
        let _b = store.subscribe(UserId::new(2), second);

        assert!(store.toggle(UserId::new(1)));
        assert!(!store.toggle(UserId::new(1)));

        assert_eq!(*first_calls.borrow(), vec![false, true, false]);
        assert_eq!(*second_calls.borrow(), vec![false]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let store = SelectionStore::new();
        let id = UserId::new(5);
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let subscription = store.subscribe(id, move |_| counter.set(counter.get() + 1));
        assert_eq!(store.listener_count(id), 1);

        subscription.unsubscribe();
        assert_eq!(store.listener_count(id), 0);
        store.toggle(id);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn select_all_selects_then_clears() {
        let store = SelectionStore::new();
        let ids = [UserId::new(1), UserId::new(2), UserId::new(3)];
        store.toggle(ids[1]);

        let (calls, listener) = recorder();
        let _already_selected = store.subscribe(ids[1], listener);

        store.select_all(&ids);
        assert_eq!(store.selected(), ids.to_vec());
        // Membership of id 2 did not change, so no extra notification.
        assert_eq!(*calls.borrow(), vec![true]);

        store.select_all(&ids);
        assert!(store.is_empty());
        assert_eq!(*calls.borrow(), vec![true, false]);
    }

    #[test]
    fn listener_can_read_the_store() {
        let store = SelectionStore::new();
        let reader = store.clone();
        let seen = Rc::new(Cell::new(0));
        let seen_in_listener = Rc::clone(&seen);
        let _subscription = store.subscribe(UserId::new(9), move |_| {
            seen_in_listener.set(reader.len());
        });

        store.toggle(UserId::new(9));
        assert_eq!(seen.get(), 1);
    }
}
