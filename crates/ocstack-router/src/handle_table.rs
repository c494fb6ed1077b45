//! Order-preserving handle table.

use std::collections::HashMap;
use std::fmt;

/// An opaque identifier for an item stored in a [`HandleTable`].
///
/// Handles are unique for the lifetime of the table and never reissued,
/// even after the item they referred to has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A table that owns items, addresses them by opaque [`Handle`], and
/// preserves insertion order independently of deletions.
///
/// Insertion order drives deterministic discovery responses and the
/// FIFO/LIFO listing helpers. Lookups are O(1); removal is O(n) in the
/// number of live items because the order sequence must be spliced.
#[derive(Debug)]
pub struct HandleTable<T> {
    items: HashMap<Handle, T>,
    order: Vec<Handle>,
    next: u64,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            next: 0,
        }
    }

    fn issue(&mut self) -> Handle {
        let h = Handle(self.next);
        self.next += 1;
        h
    }

    /// Store an item at the back of the order, returning its fresh handle.
    pub fn add(&mut self, item: T) -> Handle {
        let h = self.issue();
        self.items.insert(h, item);
        self.order.push(h);
        h
    }

    /// Store several items at the back, returning handles in argument order.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) -> Vec<Handle> {
        items.into_iter().map(|item| self.add(item)).collect()
    }

    /// Store an item in front of all existing items.
    pub fn add_to_front(&mut self, item: T) -> Handle {
        let h = self.issue();
        self.items.insert(h, item);
        self.order.insert(0, h);
        h
    }

    /// Store several items at the front.
    ///
    /// Each item is pushed in front of the previous ones, so the last item
    /// of the batch ends up first in the table. Handles are returned in
    /// argument order.
    pub fn add_all_to_front(&mut self, items: impl IntoIterator<Item = T>) -> Vec<Handle> {
        items.into_iter().map(|item| self.add_to_front(item)).collect()
    }

    /// Look up an item by handle. `None` if absent or already removed.
    #[must_use]
    pub fn lookup(&self, handle: Handle) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Look up an item mutably.
    pub fn lookup_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Look up several handles, in request order. Absent handles are
    /// marked with `None` rather than omitted.
    #[must_use]
    pub fn lookup_many(&self, handles: &[Handle]) -> Vec<Option<&T>> {
        handles.iter().map(|h| self.items.get(h)).collect()
    }

    /// Look up the item at a zero-based position in insertion order.
    #[must_use]
    pub fn lookup_by_order(&self, index: usize) -> Option<&T> {
        self.order.get(index).and_then(|h| self.items.get(h))
    }

    /// Remove an item. Removing an absent handle is a no-op.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let item = self.items.remove(&handle)?;
        if let Some(pos) = self.order.iter().position(|h| *h == handle) {
            self.order.remove(pos);
        }
        Some(item)
    }

    /// Remove several items, returning those that were present.
    pub fn remove_many(&mut self, handles: &[Handle]) -> Vec<T> {
        handles.iter().filter_map(|h| self.remove(*h)).collect()
    }

    /// Remove the item at a zero-based position in insertion order.
    pub fn remove_by_order(&mut self, index: usize) -> Option<T> {
        let handle = *self.order.get(index)?;
        self.remove(handle)
    }

    /// Replace the item under an existing handle, returning the old item.
    ///
    /// If the handle is absent the table is untouched and the new item is
    /// returned back inside `Err`.
    pub fn replace(&mut self, handle: Handle, item: T) -> Result<T, T> {
        match self.items.get_mut(&handle) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(item),
        }
    }

    /// Visit live items in insertion order.
    ///
    /// The closure receives `(item, handle, live_index)` where `live_index`
    /// counts only items still present. Liveness is checked per handle, so
    /// entries removed between walks are skipped without disturbing the
    /// index of the remaining items.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, Handle, usize),
    {
        let mut live = 0;
        for h in &self.order {
            if let Some(item) = self.items.get(h) {
                f(item, *h, live);
                live += 1;
            }
        }
    }

    /// Iterate over `(handle, item)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.order.iter().filter_map(|h| self.items.get(h).map(|item| (*h, item)))
    }

    /// A snapshot of live handles in insertion order.
    ///
    /// Useful when the caller needs to mutate the table while walking it.
    #[must_use]
    pub fn handles(&self) -> Vec<Handle> {
        self.order.clone()
    }

    /// Live items in insertion (FIFO) order.
    #[must_use]
    pub fn list(&self) -> Vec<&T> {
        self.iter().map(|(_, item)| item).collect()
    }

    /// Live items in reverse insertion (FILO) order.
    #[must_use]
    pub fn reverse_list(&self) -> Vec<&T> {
        let mut items = self.list();
        items.reverse();
        items
    }

    /// Count of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all entries. Previously issued handles stay retired.
    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut table = HandleTable::new();
        let handles = table.add_all(0_usize..100);
        for (i, a) in handles.iter().enumerate() {
            for b in &handles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        for (i, h) in handles.iter().enumerate() {
            assert_eq!(table.lookup(*h), Some(&i));
        }
    }

    #[test]
    fn test_handles_never_reused() {
        let mut table = HandleTable::new();
        let h1 = table.add("one");
        table.remove(h1);
        let h2 = table.add("two");
        assert_ne!(h1, h2);
        assert_eq!(table.lookup(h1), None);
        assert_eq!(table.lookup(h2), Some(&"two"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut table = HandleTable::new();
        let h = table.add("item");
        assert_eq!(table.remove(h), Some("item"));
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_order_survives_deletions() {
        let mut table = HandleTable::new();
        let a = table.add("a");
        let b = table.add("b");
        let c = table.add("c");
        table.remove(b);
        assert_eq!(table.list(), vec![&"a", &"c"]);
        let _ = (a, c);

        let d = table.add("b2");
        assert_eq!(table.list(), vec![&"a", &"c", &"b2"]);
        let _ = d;
    }

    #[test]
    fn test_add_to_front() {
        let mut table = HandleTable::new();
        table.add("middle");
        table.add_all_to_front(["second", "first"]);
        assert_eq!(table.list(), vec![&"first", &"second", &"middle"]);
    }

    #[test]
    fn test_for_each_passes_live_index() {
        let mut table = HandleTable::new();
        let _a = table.add("a");
        let b = table.add("b");
        let _c = table.add("c");
        table.remove(b);

        let mut seen = Vec::new();
        table.for_each(|item, _h, idx| seen.push((*item, idx)));
        assert_eq!(seen, vec![("a", 0), ("c", 1)]);
    }

    #[test]
    fn test_lookup_many_marks_missing() {
        let mut table = HandleTable::new();
        let a = table.add(1);
        let b = table.add(2);
        table.remove(a);
        let found = table.lookup_many(&[a, b]);
        assert_eq!(found, vec![None, Some(&2)]);
    }

    #[test]
    fn test_remove_many_skips_absent() {
        let mut table = HandleTable::new();
        let a = table.add(1);
        let b = table.add(2);
        table.remove(a);
        assert_eq!(table.remove_many(&[a, b]), vec![2]);
    }

    #[test]
    fn test_order_helpers() {
        let mut table = HandleTable::new();
        table.add_all(["x", "y", "z"]);
        assert_eq!(table.lookup_by_order(1), Some(&"y"));
        assert_eq!(table.remove_by_order(1), Some("y"));
        assert_eq!(table.lookup_by_order(1), Some(&"z"));
        assert_eq!(table.reverse_list(), vec![&"z", &"x"]);
    }

    #[test]
    fn test_replace_keeps_order_and_handle() {
        let mut table = HandleTable::new();
        let a = table.add("a");
        let b = table.add("b");
        assert_eq!(table.replace(a, "a2"), Ok("a"));
        assert_eq!(table.list(), vec![&"a2", &"b"]);

        table.remove(b);
        assert_eq!(table.replace(b, "b2"), Err("b2"));
    }

    #[test]
    fn test_mutation_during_walk_via_snapshot() {
        let mut table = HandleTable::new();
        table.add_all([1, 2, 3, 4]);
        for h in table.handles() {
            if table.lookup(h).is_some_and(|v| v % 2 == 0) {
                table.remove(h);
            }
        }
        assert_eq!(table.list(), vec![&1, &3]);
    }

    #[test]
    fn test_clear() {
        let mut table = HandleTable::new();
        let h = table.add("x");
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.lookup(h), None);
        let h2 = table.add("y");
        assert_ne!(h, h2);
    }
}
