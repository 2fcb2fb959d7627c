use std::fmt;
use std::marker::PhantomData;

use crate::entry::Entry;

/// Ordering direction of a [`PriorityHeap`].
///
/// Chosen once, as a type parameter, so percolation and child selection
/// never branch on a runtime flag.
pub trait Order {
    const IS_MIN: bool;

    /// True when `a` belongs strictly closer to the root than `b`.
    fn precedes<T: Ord>(a: &T, b: &T) -> bool;

    /// True when the right child dominates the left one.
    ///
    /// The right child wins when it precedes the left child *or* the two are
    /// equal. Equal siblings therefore always resolve to the right index,
    /// which is observable in the pop order of equal entries.
    fn prefers_right<T: Ord>(left: &T, right: &T) -> bool {
        !Self::precedes(left, right)
    }
}

/// Smallest entry at the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinFirst;

/// Greatest entry at the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxFirst;

impl Order for MinFirst {
    const IS_MIN: bool = true;

    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a < b
    }
}

impl Order for MaxFirst {
    const IS_MIN: bool = false;

    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a > b
    }
}

pub type MinHeap<K, V> = PriorityHeap<K, V, MinFirst>;
pub type MaxHeap<K, V> = PriorityHeap<K, V, MaxFirst>;

/// Array-backed binary heap of [`Entry`] values.
///
/// Node `i` has children `2i + 1` and `2i + 2`. For every non-root node the
/// parent never comes after it under `O`.
pub struct PriorityHeap<K, V, O = MinFirst> {
    data: Vec<Entry<K, V>>,
    order: PhantomData<O>,
}

impl<K: Ord, V: Ord, O: Order> PriorityHeap<K, V, O> {
    pub fn new() -> Self {
        PriorityHeap {
            data: Vec::new(),
            order: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityHeap {
            data: Vec::with_capacity(capacity),
            order: PhantomData,
        }
    }

    pub fn is_min(&self) -> bool {
        O::IS_MIN
    }

    pub fn push(&mut self, key: K, value: V) {
        self.data.push(Entry::new(key, value));
        self.percolate_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<Entry<K, V>> {
        let last = self.data.len().checked_sub(1)?;
        self.data.swap(0, last);
        let root = self.data.pop();
        self.percolate_down(0);
        root
    }

    /// Payload of the root entry; the key is reachable through [`peek`](Self::peek).
    pub fn top(&self) -> Option<&V> {
        self.data.first().map(Entry::value)
    }

    pub fn peek(&self) -> Option<&Entry<K, V>> {
        self.data.first()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[Entry<K, V>] {
        &self.data
    }

    fn percolate_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if O::precedes(&self.data[idx], &self.data[parent]) {
                self.data.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn percolate_down(&mut self, mut idx: usize) {
        while let Some(child) = self.dominant_child(idx) {
            if O::precedes(&self.data[child], &self.data[idx]) {
                self.data.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }

    fn dominant_child(&self, idx: usize) -> Option<usize> {
        let left = 2 * idx + 1;
        if left >= self.data.len() {
            return None;
        }
        let right = left + 1;
        if right < self.data.len() && O::prefers_right(&self.data[left], &self.data[right]) {
            Some(right)
        } else {
            Some(left)
        }
    }
}

impl<K: Ord, V: Ord, O: Order> Default for PriorityHeap<K, V, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, O> Clone for PriorityHeap<K, V, O> {
    fn clone(&self) -> Self {
        PriorityHeap {
            data: self.data.clone(),
            order: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O: Order> fmt::Debug for PriorityHeap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityHeap")
            .field("is_min", &O::IS_MIN)
            .field("data", &self.data)
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, O> fmt::Display for PriorityHeap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl<K: Ord, V: Ord, O: Order> FromIterator<(K, V)> for PriorityHeap<K, V, O> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = PriorityHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord, V: Ord, O: Order> Extend<(K, V)> for PriorityHeap<K, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}
