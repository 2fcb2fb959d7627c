use log::trace;

use crate::priority_heap::MaxHeap;

/// Sorts `values` into ascending order, reusing its storage.
///
/// Every value moves into a max-first heap as `(v, v)`, then the heap is
/// drained from the greatest entry down; the popped keys refill `values`,
/// which is then reversed. Not stable.
pub fn heap_sort<T: Ord + Clone>(values: &mut Vec<T>) {
    trace!("heap_sort: sorting {} values", values.len());

    let mut heap = MaxHeap::with_capacity(values.len());
    for value in values.drain(..) {
        heap.push(value.clone(), value);
    }

    while let Some(entry) = heap.pop() {
        values.push(entry.into_parts().0);
    }
    values.reverse();

    trace!("heap_sort: done, {} values", values.len());
}

/// By-value form of [`heap_sort`].
pub fn heap_sorted<T: Ord + Clone>(mut values: Vec<T>) -> Vec<T> {
    heap_sort(&mut values);
    values
}
