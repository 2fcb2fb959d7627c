mod entry;
mod heap_sort;
mod priority_heap;
mod running_median;

pub use entry::Entry;
pub use heap_sort::{heap_sort, heap_sorted};
pub use priority_heap::{MaxFirst, MaxHeap, MinFirst, MinHeap, Order, PriorityHeap};
pub use running_median::{running_median, RunningMedian};

pub use ordered_float::OrderedFloat;
