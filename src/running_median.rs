use std::cmp::Ordering;

use log::trace;
use num_traits::ToPrimitive;

use crate::priority_heap::{MaxHeap, MinHeap};

/// Median of a stream, kept as two heap partitions.
///
/// `low` holds the smaller half with its greatest value on top, `high` the
/// larger half with its least value on top. Their sizes never differ by more
/// than one and every value in `low` is at most every value in `high`.
///
/// Any totally ordered primitive number works, integers of every width
/// included. Floats are not `Ord`; wrap them in [`OrderedFloat`] first.
/// Medians are reported as `f64`, and a value with no `f64` representation
/// reports as NaN.
///
/// [`OrderedFloat`]: ordered_float::OrderedFloat
#[derive(Debug, Clone)]
pub struct RunningMedian<T> {
    low: MaxHeap<T, T>,
    high: MinHeap<T, T>,
}

impl<T: Ord + Copy + ToPrimitive> RunningMedian<T> {
    pub fn new() -> Self {
        RunningMedian {
            low: MaxHeap::new(),
            high: MinHeap::new(),
        }
    }

    /// Absorbs `value` and returns the median of everything seen so far.
    pub fn insert(&mut self, value: T) -> f64 {
        match (self.low.is_empty(), self.high.top().copied()) {
            (true, _) => self.low.push(value, value),
            (false, None) => {
                self.low.push(value, value);
                self.shift_low_to_high();
            }
            (false, Some(boundary)) => {
                if value > boundary {
                    self.high.push(value, value);
                } else {
                    self.low.push(value, value);
                }
                self.rebalance();
            }
        }
        self.current()
    }

    /// Average of both tops when the halves are equal in size, otherwise the
    /// top of the larger half.
    pub fn median(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.current())
        }
    }

    pub fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }

    fn current(&self) -> f64 {
        let low = self.low.top().map_or(f64::NAN, as_f64);
        let high = self.high.top().map_or(f64::NAN, as_f64);
        match self.low.len().cmp(&self.high.len()) {
            Ordering::Greater => low,
            Ordering::Less => high,
            Ordering::Equal => (low + high) / 2.0,
        }
    }

    fn rebalance(&mut self) {
        if self.high.len() > self.low.len() + 1 {
            self.shift_high_to_low();
            trace!(
                "running_median: high overflowed, sizes now {}/{}",
                self.low.len(),
                self.high.len()
            );
        } else if self.low.len() > self.high.len() + 1 {
            self.shift_low_to_high();
            trace!(
                "running_median: low overflowed, sizes now {}/{}",
                self.low.len(),
                self.high.len()
            );
        }
    }

    fn shift_low_to_high(&mut self) {
        if let Some(entry) = self.low.pop() {
            let (key, _) = entry.into_parts();
            self.high.push(key, key);
        }
    }

    fn shift_high_to_low(&mut self) {
        if let Some(entry) = self.high.pop() {
            let (key, _) = entry.into_parts();
            self.low.push(key, key);
        }
    }
}

fn as_f64<T: ToPrimitive>(value: &T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

impl<T: Ord + Copy + ToPrimitive> Default for RunningMedian<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Median of every prefix of `values`, one per element.
pub fn running_median<T: Ord + Copy + ToPrimitive>(values: &[T]) -> Vec<f64> {
    let mut tracker = RunningMedian::new();
    values.iter().map(|&v| tracker.insert(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn is_balanced<T: Ord + Copy + ToPrimitive>(tracker: &RunningMedian<T>) -> bool {
        let (low, high) = (tracker.low.len(), tracker.high.len());
        low.abs_diff(high) <= 1
    }

    fn is_partitioned<T: Ord + Copy + ToPrimitive>(tracker: &RunningMedian<T>) -> bool {
        let low_max = tracker.low.as_slice().iter().map(|e| *e.key()).max();
        let high_min = tracker.high.as_slice().iter().map(|e| *e.key()).min();
        match (low_max, high_min) {
            (Some(l), Some(h)) => l <= h,
            _ => true,
        }
    }

    fn brute_force_median(prefix: &[i32]) -> f64 {
        let mut sorted = prefix.to_vec();
        sorted.sort();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
        } else {
            f64::from(sorted[mid])
        }
    }

    #[test]
    fn stream_example() {
        assert_eq!(running_median(&[5, 15, 1, 3]), vec![5.0, 10.0, 5.0, 4.0]);
    }

    #[test]
    fn stream_example_with_wide_integers() {
        assert_eq!(running_median(&[5i64, 15, 1, 3]), vec![5.0, 10.0, 5.0, 4.0]);
        assert_eq!(running_median(&[5u64, 15, 1, 3]), vec![5.0, 10.0, 5.0, 4.0]);
        assert_eq!(running_median(&[10usize, 20, 30]), vec![10.0, 15.0, 20.0]);
        assert_eq!(running_median(&[10u128, 20, 30]), vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn integers_wider_than_i32() {
        let big = 1i64 << 40;
        assert_eq!(
            running_median(&[big, big + 2]),
            vec![big as f64, (big + 1) as f64]
        );
    }

    #[test]
    fn ordered_floats() {
        let values = [1.5, 2.5, 0.5, -4.0].map(OrderedFloat);
        assert_eq!(running_median(&values), vec![1.5, 2.0, 1.5, 1.0]);
    }

    #[test]
    fn float_stream_example() {
        let values = [5.0, 15.0, 1.0, 3.0].map(OrderedFloat);
        assert_eq!(running_median(&values), vec![5.0, 10.0, 5.0, 4.0]);
    }

    #[test]
    fn insert_reports_same_value_as_median() {
        let mut tracker = RunningMedian::new();
        for v in [7, -2, 9, 9, 0, 4] {
            let reported = tracker.insert(v);
            assert_eq!(tracker.median(), Some(reported));
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        let values: [i32; 0] = [];
        assert!(running_median(&values).is_empty());
    }

    #[test]
    fn single_value_is_its_own_median() {
        assert_eq!(running_median(&[-7]), vec![-7.0]);
    }

    #[test]
    fn second_value_lower_than_first() {
        let mut tracker = RunningMedian::new();
        tracker.insert(10);
        assert_eq!(tracker.insert(4), 7.0);
        assert_eq!(tracker.low.top(), Some(&4));
        assert_eq!(tracker.high.top(), Some(&10));
    }

    #[test]
    fn even_count_averages_to_fraction() {
        assert_eq!(running_median(&[1, 2]), vec![1.0, 1.5]);
    }

    #[test]
    fn duplicates() {
        assert_eq!(
            running_median(&[3, 3, 3, 3, 3]),
            vec![3.0, 3.0, 3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn ascending_stream() {
        assert_eq!(
            running_median(&[1u8, 2, 3, 4, 5, 6]),
            vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5]
        );
    }

    #[test]
    fn descending_stream() {
        assert_eq!(
            running_median(&[6u32, 5, 4, 3, 2, 1]),
            vec![6.0, 5.5, 5.0, 4.5, 4.0, 3.5]
        );
    }

    #[test]
    fn median_on_empty_tracker() {
        let tracker: RunningMedian<i32> = RunningMedian::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.median(), None);
    }

    #[test]
    fn len_counts_both_halves() {
        let mut tracker = RunningMedian::new();
        for v in [4, 8, 15, 16, 23, 42] {
            tracker.insert(v);
        }
        assert_eq!(tracker.len(), 6);
        assert_eq!(tracker.median(), Some(15.5));
    }

    #[test]
    fn random_streams_stay_balanced_and_partitioned() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let n = rng.random_range(1..200);
            let values: Vec<i32> = (0..n).map(|_| rng.random_range(-30..30)).collect();

            let mut tracker = RunningMedian::new();
            for (i, &v) in values.iter().enumerate() {
                let median = tracker.insert(v);
                assert!(is_balanced(&tracker));
                assert!(is_partitioned(&tracker));
                assert_eq!(tracker.len(), i + 1);
                assert_eq!(median, brute_force_median(&values[..=i]));
            }
        }
    }
}
