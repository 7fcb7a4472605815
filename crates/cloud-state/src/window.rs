//! Fixed-capacity buffer for streaming points

use std::collections::VecDeque;

/// Keeps the most recent `capacity` items in insertion order.
///
/// Pushing past capacity drops the oldest item. A capacity of 0 behaves as 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, returning the one evicted to make room
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Oldest-first copy of the buffer
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self::new(crate::DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent_in_order() {
        let mut window = SlidingWindow::new(20);
        for i in 0..25 {
            window.push(i);
        }
        assert_eq!(window.len(), 20);
        assert_eq!(window.to_vec(), (5..25).collect::<Vec<_>>());
        assert_eq!(window.latest(), Some(&24));
    }

    #[test]
    fn test_push_reports_eviction() {
        let mut window = SlidingWindow::new(2);
        assert_eq!(window.push('a'), None);
        assert_eq!(window.push('b'), None);
        assert!(window.is_full());
        assert_eq!(window.push('c'), Some('a'));
    }

    #[test]
    fn test_zero_capacity_behaves_as_one() {
        let mut window = SlidingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        window.push(1);
        window.push(2);
        assert_eq!(window.to_vec(), vec![2]);
    }

    #[test]
    fn test_clear() {
        let mut window: SlidingWindow<u8> = SlidingWindow::default();
        window.push(1);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 20);
    }
}
