//! Bucket priority queue used by distance propagation.
//!
//! Items are grouped in FIFO buckets keyed by priority inside an ordered map,
//! so the minimum bucket is always the first entry and ties leave in insertion
//! order. There is no decrease-key: callers re-enqueue on improvement and
//! discard stale entries with their own visited check when they come back out.

use std::collections::{BTreeMap, VecDeque};

use ordered_float::OrderedFloat;

use crate::error::{CoreError, ErrorSeverity};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueError {
    #[error("dequeue called on an empty priority queue")]
    Empty,
}

impl CoreError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            QueueError::Empty => "QUEUE_EMPTY",
        }
    }
}

/// Min-priority queue keyed by `f32`, FIFO within equal priority.
#[derive(Clone, Debug)]
pub struct BucketQueue<T> {
    buckets: BTreeMap<OrderedFloat<f32>, VecDeque<T>>,
    len: usize,
}

impl<T> BucketQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Appends `item` to the bucket for `priority`.
    ///
    /// NaN priorities sort after every finite value.
    pub fn enqueue(&mut self, item: T, priority: f32) {
        self.buckets
            .entry(OrderedFloat(priority))
            .or_default()
            .push_back(item);
        self.len += 1;
    }

    /// Removes the oldest item of the lowest-priority bucket.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        let mut bucket = self.buckets.first_entry().ok_or(QueueError::Empty)?;
        let item = bucket.get_mut().pop_front().ok_or(QueueError::Empty)?;
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.len -= 1;
        Ok(item)
    }

    /// Priority of the item [`BucketQueue::dequeue`] would return next.
    pub fn peek_priority(&self) -> Option<f32> {
        self.buckets.keys().next().map(|key| key.into_inner())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

impl<T> Default for BucketQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_round_trip() {
        let mut queue = BucketQueue::new();
        queue.enqueue("only", 4.5);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), Ok("only"));
        assert!(queue.is_empty());
    }

    #[test]
    fn dequeues_in_priority_order() {
        let mut queue = BucketQueue::new();
        queue.enqueue(3, 3.0);
        queue.enqueue(1, 1.0);
        queue.enqueue(2, 2.0);

        let order: Vec<_> = (0..3).map(|_| queue.dequeue().unwrap()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn equal_priorities_leave_in_insertion_order() {
        let mut queue = BucketQueue::new();
        queue.enqueue('a', 1.0);
        queue.enqueue('b', 0.0);
        queue.enqueue('c', 1.0);
        queue.enqueue('d', 1.0);

        assert_eq!(queue.dequeue(), Ok('b'));
        assert_eq!(queue.dequeue(), Ok('a'));
        assert_eq!(queue.dequeue(), Ok('c'));
        assert_eq!(queue.dequeue(), Ok('d'));
    }

    #[test]
    fn empty_dequeue_is_an_error() {
        let mut queue: BucketQueue<u8> = BucketQueue::new();
        let err = queue.dequeue().unwrap_err();
        assert_eq!(err, QueueError::Empty);
        assert_eq!(err.error_code(), "QUEUE_EMPTY");
        assert!(err.severity().is_internal());
    }

    #[test]
    fn count_tracks_items_across_buckets() {
        let mut queue = BucketQueue::new();
        queue.enqueue(1, 2.0);
        queue.enqueue(2, 2.0);
        queue.enqueue(3, 7.0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek_priority(), Some(2.0));

        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_priority(), Some(7.0));

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_priority(), None);
    }
}
