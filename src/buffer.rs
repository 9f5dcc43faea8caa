//! Bounded, id-indexed history of decoded messages.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::types::decoded::DecodedMessage;

/// Retains the most recent `capacity` decoded messages in arrival order,
/// with a secondary index grouping them by arbitration ID.
///
/// Insertion at capacity evicts exactly the single oldest element, from
/// both the arrival sequence and the front of its ID bucket, so the index
/// never references an evicted element. Elements are shared via [`Arc`]:
/// the message itself is freed once the buffer and every consumer
/// snapshot have released it.
///
/// The buffer performs no locking itself. When shared between a bus
/// reader and consumers, serialize every call through one exclusive lock
/// around the whole buffer; [`Session`](crate::session::Session) does
/// exactly that.
#[derive(Debug)]
pub struct MessageBuffer {
    /// Arrival-ordered sequence, oldest first.
    messages: VecDeque<Arc<DecodedMessage>>,
    /// ID → arrival-ordered subsequence of `messages`.
    by_id: HashMap<u32, VecDeque<Arc<DecodedMessage>>>,
    /// Maximum element count.
    capacity: usize,
}

impl MessageBuffer {
    pub fn new(capacity: usize) -> Self {
        MessageBuffer {
            messages: VecDeque::with_capacity(capacity),
            by_id: HashMap::new(),
            capacity,
        }
    }

    /// Stores a decoded message, evicting the oldest element first when
    /// the buffer is full. Returns the shared handle to the stored entry.
    pub fn insert(&mut self, message: DecodedMessage) -> Arc<DecodedMessage> {
        if self.capacity == 0 {
            // A zero-capacity buffer stores nothing but still hands the
            // caller its message back.
            return Arc::new(message);
        }
        if self.messages.len() == self.capacity {
            self.pop_oldest();
        }

        let entry = Arc::new(message);
        self.messages.push_back(Arc::clone(&entry));
        self.by_id
            .entry(entry.id())
            .or_default()
            .push_back(Arc::clone(&entry));
        entry
    }

    /// Removes the oldest element from the sequence and from the front of
    /// its ID bucket.
    fn pop_oldest(&mut self) {
        let Some(oldest) = self.messages.pop_front() else {
            return;
        };
        if let Some(bucket) = self.by_id.get_mut(&oldest.id()) {
            let front = bucket.pop_front();
            debug_assert!(front.is_some_and(|f| Arc::ptr_eq(&f, &oldest)));
            if bucket.is_empty() {
                self.by_id.remove(&oldest.id());
            }
        }
    }

    /// Changes the maximum element count.
    ///
    /// Shrinking below the current size evicts oldest-first until within
    /// bound; growing never evicts.
    pub fn set_capacity(&mut self, capacity: usize) {
        while self.messages.len() > capacity {
            self.pop_oldest();
        }
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates all stored messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DecodedMessage>> {
        self.messages.iter()
    }

    /// Iterates the stored history of one arbitration ID, oldest first.
    pub fn of_id(&self, id: u32) -> impl Iterator<Item = &Arc<DecodedMessage>> {
        self.by_id.get(&id).into_iter().flatten()
    }

    /// Drops every stored message.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.by_id.clear();
    }

    #[cfg(test)]
    fn index_len(&self) -> usize {
        self.by_id.values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::frame::CanFrame;

    fn msg(id: u32, marker: u8) -> DecodedMessage {
        DecodedMessage::undecoded(CanFrame::new(id, vec![marker]))
    }

    #[test]
    fn test_insert_at_capacity_evicts_single_oldest() {
        let mut buf = MessageBuffer::new(3);
        buf.insert(msg(0x10, 0));
        buf.insert(msg(0x20, 1));
        buf.insert(msg(0x10, 2));
        assert_eq!(buf.len(), 3);

        buf.insert(msg(0x30, 3));
        assert_eq!(buf.len(), 3);

        // Oldest (id 0x10, marker 0) is gone from both views.
        let order: Vec<u8> = buf.iter().map(|m| m.frame.data[0]).collect();
        assert_eq!(order, vec![1, 2, 3]);
        let of_10: Vec<u8> = buf.of_id(0x10).map(|m| m.frame.data[0]).collect();
        assert_eq!(of_10, vec![2]);

        // Index references exactly the stored elements.
        assert_eq!(buf.index_len(), buf.len());
    }

    #[test]
    fn test_of_id_preserves_arrival_order() {
        let mut buf = MessageBuffer::new(10);
        for marker in 0..5u8 {
            buf.insert(msg(0x42, marker));
            buf.insert(msg(0x43, marker + 100));
        }
        let history: Vec<u8> = buf.of_id(0x42).map(|m| m.frame.data[0]).collect();
        assert_eq!(history, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_of_id_unknown_is_empty() {
        let buf = MessageBuffer::new(4);
        assert_eq!(buf.of_id(0x999).count(), 0);
    }

    #[test]
    fn test_shrink_evicts_oldest_first_without_reordering() {
        let mut buf = MessageBuffer::new(5);
        for marker in 0..5u8 {
            buf.insert(msg(marker as u32, marker));
        }

        buf.set_capacity(2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.capacity(), 2);
        let order: Vec<u8> = buf.iter().map(|m| m.frame.data[0]).collect();
        assert_eq!(order, vec![3, 4]);
        assert_eq!(buf.index_len(), 2);
    }

    #[test]
    fn test_grow_never_evicts() {
        let mut buf = MessageBuffer::new(2);
        buf.insert(msg(1, 0));
        buf.insert(msg(2, 1));
        buf.set_capacity(10);
        assert_eq!(buf.len(), 2);
        buf.insert(msg(3, 2));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_eviction_removes_empty_bucket() {
        let mut buf = MessageBuffer::new(1);
        buf.insert(msg(0x10, 0));
        buf.insert(msg(0x20, 1));
        assert_eq!(buf.of_id(0x10).count(), 0);
        assert!(!buf.by_id.contains_key(&0x10));
    }

    #[test]
    fn test_clear() {
        let mut buf = MessageBuffer::new(4);
        buf.insert(msg(1, 0));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.of_id(1).count(), 0);
        // Capacity is a configuration, not content.
        assert_eq!(buf.capacity(), 4);
    }
}
