use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::message::MessageDescription;

/// In-memory CAN database: arbitration ID → message layout.
///
/// Keys are unique; adding a message under an already-present ID replaces
/// the previous entry. Iteration order is unspecified; the database is a
/// pure lookup structure for the codec.
///
/// The database is read-mostly state: the codec only ever takes shared
/// references, mutation happens through explicit add/remove/merge calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    messages: HashMap<u32, MessageDescription>,
}

impl Database {
    /// Adds a message layout, replacing any previous entry with the same ID.
    ///
    /// Returns the replaced entry, if any.
    pub fn add_message(&mut self, msg: MessageDescription) -> Option<MessageDescription> {
        self.messages.insert(msg.id, msg)
    }

    /// Removes and returns the layout registered under `id`.
    pub fn remove_message(&mut self, id: u32) -> Option<MessageDescription> {
        self.messages.remove(&id)
    }

    /// Looks up the layout for a CAN ID.
    pub fn get_message_by_id(&self, id: u32) -> Option<&MessageDescription> {
        self.messages.get(&id)
    }

    /// Mutable lookup, for editing an existing layout in place.
    pub fn get_message_by_id_mut(&mut self, id: u32) -> Option<&mut MessageDescription> {
        self.messages.get_mut(&id)
    }

    /// Number of registered messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over all registered messages (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = &MessageDescription> {
        self.messages.values()
    }

    /// Moves every entry of `other` into `self`, replacing on ID collision.
    ///
    /// Used by import so a freshly parsed file overlays the live database.
    pub fn merge(&mut self, other: Database) {
        self.messages.extend(other.messages);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
