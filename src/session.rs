//! Top-level owner of the monitor's shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use log::{debug, error};

use crate::buffer::MessageBuffer;
use crate::codec;
use crate::dbc::{self, ParseReport};
use crate::types::database::Database;
use crate::types::decoded::DecodedMessage;
use crate::types::frame::CanFrame;
use crate::types::message::MessageDescription;

/// A monitoring session: the signal database, the bounded message
/// history, and the pause flag, owned in one place instead of living as
/// process globals.
///
/// The intended shape is one producer thread polling the transport and
/// calling [`push_frame`](Session::push_frame), with any number of
/// consumer threads reading snapshots. The buffer sits behind a single
/// coarse mutex (contention is irrelevant at CAN frame rates) and the
/// database behind a read/write lock so an import at runtime cannot race
/// an active decode.
#[derive(Debug)]
pub struct Session {
    database: RwLock<Database>,
    buffer: Mutex<MessageBuffer>,
    paused: AtomicBool,
}

impl Session {
    /// Creates a session retaining at most `capacity` decoded messages.
    pub fn new(capacity: usize) -> Self {
        Session {
            database: RwLock::new(Database::default()),
            buffer: Mutex::new(MessageBuffer::new(capacity)),
            paused: AtomicBool::new(false),
        }
    }

    // ---- Database management ----

    /// Imports a `.dbc` file into the live database, replacing entries
    /// that share an ID with the file's.
    ///
    /// Fails softly: a file that cannot be opened or read is logged and
    /// leaves the database untouched, returning an empty report. Skipped
    /// lines inside a readable file are counted in the report.
    pub fn import_dbc(&self, path: &str) -> ParseReport {
        match dbc::from_file(path) {
            Ok((parsed, report)) => {
                self.database
                    .write()
                    .expect("database lock poisoned")
                    .merge(parsed);
                debug!(
                    "imported '{path}': {} messages, {} signals, {} skipped",
                    report.messages, report.signals, report.skipped
                );
                report
            }
            Err(err) => {
                error!("DBC import failed: {err}");
                ParseReport::default()
            }
        }
    }

    /// Registers one message layout, replacing any entry with the same ID.
    pub fn add_message(&self, msg: MessageDescription) {
        self.database
            .write()
            .expect("database lock poisoned")
            .add_message(msg);
    }

    /// Unregisters the layout for `id`, returning it if present.
    pub fn remove_message(&self, id: u32) -> Option<MessageDescription> {
        self.database
            .write()
            .expect("database lock poisoned")
            .remove_message(id)
    }

    /// Returns a copy of the layout registered for `id`.
    pub fn message(&self, id: u32) -> Option<MessageDescription> {
        self.database
            .read()
            .expect("database lock poisoned")
            .get_message_by_id(id)
            .cloned()
    }

    /// Number of registered message layouts.
    pub fn database_len(&self) -> usize {
        self.database.read().expect("database lock poisoned").len()
    }

    // ---- Frame ingress ----

    /// Decodes and stores one raw frame.
    ///
    /// Decoding happens here, once, against the layout registered for the
    /// frame's ID at this moment; a frame with no layout is stored with an
    /// empty signal map. Returns the stored entry, or `None` while the
    /// session is paused (the frame is dropped, not queued).
    pub fn push_frame(&self, frame: CanFrame) -> Option<Arc<DecodedMessage>> {
        if self.paused.load(Ordering::Relaxed) {
            return None;
        }

        let decoded = {
            let db = self.database.read().expect("database lock poisoned");
            codec::decode_with_database(frame, &db)
        };

        let mut buffer = self.buffer.lock().expect("buffer lock poisoned");
        Some(buffer.insert(decoded))
    }

    // ---- Consumer queries ----

    /// Snapshot of every stored message, oldest first.
    ///
    /// Clones the shared handles so the buffer lock is released before
    /// the caller iterates.
    pub fn messages(&self) -> Vec<Arc<DecodedMessage>> {
        let buffer = self.buffer.lock().expect("buffer lock poisoned");
        buffer.iter().cloned().collect()
    }

    /// Snapshot of the stored history for one arbitration ID, oldest
    /// first. Used to drive per-message plots without rescanning the
    /// whole history.
    pub fn history_of(&self, id: u32) -> Vec<Arc<DecodedMessage>> {
        let buffer = self.buffer.lock().expect("buffer lock poisoned");
        buffer.of_id(id).cloned().collect()
    }

    /// Number of currently stored messages.
    pub fn stored_len(&self) -> usize {
        self.buffer.lock().expect("buffer lock poisoned").len()
    }

    /// Maximum number of retained messages.
    pub fn capacity(&self) -> usize {
        self.buffer.lock().expect("buffer lock poisoned").capacity()
    }

    /// Changes the retention bound; shrinking evicts oldest-first.
    pub fn set_capacity(&self, capacity: usize) {
        self.buffer
            .lock()
            .expect("buffer lock poisoned")
            .set_capacity(capacity);
    }

    /// Drops all stored history.
    pub fn clear_history(&self) {
        self.buffer.lock().expect("buffer lock poisoned").clear();
    }

    // ---- Pause control ----

    /// Stops storing incoming frames until [`resume`](Session::resume).
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }
}
