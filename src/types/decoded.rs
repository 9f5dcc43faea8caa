use std::collections::HashMap;

use serde::Serialize;

use crate::types::frame::CanFrame;
use crate::types::value::SignalValue;

/// A raw frame together with its decoded signal values.
///
/// Built once, at the moment the frame enters the history buffer, and
/// immutable afterwards. A frame whose ID has no database entry still gets
/// stored, just with an empty signal map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    /// The frame as received on the wire.
    pub frame: CanFrame,
    /// Signal name → decoded value. Empty when no layout was registered
    /// for `frame.id` at decode time.
    pub signals: HashMap<String, SignalValue>,
}

impl DecodedMessage {
    pub fn new(frame: CanFrame, signals: HashMap<String, SignalValue>) -> Self {
        DecodedMessage { frame, signals }
    }

    /// A frame stored without any decoded values.
    pub fn undecoded(frame: CanFrame) -> Self {
        DecodedMessage {
            frame,
            signals: HashMap::new(),
        }
    }

    /// Arbitration ID of the underlying frame.
    pub fn id(&self) -> u32 {
        self.frame.id
    }

    /// Looks up one decoded value by signal name.
    pub fn signal(&self, name: &str) -> Option<&SignalValue> {
        self.signals.get(name)
    }
}
