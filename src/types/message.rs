use serde::{Deserialize, Serialize};

use crate::types::signal::SignalDescription;

/// Layout of one CAN message as defined in the database.
///
/// `name` and `sender` are descriptive metadata; decoding only looks at
/// `byte_length` and the signal list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageDescription {
    /// CAN arbitration ID (up to 29 bits for extended frames).
    pub id: u32,
    /// Message name.
    pub name: String,
    /// Declared payload length in bytes (0..=8 for classic CAN).
    pub byte_length: u8,
    /// Sender node.
    pub sender: String,
    /// Signals packed into this message, in declaration order.
    pub signals: Vec<SignalDescription>,
}

impl MessageDescription {
    /// Looks up a signal by name.
    pub fn signal(&self, name: &str) -> Option<&SignalDescription> {
        self.signals.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_lookup() {
        let msg = MessageDescription {
            id: 0x123,
            name: "Powertrain".to_string(),
            byte_length: 8,
            sender: "ECM".to_string(),
            signals: vec![
                SignalDescription {
                    name: "EngineSpeed".to_string(),
                    ..Default::default()
                },
                SignalDescription {
                    name: "ThrottlePos".to_string(),
                    ..Default::default()
                },
            ],
        };

        assert!(msg.signal("ThrottlePos").is_some());
        assert!(msg.signal("CoolantTemp").is_none());
    }
}
