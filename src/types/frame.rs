use serde::{Deserialize, Serialize};

/// One raw CAN frame as delivered by the transport.
///
/// `flags`, `origin` and `timestamp` are opaque passthrough from the
/// adapter driver (loopback/error flags, adapter object id, device clock);
/// the core never interprets them. The payload holds at most 8 bytes for
/// classic CAN.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanFrame {
    /// Protocol flags from the transport (opaque).
    pub flags: u32,
    /// Origin tag from the transport (opaque).
    pub origin: u32,
    /// CAN arbitration ID.
    pub id: u32,
    /// Payload bytes (0..=8).
    pub data: Vec<u8>,
    /// Arrival timestamp from the transport clock (opaque).
    pub timestamp: u64,
}

impl CanFrame {
    /// Builds a plain data frame with zeroed transport metadata.
    pub fn new(id: u32, data: Vec<u8>) -> Self {
        CanFrame {
            flags: 0,
            origin: 0,
            id,
            data,
            timestamp: 0,
        }
    }

    /// Payload length in bytes.
    pub fn dlc(&self) -> u8 {
        self.data.len() as u8
    }
}
