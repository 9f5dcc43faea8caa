use crate::types::message::MessageDescription;

const CAN_EFF_MASK: u32 = 0x1FFF_FFFF; // 29 bit

/// Decodes a `BO_` message-declaration line.
///
/// Format: `BO_ <ID> <MESSAGE_NAME>: <BYTE_LENGTH> <SENDER_NODE>`
///
/// Returns `None` when the line is too short or the numeric fields do not
/// parse; the caller skips such lines. IDs carrying the SocketCAN-style
/// extended flag are masked down to their 29-bit value.
pub(crate) fn decode(line: &str) -> Option<MessageDescription> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 5 {
        return None;
    }

    let id: u32 = parts[1].parse::<u32>().ok()? & CAN_EFF_MASK;
    let name: String = parts[2].trim_end_matches(':').to_string();
    let byte_length: u8 = parts[3].parse::<u8>().ok()?;
    let sender: String = parts[4].to_string();

    Some(MessageDescription {
        id,
        name,
        byte_length,
        sender,
        signals: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let msg = decode("BO_ 960 Key_Status: 4 BCM").unwrap();
        assert_eq!(msg.id, 960);
        assert_eq!(msg.name, "Key_Status");
        assert_eq!(msg.byte_length, 4);
        assert_eq!(msg.sender, "BCM");
        assert!(msg.signals.is_empty());
    }

    #[test]
    fn test_extended_flag_masked() {
        let msg = decode("BO_ 2566856118 Gateway_01: 8 GW").unwrap();
        assert_eq!(msg.id, 2566856118 & CAN_EFF_MASK);
    }

    #[test]
    fn test_short_or_non_numeric_line_rejected() {
        assert!(decode("BO_ 960 Key_Status:").is_none());
        assert!(decode("BO_ abc Key_Status: 4 BCM").is_none());
    }
}
