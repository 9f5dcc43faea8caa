use crate::types::signal::{ByteOrder, SignalDescription};

/// Why an `SG_` line could not be turned into a [`SignalDescription`].
///
/// Each variant names the sub-field that failed; the parser skips the
/// signal, logs the reason, and keeps going with the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalLineError {
    MissingName,
    BadBitSpec,
    BadScaling,
    BadRange,
}

/// Decodes an `SG_` signal-declaration line.
///
/// Format:
/// `SG_ <name> : <bit_start>|<bit_length>@<endian><sign> (<scale>,<offset>) [<min>|<max>] "<unit>" <receiver>`
///
/// Every sub-field up to the range is mandatory and must parse; a missing
/// delimiter or non-numeric field fails the whole signal rather than
/// defaulting it.
pub(crate) fn decode(line: &str) -> Result<SignalDescription, SignalLineError> {
    let line: &str = line.trim_start().trim_end_matches(';');

    // Split in two around the first ':', "SG_ NAME" and the field list.
    let mut split_colon = line.splitn(2, ':');
    let left: &str = split_colon.next().unwrap_or("").trim();
    let right: &str = split_colon.next().ok_or(SignalLineError::MissingName)?.trim();

    let name: &str = left
        .split_whitespace()
        .nth(1)
        .ok_or(SignalLineError::MissingName)?;

    let mut fields = right.split_whitespace();

    // 1) bit spec: "0|16@1+"
    let bit_info: &str = fields.next().ok_or(SignalLineError::BadBitSpec)?;
    let (pos_len, order_sign) = bit_info.split_once('@').ok_or(SignalLineError::BadBitSpec)?;
    let (start_s, len_s) = pos_len.split_once('|').ok_or(SignalLineError::BadBitSpec)?;
    let start_bit: u16 = start_s.parse().map_err(|_| SignalLineError::BadBitSpec)?;
    let bit_length: u16 = len_s.parse().map_err(|_| SignalLineError::BadBitSpec)?;

    let mut order_sign_chars = order_sign.chars();
    let byte_order: ByteOrder = match order_sign_chars.next() {
        Some('1') => ByteOrder::LittleEndian,
        Some('0') => ByteOrder::BigEndian,
        _ => return Err(SignalLineError::BadBitSpec),
    };
    let signed: bool = match order_sign_chars.next() {
        Some('-') => true,
        Some('+') => false,
        _ => return Err(SignalLineError::BadBitSpec),
    };

    // 2) "(scale,offset)"
    let scaling: &str = fields.next().ok_or(SignalLineError::BadScaling)?;
    if !(scaling.starts_with('(') && scaling.ends_with(')')) {
        return Err(SignalLineError::BadScaling);
    }
    let inner: &str = scaling.trim_start_matches('(').trim_end_matches(')');
    let (scale_s, offset_s) = inner.split_once(',').ok_or(SignalLineError::BadScaling)?;
    let scale: f64 = scale_s.trim().parse().map_err(|_| SignalLineError::BadScaling)?;
    let offset: f64 = offset_s.trim().parse().map_err(|_| SignalLineError::BadScaling)?;

    // 3) "[min|max]"
    let range: &str = fields.next().ok_or(SignalLineError::BadRange)?;
    if !(range.starts_with('[') && range.ends_with(']')) {
        return Err(SignalLineError::BadRange);
    }
    let inner: &str = range.trim_start_matches('[').trim_end_matches(']');
    let (min_s, max_s) = inner.split_once('|').ok_or(SignalLineError::BadRange)?;
    let min: f64 = min_s.trim().parse().map_err(|_| SignalLineError::BadRange)?;
    let max: f64 = max_s.trim().parse().map_err(|_| SignalLineError::BadRange)?;

    // 4) "unit" and receiver are descriptive; tolerate their absence.
    let unit: String = fields.next().unwrap_or("").trim_matches('"').to_string();
    let receiver: String = fields.next().unwrap_or("").to_string();

    Ok(SignalDescription {
        name: name.to_string(),
        start_bit,
        bit_length,
        byte_order,
        signed,
        scale,
        offset,
        min,
        max,
        unit,
        receiver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let sig = decode(r#"SG_ Speed : 0|16@1+ (0.1,0) [0|6553.5] "km/h" Receiver"#).unwrap();
        assert_eq!(sig.name, "Speed");
        assert_eq!(sig.start_bit, 0);
        assert_eq!(sig.bit_length, 16);
        assert_eq!(sig.byte_order, ByteOrder::LittleEndian);
        assert!(!sig.signed);
        assert_eq!(sig.scale, 0.1);
        assert_eq!(sig.offset, 0.0);
        assert_eq!(sig.min, 0.0);
        assert_eq!(sig.max, 6553.5);
        assert_eq!(sig.unit, "km/h");
        assert_eq!(sig.receiver, "Receiver");
    }

    #[test]
    fn test_decode_signed_motorola() {
        let sig = decode(r#"SG_ AccX : 7|16@0- (0.00390625,0) [-128|128] "g" IMU"#).unwrap();
        assert_eq!(sig.byte_order, ByteOrder::BigEndian);
        assert!(sig.signed);
        assert_eq!(sig.scale, 0.00390625);
        assert_eq!(sig.min, -128.0);
    }

    #[test]
    fn test_malformed_bit_spec() {
        assert_eq!(
            decode(r#"SG_ S : 0|16#1+ (1,0) [0|0] "" RX"#),
            Err(SignalLineError::BadBitSpec)
        );
        assert_eq!(
            decode(r#"SG_ S : zero|16@1+ (1,0) [0|0] "" RX"#),
            Err(SignalLineError::BadBitSpec)
        );
        assert_eq!(
            decode(r#"SG_ S : 0|16@2+ (1,0) [0|0] "" RX"#),
            Err(SignalLineError::BadBitSpec)
        );
    }

    #[test]
    fn test_malformed_scaling_and_range() {
        assert_eq!(
            decode(r#"SG_ S : 0|16@1+ (1;0) [0|0] "" RX"#),
            Err(SignalLineError::BadScaling)
        );
        assert_eq!(
            decode(r#"SG_ S : 0|16@1+ (1,0) [0-0] "" RX"#),
            Err(SignalLineError::BadRange)
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(decode("SG_ NoColonHere"), Err(SignalLineError::MissingName));
    }
}
