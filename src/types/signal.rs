use serde::{Deserialize, Serialize};

/// Traversal direction used to assemble a multi-byte bit span.
///
/// Matches the DBC convention: `@1` = little-endian (Intel), `@0` =
/// big-endian (Motorola).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    BigEndian,
    #[default]
    LittleEndian,
}

/// Definition of a signal within a CAN message.
///
/// Describes bit position/length, endianness, sign, linear scaling
/// (`physical = raw * scale + offset`), documented range, and unit of
/// measure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalDescription {
    /// Signal name, unique within its message.
    pub name: String,
    /// Index of the signal's first bit in the payload, counted per the
    /// byte-order convention.
    pub start_bit: u16,
    /// Bit length (1..=64).
    pub bit_length: u16,
    /// Endianness of the byte span.
    pub byte_order: ByteOrder,
    /// Whether the raw integer is two's-complement.
    pub signed: bool,
    /// Scaling factor.
    pub scale: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value. Advisory only, never enforced by the codec.
    pub min: f64,
    /// Maximum physical value. Advisory only, never enforced by the codec.
    pub max: f64,
    /// Unit of measure.
    pub unit: String,
    /// Receiver node, as written in the DBC line.
    pub receiver: String,
}

impl SignalDescription {
    /// Index of the first payload byte touched by this signal.
    #[inline]
    pub(crate) fn byte_start(&self) -> usize {
        (self.start_bit / 8) as usize
    }

    /// Offset of the start bit from the MSB of its byte (0..8).
    #[inline]
    pub(crate) fn bit_in_byte(&self) -> u32 {
        7 - (self.start_bit % 8) as u32
    }

    /// Number of bytes in the assembled span: `ceil(bit_length / 8)`.
    #[inline]
    pub(crate) fn span_bytes(&self) -> usize {
        (self.bit_length as usize).div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_geometry() {
        let sig = SignalDescription {
            name: "Speed".to_string(),
            start_bit: 23,
            bit_length: 16,
            ..Default::default()
        };
        assert_eq!(sig.byte_start(), 2);
        assert_eq!(sig.bit_in_byte(), 0);
        assert_eq!(sig.span_bytes(), 2);

        let sig = SignalDescription {
            bit_length: 9,
            ..Default::default()
        };
        assert_eq!(sig.span_bytes(), 2);
    }
}
