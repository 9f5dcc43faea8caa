//! Bit-level frame codec.
//!
//! Extraction assembles the signal's byte span into a big-endian
//! accumulator (the byte order only selects the traversal direction),
//! shifts the field down to bit 0, masks, and optionally sign-extends.
//! Encoding is the exact inverse: position the field within the span and
//! scatter it back through the same traversal, OR-combining with bytes
//! already written by other signals of the frame.

use std::collections::HashMap;

use log::warn;

use crate::types::database::Database;
use crate::types::decoded::DecodedMessage;
use crate::types::errors::CodecError;
use crate::types::frame::CanFrame;
use crate::types::message::MessageDescription;
use crate::types::signal::{ByteOrder, SignalDescription};
use crate::types::value::SignalValue;

/// Validated span geometry shared by extraction and insertion.
struct Span {
    byte_start: usize,
    n_bytes: usize,
    /// Right shift that moves the field's LSB to bit 0 of the span.
    shift: u32,
}

fn span_of(sig: &SignalDescription, payload_len: usize) -> Result<Span, CodecError> {
    let bit_length = sig.bit_length;
    if bit_length == 0 || bit_length > 64 {
        return Err(CodecError::InvalidBitLength {
            signal: sig.name.clone(),
            bit_length,
        });
    }

    let byte_start = sig.byte_start();
    let n_bytes = sig.span_bytes();
    if byte_start + n_bytes > payload_len {
        return Err(CodecError::OutOfBounds {
            signal: sig.name.clone(),
            byte_start,
            byte_end: byte_start + n_bytes,
            payload_len,
        });
    }

    let bit_start = sig.bit_in_byte();
    // A field must fit the ceil(length/8)-byte window its start bit opens;
    // otherwise the shift below would be negative.
    let shift = (8 * n_bytes as u32)
        .checked_sub(bit_length as u32 + bit_start)
        .ok_or_else(|| CodecError::MisalignedSpan {
            signal: sig.name.clone(),
            start_bit: sig.start_bit,
            bit_length,
            n_bytes,
        })?;

    Ok(Span {
        byte_start,
        n_bytes,
        shift,
    })
}

#[inline]
fn field_mask(bit_length: u16) -> u64 {
    if bit_length == 64 {
        u64::MAX
    } else {
        (1u64 << bit_length) - 1
    }
}

/// Source/destination payload index for span byte `i`, `0 == most
/// significant byte of the accumulator`.
#[inline]
fn span_byte_index(span: &Span, byte_order: ByteOrder, i: usize) -> usize {
    match byte_order {
        // Little-endian spans are read highest-indexed byte first.
        ByteOrder::LittleEndian => span.byte_start + (span.n_bytes - 1 - i),
        ByteOrder::BigEndian => span.byte_start + i,
    }
}

/// Extracts one signal from a raw payload.
///
/// Returns the decoded value typed per the database entry: the raw
/// integer (signed or unsigned) when the signal is unscaled, the physical
/// float otherwise.
///
/// # Errors
/// Fails when the bit length is outside 1..=64, the byte span reaches
/// past the payload, or the field does not fit its span window. Failure
/// is per-signal: callers decoding a whole frame skip the signal and
/// continue.
pub fn extract_signal(sig: &SignalDescription, payload: &[u8]) -> Result<SignalValue, CodecError> {
    let span = span_of(sig, payload.len())?;

    // Fold the span into a big-endian accumulator.
    let mut value: u64 = 0;
    for i in 0..span.n_bytes {
        value = (value << 8) | payload[span_byte_index(&span, sig.byte_order, i)] as u64;
    }

    // Isolate the field.
    value >>= span.shift;
    value &= field_mask(sig.bit_length);

    // Two's-complement interpretation.
    let raw_signed: i64 = if sig.signed
        && sig.bit_length < 64
        && value & (1u64 << (sig.bit_length - 1)) != 0
    {
        value as i64 - (1i64 << sig.bit_length)
    } else {
        value as i64
    };

    // Unscaled signals keep their raw integer; everything else becomes the
    // physical float.
    if sig.scale == 1.0 && sig.offset == 0.0 {
        if sig.signed {
            Ok(SignalValue::Signed(raw_signed))
        } else {
            Ok(SignalValue::Unsigned(value))
        }
    } else {
        let raw: f64 = if sig.signed {
            raw_signed as f64
        } else {
            value as f64
        };
        Ok(SignalValue::Float(raw * sig.scale + sig.offset))
    }
}

/// Packs one physical value into a payload, OR-combining with bytes
/// already written by other signals.
///
/// The physical value is un-scaled with rounding, masked to the signal's
/// bit length (two's-complement when negative), and scattered through the
/// same byte-order traversal extraction uses. Overlapping signal bit
/// ranges are a database-authoring error the codec does not detect.
pub fn insert_signal(
    payload: &mut [u8],
    sig: &SignalDescription,
    physical: f64,
) -> Result<(), CodecError> {
    let span = span_of(sig, payload.len())?;

    let raw: i64 = ((physical - sig.offset) / sig.scale).round() as i64;
    let field: u64 = (raw as u64) & field_mask(sig.bit_length);

    // Position the field inside the span; the top used bit lands below
    // 8*n_bytes, so the shift never overflows the span.
    let span_value: u64 = field << span.shift;

    for i in 0..span.n_bytes {
        let byte = (span_value >> (8 * (span.n_bytes - 1 - i))) as u8;
        payload[span_byte_index(&span, sig.byte_order, i)] |= byte;
    }

    Ok(())
}

/// Decodes every signal of `desc` found in `frame`.
///
/// Per-signal failures (out-of-range spans against this frame's actual
/// payload) are logged and skipped; the rest of the frame still decodes.
pub fn decode_frame(
    frame: &CanFrame,
    desc: &MessageDescription,
) -> HashMap<String, SignalValue> {
    let mut signals: HashMap<String, SignalValue> = HashMap::with_capacity(desc.signals.len());

    for sig in &desc.signals {
        match extract_signal(sig, &frame.data) {
            Ok(value) => {
                signals.insert(sig.name.clone(), value);
            }
            Err(err) => {
                warn!("failed to decode signal '{}' of 0x{:X}: {err}", sig.name, frame.id);
            }
        }
    }

    signals
}

/// Decodes a raw frame against the database, best-effort.
///
/// The layout is looked up by the frame's id at this moment; a frame with
/// no registered layout is still stored downstream, just with an empty
/// signal map.
pub fn decode_with_database(frame: CanFrame, db: &Database) -> DecodedMessage {
    match db.get_message_by_id(frame.id) {
        Some(desc) => {
            let signals = decode_frame(&frame, desc);
            DecodedMessage::new(frame, signals)
        }
        None => DecodedMessage::undecoded(frame),
    }
}

/// Encodes named physical values into a raw payload of
/// `desc.byte_length` bytes.
///
/// Signals not named stay zero. A name with no matching signal in `desc`
/// is a contract violation and fails the whole call.
pub fn encode_frame(
    desc: &MessageDescription,
    values: &[(&str, f64)],
) -> Result<Vec<u8>, CodecError> {
    let mut payload: Vec<u8> = vec![0; desc.byte_length as usize];

    for &(name, physical) in values {
        let sig = desc.signal(name).ok_or_else(|| CodecError::UnknownSignal {
            message: desc.name.clone(),
            signal: name.to_string(),
        })?;
        insert_signal(&mut payload, sig, physical)?;
    }

    Ok(payload)
}
