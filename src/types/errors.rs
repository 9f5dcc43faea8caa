use std::io;
use thiserror::Error;

/// Errors produced while parsing a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors produced while extracting or packing a single signal.
///
/// These are per-signal conditions: decoding a frame skips the offending
/// signal and continues with the rest, encoding fails the whole call since
/// the output payload would be incomplete.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("Signal '{signal}' has bit length {bit_length}, expected 1..=64")]
    InvalidBitLength { signal: String, bit_length: u16 },
    #[error(
        "Signal '{signal}' spans bytes {byte_start}..{byte_end} but the payload holds {payload_len} bytes"
    )]
    OutOfBounds {
        signal: String,
        byte_start: usize,
        byte_end: usize,
        payload_len: usize,
    },
    #[error(
        "Signal '{signal}' does not fit its {n_bytes}-byte window (start bit {start_bit}, length {bit_length})"
    )]
    MisalignedSpan {
        signal: String,
        start_bit: u16,
        bit_length: u16,
        n_bytes: usize,
    },
    #[error("Message '{message}' has no signal named '{signal}'")]
    UnknownSignal { message: String, signal: String },
}

/// Error returned by the typed accessors of [`SignalValue`](crate::SignalValue).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("Signal value of type {stored} cannot be read as {requested}")]
    TypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },
}
