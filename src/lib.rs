//! # canvis-core
//!
//! Core library of a CAN bus monitor: everything between the transport
//! driver and the UI shell.
//!
//! ## Highlights
//! - **DBC parser**: load the message/signal layout of a bus from a `.dbc`
//!   file into a [`Database`] ([`dbc::from_file`]), skipping and counting
//!   malformed entries instead of aborting.
//! - **Frame codec**: bit-exact extraction and packing of named signals
//!   across both byte orders, signedness and linear scaling
//!   ([`codec::decode_frame`], [`codec::encode_frame`]).
//! - **History buffer**: the most recent N decoded frames, with O(1)
//!   per-ID history lookups for plotting ([`MessageBuffer`]).
//! - **Session**: one owner for database, history and pause flag,
//!   safe to share between a bus-reader thread and UI consumers
//!   ([`Session`]).
//!
//! The transport itself (device open/close, blocking reads) and any
//! rendering layer are collaborators outside this crate: feed raw
//! [`CanFrame`]s in through [`Session::push_frame`] and read decoded
//! history back out.

pub mod buffer;
pub mod codec;
pub mod dbc;
pub mod session;
pub mod types;

pub use crate::buffer::MessageBuffer;
pub use crate::dbc::ParseReport;
pub use crate::session::Session;
pub use crate::types::{
    database::Database,
    decoded::DecodedMessage,
    errors::{CodecError, DbcParseError, ValueError},
    frame::CanFrame,
    message::MessageDescription,
    signal::{ByteOrder, SignalDescription},
    value::SignalValue,
};
