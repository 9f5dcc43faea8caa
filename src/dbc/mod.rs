//! Parser for the DBC text database format.
//!
//! Only the subset needed to decode live traffic is consumed: `BO_`
//! message declarations and `SG_` signal declarations. Attributes, value
//! tables, comments and multiplexing sections are skipped.

pub(crate) mod core;
pub mod parse;

pub use parse::{ParseReport, from_file, from_str};
