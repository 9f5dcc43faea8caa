pub mod database;
pub mod decoded;
pub mod errors;
pub mod frame;
pub mod message;
pub mod signal;
pub mod value;
