#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod scanner;

pub use error::WireError;
pub use header::{HEADER_SIZE, RecordHeader};
pub use scanner::{FrameScanner, ScannedFrame};
