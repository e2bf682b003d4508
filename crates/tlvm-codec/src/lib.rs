#![warn(clippy::pedantic)]

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::{DecodeReport, Rejected, Rejection, TlvDecoder};
pub use encoder::{TlvEncoder, encoded_size};
pub use error::EncodeError;
