#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod error;
pub mod record;
pub mod registry;
pub mod tlv_type;

pub use descriptor::{Cardinality, ContentKind, FLAG_PAYLOAD_LEN, TypeDescriptor};
pub use error::RegistryError;
pub use record::Record;
pub use registry::TypeRegistry;
