use tlvm_wire::WireError;

/// Errors that can occur while serializing records.
///
/// Encoding does no semantic validation; callers are expected to have
/// enforced the byte budget already. These errors mean that contract was
/// broken.
///
/// ```text
///   EncodeError
///   ├── CapacityExceeded ← records need more bytes than the buffer holds
///   └── Wire(WireError)  ← header could not be written (payload > u32)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("records need {needed} bytes but the buffer holds {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error(transparent)]
    Wire(#[from] WireError),
}
