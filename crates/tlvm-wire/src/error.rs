/// Errors raised by the low-level TLV framing layer.
///
/// The framing layer only knows about the 6-byte record header and raw
/// payload bytes. Whether a type id means anything is decided one layer
/// up, by the type registry.
///
/// ```text
/// ┌─────────────────┬───────────────────────────────────────────────┐
/// │ Variant         │ Cause                                         │
/// ├─────────────────┼───────────────────────────────────────────────┤
/// │ UnexpectedEof   │ fewer bytes than a header (or payload) needs  │
/// │ PayloadTooLarge │ payload length does not fit the u32 field     │
/// │ Io              │ underlying writer failed                      │
/// └─────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete header or payload could be read,
    /// or an output buffer was too small for a header.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A payload is longer than the 32-bit length field can describe.
    #[error("payload of {len} bytes exceeds the u32 length field")]
    PayloadTooLarge { len: usize },

    /// I/O error during write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
