use crate::error::WireError;

/// Total record header size in bytes (fixed): 2-byte type + 4-byte length.
pub const HEADER_SIZE: usize = 6;

/// Record header: the first 6 bytes of every TLV record.
///
/// Both fields are big-endian. There is no magic, version or terminator:
/// a stream is simply a concatenation of `header ‖ payload` pairs that ends
/// when fewer than [`HEADER_SIZE`] bytes remain.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 2 bytes │ Type id (u16, big-endian)        │
/// │ 0x02   │ 4 bytes │ Payload length (u32, big-endian) │
/// │ 0x06   │ length  │ Payload                          │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub type_id: u16,
    pub length: u32,
}

impl RecordHeader {
    /// Build the header describing a payload of `payload_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::PayloadTooLarge`] if the length does not fit
    /// in the 32-bit length field.
    pub fn for_payload(type_id: u16, payload_len: usize) -> Result<Self, WireError> {
        let length =
            u32::try_from(payload_len).map_err(|_| WireError::PayloadTooLarge { len: payload_len })?;
        Ok(Self { type_id, length })
    }

    /// Write the 6-byte header into the front of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`HEADER_SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        buf[0..2].copy_from_slice(&self.type_id.to_be_bytes());
        buf[2..6].copy_from_slice(&self.length.to_be_bytes());

        Ok(())
    }

    /// Parse a header from the first 6 bytes of `buf`.
    ///
    /// Only the header itself is checked; whether `length` bytes of
    /// payload actually follow is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the buffer is too short.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let type_id = u16::from_be_bytes([buf[0], buf[1]]);
        let length = u32::from_be_bytes([buf[2], buf[3], buf[4], buf[5]]);

        Ok(Self { type_id, length })
    }

    /// Size of the whole record on the wire (header plus payload).
    ///
    /// Computed in `u64` so a hostile length field cannot overflow on
    /// 32-bit targets.
    pub fn record_len(&self) -> u64 {
        HEADER_SIZE as u64 + u64::from(self.length)
    }
}
