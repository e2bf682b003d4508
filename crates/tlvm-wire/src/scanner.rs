use crate::header::{HEADER_SIZE, RecordHeader};

/// One frame found by [`FrameScanner`].
///
/// `payload` is `None` when the header claims more bytes than remain in
/// the buffer. The scanner never follows such a length; it just reports
/// the frame as truncated and stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedFrame<'a> {
    /// Byte offset of the header within the scanned buffer.
    pub offset: usize,
    pub header: RecordHeader,
    pub payload: Option<&'a [u8]>,
}

/// Forward scanner over a TLV byte stream.
///
/// At each position with at least [`HEADER_SIZE`] bytes left it reads a
/// header and then advances by `HEADER_SIZE + length`, before anyone has
/// looked at whether the record is valid. The cursor saturates at the end
/// of the buffer, so every step makes progress and a hostile length field
/// ends the scan instead of pointing outside the slice.
///
/// ```text
///  cursor                     cursor + 6 + length
///    │                              │
///    ▼                              ▼
///  ┌──────┬────────┬──────────────┬──────┬─────
///  │ type │ length │ payload ...  │ type │ ...
///  └──────┴────────┴──────────────┴──────┴─────
/// ```
pub struct FrameScanner<'a> {
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> FrameScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes left after the last complete step that are too few to hold
    /// a header. Only meaningful once the iterator is exhausted.
    pub fn trailing(&self) -> usize {
        self.buf.len().saturating_sub(self.cursor)
    }
}

impl<'a> Iterator for FrameScanner<'a> {
    type Item = ScannedFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.buf.get(self.cursor..)?;
        let header = RecordHeader::read_from(remaining).ok()?;
        let offset = self.cursor;
        let payload_start = offset + HEADER_SIZE;

        let payload = usize::try_from(header.length)
            .ok()
            .and_then(|len| payload_start.checked_add(len))
            .and_then(|end| self.buf.get(payload_start..end));

        self.cursor = match payload {
            Some(bytes) => payload_start + bytes.len(),
            None => self.buf.len(),
        };

        Some(ScannedFrame {
            offset,
            header,
            payload,
        })
    }
}
