use tlvm_types::{Record, TypeRegistry};
use tlvm_wire::{FrameScanner, ScannedFrame};
use tracing::trace;

/// Why a scanned record was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("type id outside the registry range")]
    TypeOutOfRange,

    #[error("type id not registered")]
    UnregisteredType,

    #[error("payload length not allowed for this type")]
    IllegalLength,

    #[error("payload runs past the end of the buffer")]
    Truncated,
}

/// A dropped record together with where it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rejected {
    pub offset: usize,
    pub type_id: u16,
    /// The length claimed by the header (not necessarily present).
    pub length: u32,
    pub reason: Rejection,
}

/// Full result of a decode: the accepted records plus everything that was
/// dropped on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub records: Vec<Record>,
    pub rejected: Vec<Rejected>,
    /// Bytes at the end of the buffer too few to hold a record header.
    pub trailing: usize,
}

impl DecodeReport {
    /// True when every byte of the input became part of an accepted record.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.trailing == 0
    }
}

/// Best-effort TLV decoder.
///
/// Decoding never fails. The scan reads a header, steps over the whole
/// record and only then validates it, so invalid records are skipped
/// without losing sync and a bogus length field ends the scan rather than
/// reading out of bounds.
///
/// Validation, in order:
///
/// ```text
/// 1. payload present   : header length must fit in the remaining buffer
/// 2. type in range     : registry.lowest() ..= registry.highest()
/// 3. type registered   : registry.lookup(type) is Some
/// 4. length legal      : e.g. flags must be exactly 4 bytes
/// ```
///
/// # Example
///
/// ```rust
/// use tlvm_codec::TlvDecoder;
/// use tlvm_types::TypeRegistry;
///
/// let registry = TypeRegistry::standard();
/// let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x04, b'h', b't', b't', b'p'];
/// let records = TlvDecoder::new(&registry).decode(&bytes);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].payload, b"http");
/// ```
pub struct TlvDecoder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> TlvDecoder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Decode `buf` into the ordered list of valid records.
    pub fn decode(&self, buf: &[u8]) -> Vec<Record> {
        self.decode_report(buf).records
    }

    /// Decode `buf`, keeping track of every dropped record.
    pub fn decode_report(&self, buf: &[u8]) -> DecodeReport {
        let mut report = DecodeReport::default();
        let mut scanner = FrameScanner::new(buf);

        for frame in scanner.by_ref() {
            match self.validate(&frame) {
                Ok(payload) => report
                    .records
                    .push(Record::new(frame.header.type_id, payload.to_vec())),
                Err(reason) => {
                    trace!(
                        offset = frame.offset,
                        type_id = frame.header.type_id,
                        length = frame.header.length,
                        %reason,
                        "dropping record"
                    );
                    report.rejected.push(Rejected {
                        offset: frame.offset,
                        type_id: frame.header.type_id,
                        length: frame.header.length,
                        reason,
                    });
                }
            }
        }

        report.trailing = scanner.trailing();
        report
    }

    fn validate<'a>(&self, frame: &ScannedFrame<'a>) -> Result<&'a [u8], Rejection> {
        let payload = frame.payload.ok_or(Rejection::Truncated)?;
        let type_id = frame.header.type_id;

        if !self.registry.in_range(type_id) {
            return Err(Rejection::TypeOutOfRange);
        }
        if !self.registry.is_valid_type(type_id) {
            return Err(Rejection::UnregisteredType);
        }
        if !self.registry.is_valid_length(type_id, payload.len()) {
            return Err(Rejection::IllegalLength);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlvm_types::tlv_type;

    fn raw(type_id: u16, length: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&type_id.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn decodes_url_and_header() {
        let registry = TypeRegistry::standard();
        let mut buf = raw(tlv_type::URL, 4, b"http");
        buf.extend(raw(tlv_type::HEADER, 10, b"X-Foo: bar"));

        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert!(report.is_clean());
        assert_eq!(
            report.records,
            vec![
                Record::new(tlv_type::URL, b"http".to_vec()),
                Record::new(tlv_type::HEADER, b"X-Foo: bar".to_vec()),
            ]
        );
    }

    #[test]
    fn drops_out_of_range_and_keeps_going() {
        let registry = TypeRegistry::standard();
        let mut buf = raw(0, 3, b"abc");
        buf.extend(raw(999, 1, b"z"));
        buf.extend(raw(tlv_type::COOKIE, 2, b"a="));

        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert_eq!(report.records, vec![Record::new(tlv_type::COOKIE, b"a=".to_vec())]);
        let reasons: Vec<_> = report.rejected.iter().map(|r| r.reason).collect();
        assert_eq!(reasons, vec![Rejection::TypeOutOfRange, Rejection::TypeOutOfRange]);
        assert_eq!(report.rejected[1].offset, 9);
    }

    #[test]
    fn drops_unregistered_type() {
        let registry = TypeRegistry::standard();
        let buf = raw(tlv_type::MIME_PART_NAME, 1, b"n");
        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert!(report.records.is_empty());
        assert_eq!(report.rejected[0].reason, Rejection::UnregisteredType);
    }

    #[test]
    fn drops_flag_with_wrong_length() {
        let registry = TypeRegistry::standard();
        let mut buf = raw(tlv_type::NOBODY, 2, &[0, 1]);
        buf.extend(raw(tlv_type::NOBODY, 4, &[0, 0, 0, 1]));

        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert_eq!(report.records, vec![Record::new(tlv_type::NOBODY, vec![0, 0, 0, 1])]);
        assert_eq!(report.rejected[0].reason, Rejection::IllegalLength);
    }

    #[test]
    fn oversized_length_is_truncated() {
        let registry = TypeRegistry::standard();
        let mut buf = raw(tlv_type::URL, 4, b"http");
        buf.extend(raw(tlv_type::RESPONSE0, u32::MAX, b"partial"));

        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.rejected[0].reason, Rejection::Truncated);
        assert_eq!(report.trailing, 0);
    }

    #[test]
    fn short_tail_is_reported_as_trailing() {
        let registry = TypeRegistry::standard();
        let mut buf = raw(tlv_type::URL, 1, b"h");
        buf.extend_from_slice(&[0x00, 0x06, 0x00]);

        let report = TlvDecoder::new(&registry).decode_report(&buf);
        assert_eq!(report.records.len(), 1);
        assert!(report.rejected.is_empty());
        assert_eq!(report.trailing, 3);
        assert!(!report.is_clean());
    }

    #[test]
    fn garbage_never_panics() {
        let registry = TypeRegistry::standard();
        let decoder = TlvDecoder::new(&registry);
        let mut buf = Vec::new();
        for i in 0..2048u32 {
            buf.push((i.wrapping_mul(2_654_435_761) >> 13) as u8);
            let _ = decoder.decode(&buf);
        }
    }
}
