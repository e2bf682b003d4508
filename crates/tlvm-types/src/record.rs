use std::fmt;

use tlvm_wire::HEADER_SIZE;

use crate::registry::TypeRegistry;

/// One decoded TLV record (a "block").
///
/// A record whose `type_id` is not in the registry is garbage: it is
/// structurally fine and will be encoded as-is, but it means nothing to a
/// consumer until it is retyped or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    pub type_id: u16,
    pub payload: Vec<u8>,
}

impl Record {
    pub fn new(type_id: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            type_id,
            payload: payload.into(),
        }
    }

    /// Size on the wire: header plus payload.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Whether the registry knows this record's type and accepts its
    /// payload length.
    pub fn is_well_typed(&self, registry: &TypeRegistry) -> bool {
        registry.is_valid_length(self.type_id, self.payload.len())
    }

    /// Borrow a displayable view that resolves the type name.
    pub fn display<'a>(&'a self, registry: &'a TypeRegistry) -> RecordDisplay<'a> {
        RecordDisplay {
            record: self,
            registry,
            preview: 60,
        }
    }
}

/// Single-line rendering of a [`Record`]:
/// `HEADER(6) len=10 "X-Foo: bar"`.
///
/// Non-printable payload bytes are escaped and the preview is cut after a
/// fixed number of bytes.
pub struct RecordDisplay<'a> {
    record: &'a Record,
    registry: &'a TypeRegistry,
    preview: usize,
}

impl RecordDisplay<'_> {
    /// Change how many payload bytes are shown.
    #[must_use]
    pub fn preview(mut self, bytes: usize) -> Self {
        self.preview = bytes;
        self
    }
}

impl fmt::Display for RecordDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.registry.name_of(self.record.type_id).unwrap_or("unknown");
        let payload = &self.record.payload;
        write!(f, "{name}({}) len={} \"", self.record.type_id, payload.len())?;
        for &b in payload.iter().take(self.preview) {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        if payload.len() > self.preview {
            write!(f, "\"…")
        } else {
            write!(f, "\"")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv_type;

    #[test]
    fn encoded_len_includes_header() {
        assert_eq!(Record::new(1, b"http".to_vec()).encoded_len(), 10);
        assert_eq!(Record::new(1, Vec::new()).encoded_len(), HEADER_SIZE);
    }

    #[test]
    fn well_typed_checks_flag_length() {
        let r = TypeRegistry::standard();
        assert!(Record::new(tlv_type::NOBODY, vec![0, 0, 0, 1]).is_well_typed(&r));
        assert!(!Record::new(tlv_type::NOBODY, vec![1]).is_well_typed(&r));
        assert!(!Record::new(tlv_type::MIME_PART_NAME, b"x".to_vec()).is_well_typed(&r));
    }

    #[test]
    fn display_escapes_and_names() {
        let r = TypeRegistry::standard();
        let rec = Record::new(tlv_type::HEADER, b"A\r\n".to_vec());
        assert_eq!(rec.display(&r).to_string(), "HEADER(6) len=3 \"A\\r\\n\"");

        let garbage = Record::new(14, b"abcdef".to_vec());
        assert_eq!(
            garbage.display(&r).preview(3).to_string(),
            "unknown(14) len=6 \"abc\"…"
        );
    }
}
