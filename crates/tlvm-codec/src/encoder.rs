use tlvm_types::Record;
use tlvm_wire::{HEADER_SIZE, RecordHeader};

use crate::error::EncodeError;

/// Total encoded size of `records`: `Σ (6 + payload.len())`.
pub fn encoded_size(records: &[Record]) -> usize {
    records.iter().map(Record::encoded_len).sum()
}

/// TLV encoder. Flattens records back into wire bytes.
///
/// A pure serializer: records are written in list order, without checking
/// types or lengths against a registry.
///
/// ```text
/// ┌──────────┬────────────┬─────────────┬──────────┬────────────┬─────
/// │ type u16 │ length u32 │ payload ... │ type u16 │ length u32 │ ...
/// └──────────┴────────────┴─────────────┴──────────┴────────────┴─────
/// ```
pub struct TlvEncoder;

impl TlvEncoder {
    /// Write `records` into the front of `out` and return the number of
    /// bytes written.
    ///
    /// Nothing is written unless every record fits.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::CapacityExceeded`] if the records need more than
    ///   `out.len()` bytes.
    /// - [`EncodeError::Wire`] if a payload is too long for the length field.
    pub fn encode_into(records: &[Record], out: &mut [u8]) -> Result<usize, EncodeError> {
        let needed = encoded_size(records);
        if needed > out.len() {
            return Err(EncodeError::CapacityExceeded {
                needed,
                capacity: out.len(),
            });
        }

        let headers = records
            .iter()
            .map(|r| RecordHeader::for_payload(r.type_id, r.payload.len()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cursor = 0;
        for (record, header) in records.iter().zip(headers) {
            header.write_to(&mut out[cursor..])?;
            cursor += HEADER_SIZE;

            let end = cursor + record.payload.len();
            out[cursor..end].copy_from_slice(&record.payload);
            cursor = end;
        }

        Ok(cursor)
    }

    /// Encode `records` into a freshly allocated buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Wire`] if a payload is too long for the
    /// length field.
    pub fn encode_to_vec(records: &[Record]) -> Result<Vec<u8>, EncodeError> {
        let mut out = vec![0u8; encoded_size(records)];
        let written = Self::encode_into(records, &mut out)?;
        out.truncate(written);
        Ok(out)
    }
}
