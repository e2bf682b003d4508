/// Implementation of `tlvm encode`.
///
/// Parses a JSON manifest of records and writes them, in order, as a TLV
/// file. Types may be given by registry name (case-insensitive) or by
/// numeric id; numeric ids need not be registered, which makes it easy to
/// hand-craft garbage records for regression corpora.
///
/// # Manifest format
///
/// ```json
/// {
///   "records": [
///     { "type": "URL",       "text": "http://localhost/" },
///     { "type": "HEADER",    "text": "Accept: */*" },
///     { "type": "NOBODY",    "hex": "00000001" },
///     { "type": "RESPONSE0", "text": "HTTP/1.1 200 OK\r\n\r\n" }
///   ]
/// }
/// ```
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────┐
/// │ Key      │ Meaning                                              │
/// ├──────────┼──────────────────────────────────────────────────────┤
/// │ type     │ registry name ("URL") or numeric id (1)              │
/// │ text     │ payload as UTF-8 text                                │
/// │ hex      │ payload as hex bytes (mutually exclusive with text)  │
/// └──────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// A record with neither `text` nor `hex` gets an empty payload. Records
/// the decoder would drop (bad flag length, unregistered id) are written
/// anyway and logged as warnings.
use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tlvm_codec::TlvEncoder;
use tlvm_types::{Record, TypeRegistry};
use tracing::warn;

use crate::EncodeArgs;

// ── Manifest serde types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Manifest {
    records: Vec<ManifestRecord>,
}

#[derive(Deserialize)]
struct ManifestRecord {
    #[serde(rename = "type")]
    type_ref: TypeRef,
    text: Option<String>,
    hex: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRef {
    Id(u16),
    Name(String),
}

/// Run the `tlvm encode` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, names an
/// unknown type, has invalid hex, or if the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read manifest {}", args.input.display()))?;
    let manifest: Manifest = serde_json::from_str(&raw)
        .with_context(|| format!("invalid manifest {}", args.input.display()))?;

    let registry = TypeRegistry::standard();
    let records = build_records(&registry, manifest)?;

    let bytes = TlvEncoder::encode_to_vec(&records).context("failed to encode records")?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} record{} ({} bytes) to {}",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

fn build_records(registry: &TypeRegistry, manifest: Manifest) -> Result<Vec<Record>> {
    manifest
        .records
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let record = build_record(registry, entry)
                .with_context(|| format!("manifest record {idx}"))?;
            if !record.is_well_typed(registry) {
                warn!(
                    index = idx,
                    type_id = record.type_id,
                    len = record.payload.len(),
                    "record will be dropped by the decoder"
                );
            }
            Ok(record)
        })
        .collect()
}

fn build_record(registry: &TypeRegistry, entry: ManifestRecord) -> Result<Record> {
    let type_id = match entry.type_ref {
        TypeRef::Id(id) => id,
        TypeRef::Name(name) => registry
            .find_by_name(&name)
            .map(|d| d.type_id)
            .ok_or_else(|| anyhow!("unknown type name {name:?}"))?,
    };

    let payload = match (entry.text, entry.hex) {
        (Some(_), Some(_)) => bail!("`text` and `hex` are mutually exclusive"),
        (Some(text), None) => text.into_bytes(),
        (None, Some(hex)) => hex::decode(hex.trim()).context("invalid hex payload")?,
        (None, None) => Vec::new(),
    };

    Ok(Record::new(type_id, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlvm_types::tlv_type;

    fn parse(json: &str) -> Result<Vec<Record>> {
        let manifest: Manifest = serde_json::from_str(json)?;
        build_records(&TypeRegistry::standard(), manifest)
    }

    #[test]
    fn names_ids_text_and_hex() {
        let records = parse(
            r#"{ "records": [
                { "type": "url", "text": "http" },
                { "type": 28, "hex": "00000001" },
                { "type": "HEADER" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(tlv_type::URL, b"http".to_vec()),
                Record::new(tlv_type::NOBODY, vec![0, 0, 0, 1]),
                Record::new(tlv_type::HEADER, Vec::new()),
            ]
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = parse(r#"{ "records": [ { "type": "NOPE" } ] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("unknown type name"));
    }

    #[test]
    fn text_and_hex_conflict() {
        let err = parse(r#"{ "records": [ { "type": 1, "text": "a", "hex": "61" } ] }"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("mutually exclusive"));
    }

    #[test]
    fn unregistered_id_is_kept() {
        let records = parse(r#"{ "records": [ { "type": 14, "text": "x" } ] }"#).unwrap();
        assert_eq!(records, vec![Record::new(14, b"x".to_vec())]);
    }
}
