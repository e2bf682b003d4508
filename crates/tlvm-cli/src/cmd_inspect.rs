/// Implementation of `tlvm inspect`.
///
/// Decodes a TLV file with the standard registry and prints one line per
/// accepted record, followed by the records the decoder dropped.
///
/// # Output format
///
/// ```text
/// File: seed.tlv (79 bytes), 3 records
/// Record 0: URL(1) singleton string (17 bytes)
/// Record 1: HEADER(6) composing string (11 bytes)
/// Record 2: RESPONSE0(2) composing string interesting (21 bytes)
/// ---
/// Dropped 1 record:
///   @74 type=28 len=1: payload length not allowed for this type
/// ```
use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result, bail};
use tlvm_codec::TlvDecoder;
use tlvm_types::{Cardinality, ContentKind, Record, TypeRegistry};

use crate::InspectArgs;

/// Run the `tlvm inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or `--record` is past the
/// last decoded record.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let registry = TypeRegistry::standard();
    let report = TlvDecoder::new(&registry).decode_report(&bytes);
    check_record_index(args.record, report.records.len())?;

    println!(
        "File: {} ({} bytes), {} record{}",
        args.file.display(),
        bytes.len(),
        report.records.len(),
        plural(report.records.len())
    );

    for (idx, record) in report.records.iter().enumerate() {
        if let Some(target) = args.record
            && idx != target
        {
            continue;
        }

        println!(
            "Record {idx}: {} ({} bytes)",
            record_label(&registry, record),
            record.payload.len()
        );

        if args.show_body {
            let body = String::from_utf8_lossy(&record.payload);
            let truncated: String = body.chars().take(80).collect();
            let ellipsis = if body.chars().count() > 80 { "…" } else { "" };
            println!("          Body:    {truncated:?}{ellipsis}");
        }

        if args.show_hex {
            println!("          Hex dump:");
            for line in hex_dump(&record.payload) {
                println!("            {line}");
            }
        }
    }

    if !report.rejected.is_empty() || report.trailing > 0 {
        println!("---");
    }
    if !report.rejected.is_empty() {
        println!(
            "Dropped {} record{}:",
            report.rejected.len(),
            plural(report.rejected.len())
        );
        for r in &report.rejected {
            println!(
                "  @{} type={} len={}: {}",
                r.offset, r.type_id, r.length, r.reason
            );
        }
    }
    if report.trailing > 0 {
        println!("Trailing: {} byte(s) too short for a header", report.trailing);
    }

    Ok(())
}

fn check_record_index(record: Option<usize>, count: usize) -> Result<()> {
    if let Some(n) = record
        && n >= count
    {
        bail!("record {n} out of range ({count} record{})", plural(count));
    }
    Ok(())
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// `NAME(id) cardinality kind [interesting]`, or `unknown(id)`.
fn record_label(registry: &TypeRegistry, record: &Record) -> String {
    let Some(d) = registry.lookup(record.type_id) else {
        return format!("unknown({})", record.type_id);
    };
    let cardinality = match d.cardinality {
        Cardinality::Singleton => "singleton",
        Cardinality::Composing => "composing",
    };
    let kind = match d.kind {
        ContentKind::Flag => "flag",
        ContentKind::String => "string",
        ContentKind::NestedTlv => "nested",
        ContentKind::Other => "other",
    };
    let mut label = format!("{}({}) {cardinality} {kind}", d.name, d.type_id);
    if d.interesting {
        label.push_str(" interesting");
    }
    label
}

/// 16 bytes per line: offset, hex, ASCII.
pub(crate) fn hex_dump(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let hex = chunk
                .iter()
                .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                    if !s.is_empty() {
                        s.push(' ');
                    }
                    let _ = write!(s, "{b:02x}");
                    s
                });
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                .collect();
            format!("{:04x}  {hex:<47}  {ascii}", i * 16)
        })
        .collect()
}

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
