/// Implementation of `tlvm validate`.
///
/// Decodes the file and checks that nothing was lost on the way: every
/// record accepted, no trailing bytes. Repeated set-once types are
/// reported but do not fail validation, since the mutator's cleanup pass
/// removes them anyway.
///
/// # Success output
///
/// ```text
/// ✓ Records: 3 accepted
/// ✓ Dropped: none
/// ✓ Trailing: none
/// ✓ Singletons: no repeated set-once types
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Records: 2 accepted
/// ✗ Dropped @21: type=28 len=1: payload length not allowed for this type
/// ✓ Trailing: none
/// ⚠ Singletons: URL(1) appears 2 times
/// ```
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result, bail};
use tlvm_codec::TlvDecoder;
use tlvm_types::{Record, TypeRegistry};

use crate::ValidateArgs;
use crate::cmd_inspect::plural;

/// Run the `tlvm validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if any record was
/// dropped by the decoder.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let registry = TypeRegistry::standard();
    let report = TlvDecoder::new(&registry).decode_report(&bytes);

    println!("✓ Records: {} accepted", report.records.len());

    if report.rejected.is_empty() {
        println!("✓ Dropped: none");
    } else {
        for r in &report.rejected {
            println!(
                "✗ Dropped @{}: type={} len={}: {}",
                r.offset, r.type_id, r.length, r.reason
            );
        }
    }

    if report.trailing == 0 {
        println!("✓ Trailing: none");
    } else {
        println!(
            "✗ Trailing: {} byte{} too short for a header",
            report.trailing,
            plural(report.trailing)
        );
    }

    let repeats = repeated_singletons(&registry, &report.records);
    if repeats.is_empty() {
        println!("✓ Singletons: no repeated set-once types");
    } else {
        for (type_id, count) in repeats {
            let name = registry.name_of(type_id).unwrap_or("unknown");
            println!("⚠ Singletons: {name}({type_id}) appears {count} times");
        }
    }

    if !report.is_clean() {
        bail!(
            "validation failed: {} record{} dropped, {} trailing byte{}",
            report.rejected.len(),
            plural(report.rejected.len()),
            report.trailing,
            plural(report.trailing)
        );
    }
    Ok(())
}

/// Set-once type ids that occur more than once, with their counts.
fn repeated_singletons(registry: &TypeRegistry, records: &[Record]) -> Vec<(u16, usize)> {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for r in records {
        if !registry.allows_multiple(r.type_id) {
            *counts.entry(r.type_id).or_default() += 1;
        }
    }
    counts.into_iter().filter(|&(_, n)| n > 1).collect()
}
