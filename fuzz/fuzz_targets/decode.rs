#![no_main]

use libfuzzer_sys::fuzz_target;
use tlvm_codec::TlvDecoder;
use tlvm_types::{Record, TypeRegistry};

// Fuzz target: best-effort decoding of arbitrary bytes.
//
// Catches bugs in:
// - Length fields that point past the end of the buffer
// - Cursor arithmetic overflow near u32::MAX lengths
// - Accepting records the registry would reject
fuzz_target!(|data: &[u8]| {
    let registry = TypeRegistry::standard();
    let report = TlvDecoder::new(&registry).decode_report(data);

    let accepted: usize = report.records.iter().map(Record::encoded_len).sum();
    assert!(accepted <= data.len());
    assert!(report.trailing < 6);
    assert!(report.records.iter().all(|r| r.is_well_typed(&registry)));
});
