#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tlvm_codec::{TlvDecoder, TlvEncoder};
use tlvm_types::{Record, TypeRegistry};

#[derive(Arbitrary, Debug)]
struct Input {
    records: Vec<(u16, Vec<u8>)>,
}

// Fuzz target: encode arbitrary records, then decode.
//
// Decoding an honestly encoded buffer must return exactly the well-typed
// records, in order, with nothing trailing.
fuzz_target!(|input: Input| {
    let registry = TypeRegistry::standard();
    let records: Vec<Record> = input
        .records
        .into_iter()
        .map(|(type_id, payload)| Record::new(type_id, payload))
        .collect();

    let bytes = TlvEncoder::encode_to_vec(&records).expect("encode should succeed");
    let report = TlvDecoder::new(&registry).decode_report(&bytes);

    let expected: Vec<Record> = records
        .into_iter()
        .filter(|r| r.is_well_typed(&registry))
        .collect();
    assert_eq!(report.records, expected);
    assert_eq!(report.trailing, 0);
});
