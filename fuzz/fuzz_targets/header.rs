#![no_main]

use libfuzzer_sys::fuzz_target;
use tlvm_wire::{RecordHeader, HEADER_SIZE};

// Fuzz target: RecordHeader parse/serialize symmetry.
//
// Any six bytes are a valid header; writing a parsed header back must
// reproduce them exactly.
fuzz_target!(|data: &[u8]| {
    let Ok(header) = RecordHeader::read_from(data) else {
        assert!(data.len() < HEADER_SIZE);
        return;
    };

    let mut out = [0u8; HEADER_SIZE];
    header.write_to(&mut out).expect("six bytes always fit a header");
    assert_eq!(&out[..], &data[..HEADER_SIZE]);
});
