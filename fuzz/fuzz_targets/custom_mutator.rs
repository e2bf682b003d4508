#![no_main]

//! Structure-aware fuzzing through libFuzzer's custom mutator hooks.
//!
//! `fuzz_mutator!` and `fuzz_crossover!` route every mutation through
//! `TlvMutator`, with libFuzzer's own byte mutator doing the content-level
//! work inside single records. Both hooks check the invariants of what they
//! produce; the target body stands in for the system under test.

use std::sync::LazyLock;

use libfuzzer_sys::{fuzz_crossover, fuzz_mutator, fuzz_target, fuzzer_mutate};
use tlvm_codec::{TlvDecoder, TlvEncoder};
use tlvm_mutator::TlvMutator;
use tlvm_types::TypeRegistry;

static REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::standard);

/// Budget, singleton and ordering invariants of a hook's output.
fn check_output(out: &[u8], budget: usize) {
    assert!(out.len() <= budget, "{} bytes over budget {budget}", out.len());

    let registry = &*REGISTRY;
    let records = TlvDecoder::new(registry).decode(out);
    assert!(records.windows(2).all(|w| w[0].type_id <= w[1].type_id));
    for (i, record) in records.iter().enumerate() {
        if !registry.allows_multiple(record.type_id) {
            assert!(
                records[i + 1..].iter().all(|r| r.type_id != record.type_id),
                "set-once type {} repeated",
                record.type_id
            );
        }
    }
}

fuzz_target!(|data: &[u8]| {
    // Decoded records must re-encode to a buffer that decodes to the same
    // records.
    let decoder = TlvDecoder::new(&REGISTRY);
    let records = decoder.decode(data);
    let bytes = TlvEncoder::encode_to_vec(&records).expect("encode should succeed");
    assert_eq!(decoder.decode(&bytes), records);
});

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    let mut bytes = |buf: &mut [u8], len: usize, capacity: usize| fuzzer_mutate(buf, len, capacity);
    let written = TlvMutator::new(&REGISTRY).mutate(data, size, max_size, seed, &mut bytes);
    check_output(&data[..written], max_size);
    written
});

fuzz_crossover!(|data1: &[u8], data2: &[u8], out: &mut [u8], seed: u32| {
    let max_out = out.len();
    let written = TlvMutator::new(&REGISTRY).crossover(data1, data2, seed, out, max_out);
    check_output(&out[..written], max_out);
    written
});
