//! Budget and cleanup invariants of the mutation entry point.
//!
//! For every seed and budget, `TlvMutator::mutate` must:
//!
//! - never return more than `max_size` bytes,
//! - contain no repeated set-once type,
//! - be sorted by type id.
//!
//! Outputs may still hold records the decoder drops (garbage produced by
//! blind mutations); the invariants are checked on what does decode.

use std::path::Path;

use tlvm_codec::TlvDecoder;
use tlvm_mutator::{BlockCollection, MutatorConfig, SeededByteMutator, TlvMutator};
use tlvm_types::{Record, TypeRegistry};

fn golden(subpath: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixture_path = manifest_dir.join("tests/golden").join(subpath);
    std::fs::read(&fixture_path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", fixture_path.display()))
}

fn assert_invariants(registry: &TypeRegistry, out: &[u8], max_size: usize) {
    assert!(out.len() <= max_size, "{} bytes over budget {max_size}", out.len());

    let records = TlvDecoder::new(registry).decode(out);
    assert!(
        records.windows(2).all(|w| w[0].type_id <= w[1].type_id),
        "output not sorted by type id"
    );
    for (i, r) in records.iter().enumerate() {
        if !registry.allows_multiple(r.type_id) {
            assert!(
                records[i + 1..].iter().all(|o| o.type_id != r.type_id),
                "set-once type {} repeated",
                r.type_id
            );
        }
    }
}

#[test]
fn mutate_stays_within_budget() {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let input = golden("http_exchange/payload.tlv");

    for seed in 0..300u32 {
        let max_size = [0, 6, 50, 163, 1024][seed as usize % 5];
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        let out = mutator.mutate_to_vec(&input, max_size, seed, &mut bytes);
        assert_invariants(&registry, &out, max_size);
    }
}

#[test]
fn repeated_mutation_stays_within_budget() {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let mut data = golden("url_header/payload.tlv");

    for seed in 0..500u32 {
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        data = mutator.mutate_to_vec(&data, 512, seed, &mut bytes);
        assert_invariants(&registry, &data, 512);
    }
}

#[test]
fn in_place_mutation_respects_max_size_below_input() {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let data = golden("http_exchange/payload.tlv");
    let size = data.len();

    for seed in 0..50u32 {
        let mut buf = data.clone();
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        let written = mutator.mutate(&mut buf, size, 40, seed, &mut bytes);
        assert_invariants(&registry, &buf[..written], 40);
    }
}

#[test]
fn garbage_input_is_replaced_within_budget() {
    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let input = golden("edge_cases/unregistered_type/payload.tlv");

    for seed in 0..50u32 {
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        let out = mutator.mutate_to_vec(&input, 300, seed, &mut bytes);
        assert_invariants(&registry, &out, 300);
    }
}

#[test]
fn small_attempt_budget_still_holds() {
    let registry = TypeRegistry::standard();
    let config = MutatorConfig {
        max_attempts: 1,
        ..MutatorConfig::default()
    };
    let mutator = TlvMutator::with_config(&registry, config);
    let input = golden("http_exchange/payload.tlv");

    for seed in 0..100u32 {
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        let out = mutator.mutate_to_vec(&input, 100, seed, &mut bytes);
        assert_invariants(&registry, &out, 100);
    }
}

#[test]
fn bootstrap_reaches_budget_and_decodes_cleanly() {
    let registry = TypeRegistry::standard();
    for (seed, budget) in [(0u64, 0usize), (1, 64), (2, 1000), (3, 10_000)] {
        let mut collection = BlockCollection::new(&registry, MutatorConfig::default(), seed);
        collection.bootstrap(budget);
        assert!(collection.total_size() >= budget);

        assert!(
            collection
                .records()
                .iter()
                .any(|r| registry.lookup(r.type_id).is_some_and(|d| d.interesting)),
            "budget {budget}: no interesting record"
        );

        let bytes = collection.encode_to_vec().unwrap();
        let report = TlvDecoder::new(&registry).decode_report(&bytes);
        assert!(report.is_clean());
        assert_eq!(report.records, collection.records());
    }
}

#[test]
fn trim_then_canonicalize_is_stable() {
    let registry = TypeRegistry::standard();
    let records: Vec<Record> = (0..30u8)
        .map(|i| Record::new(u16::from(i % 3) * 6 + 2, vec![i]))
        .collect();
    let mut collection =
        BlockCollection::new(&registry, MutatorConfig::default(), 9).with_records(records);

    collection.trim_to_budget(120);
    collection.canonicalize();
    assert!(collection.total_size() <= 120);

    let kept = collection.records();
    for w in kept.windows(2) {
        assert!(w[0].type_id <= w[1].type_id);
        if w[0].type_id == w[1].type_id {
            assert!(w[0].payload[0] < w[1].payload[0], "equal types reordered");
        }
    }
}
