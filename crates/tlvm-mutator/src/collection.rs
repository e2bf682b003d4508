use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tlvm_codec::{EncodeError, TlvDecoder, TlvEncoder, encoded_size};
use tlvm_types::{FLAG_PAYLOAD_LEN, Record, TypeRegistry};
use tracing::debug;

use crate::config::MutatorConfig;
use crate::generate::{self, Alphabet, LONG_STRING_LEN, OTHER_LEN, SHORT_STRING_LEN};
use crate::selection::Selection;

/// An ordered list of records plus the PRNG that drives every random
/// decision made on it.
///
/// A collection lives for exactly one mutate or crossover call: it is
/// decoded from the input, edited in memory and encoded back out. All
/// randomness comes from the owned `StdRng`, so the same seed and input
/// always produce the same output.
///
/// ```text
///   input bytes ──▶ from_bytes ──▶ [ Record, Record, ... ] ──▶ encode_into
///                                        │
///                           structural operators (this file)
///                           content mutation     (mutate.rs)
///                           splicing             (splice.rs)
/// ```
///
/// Operators return `true` when they changed the collection and `false`
/// when they found nothing eligible to work on.
pub struct BlockCollection<'r> {
    pub(crate) registry: &'r TypeRegistry,
    pub(crate) config: MutatorConfig,
    pub(crate) rng: StdRng,
    pub(crate) records: Vec<Record>,
}

impl<'r> BlockCollection<'r> {
    /// Create an empty collection.
    pub fn new(registry: &'r TypeRegistry, config: MutatorConfig, seed: u64) -> Self {
        Self {
            registry,
            config,
            rng: StdRng::seed_from_u64(seed),
            records: Vec::new(),
        }
    }

    /// Decode `bytes` into a new collection. Invalid records are dropped.
    pub fn from_bytes(
        registry: &'r TypeRegistry,
        config: MutatorConfig,
        seed: u64,
        bytes: &[u8],
    ) -> Self {
        let mut collection = Self::new(registry, config, seed);
        collection.records = TlvDecoder::new(registry).decode(bytes);
        collection
    }

    /// Replace the records, keeping the PRNG state.
    #[must_use]
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encoded size of the whole collection in bytes.
    pub fn total_size(&self) -> usize {
        encoded_size(&self.records)
    }

    /// Encode into the front of `out`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::CapacityExceeded`] if the collection does not
    /// fit in `out`, which cannot happen after
    /// [`trim_to_budget`](Self::trim_to_budget) with `out.len()` as budget.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize, EncodeError> {
        TlvEncoder::encode_into(&self.records, out)
    }

    /// Encode into a new buffer.
    ///
    /// # Errors
    ///
    /// Only fails if a payload exceeds the `u32` length field.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        TlvEncoder::encode_to_vec(&self.records)
    }

    // -- Random helpers ---------------------------------------------------

    /// Uniform type id over the registry's valid range. May be
    /// unregistered.
    pub(crate) fn random_type(&mut self) -> u16 {
        self.rng
            .gen_range(self.registry.lowest()..=self.registry.highest())
    }

    /// Uniform type id in range, different from `current`. `None` when the
    /// range holds a single id.
    pub(crate) fn random_other_type(&mut self, current: u16) -> Option<u16> {
        let (lowest, highest) = (self.registry.lowest(), self.registry.highest());
        if !self.registry.in_range(current) {
            return Some(self.random_type());
        }
        if lowest == highest {
            return None;
        }
        let id = self.rng.gen_range(lowest..highest);
        Some(if id >= current { id + 1 } else { id })
    }

    pub(crate) fn random_index(&mut self) -> Option<usize> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.rng.gen_range(0..self.records.len()))
        }
    }

    /// Uniform insertion point in `0..=len`.
    pub(crate) fn random_slot(&mut self) -> usize {
        self.rng.gen_range(0..=self.records.len())
    }

    /// Two distinct indices below `n`, or `None` if `n < 2`.
    pub(crate) fn two_distinct(&mut self, n: usize) -> Option<(usize, usize)> {
        if n < 2 {
            return None;
        }
        let i = self.rng.gen_range(0..n);
        let mut j = self.rng.gen_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        Some((i, j))
    }

    fn matching_indices(&self, selection: Selection) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                self.registry
                    .lookup(r.type_id)
                    .is_some_and(|d| selection.matches(d))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of a uniformly chosen record whose registered type matches
    /// `selection`.
    pub(crate) fn pick(&mut self, selection: Selection) -> Option<usize> {
        let candidates = self.matching_indices(selection);
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.gen_range(0..candidates.len())])
    }

    /// A registered type id matching `selection`, found by rejection
    /// sampling over the valid range.
    fn pick_type(&mut self, selection: Selection) -> Option<u16> {
        if !self.registry.iter().any(|d| selection.matches(d)) {
            return None;
        }
        loop {
            let id = self.random_type();
            if self
                .registry
                .lookup(id)
                .is_some_and(|d| selection.matches(d))
            {
                return Some(id);
            }
        }
    }

    // -- Structural operators ---------------------------------------------

    /// Remove one uniformly chosen record.
    pub fn delete_random(&mut self) -> bool {
        match self.random_index() {
            Some(i) => {
                self.records.remove(i);
                true
            }
            None => false,
        }
    }

    /// Exchange two distinct records.
    pub fn swap_positions(&mut self) -> bool {
        match self.two_distinct(self.records.len()) {
            Some((i, j)) => {
                self.records.swap(i, j);
                true
            }
            None => false,
        }
    }

    /// Exchange two distinct records among those matching `selection`.
    pub fn swap_matching(&mut self, selection: Selection) -> bool {
        let candidates = self.matching_indices(selection);
        match self.two_distinct(candidates.len()) {
            Some((i, j)) => {
                self.records.swap(candidates[i], candidates[j]);
                true
            }
            None => false,
        }
    }

    /// Exchange the type ids of two distinct records, leaving payloads in
    /// place.
    pub fn swap_types(&mut self) -> bool {
        let Some((i, j)) = self.two_distinct(self.records.len()) else {
            return false;
        };
        let tmp = self.records[i].type_id;
        self.records[i].type_id = self.records[j].type_id;
        self.records[j].type_id = tmp;
        true
    }

    /// Copy a random record under a different random type id and insert the
    /// copy at a random position.
    pub fn duplicate_as_new_type(&mut self) -> bool {
        let Some(i) = self.random_index() else {
            return false;
        };
        let Some(type_id) = self.random_other_type(self.records[i].type_id) else {
            return false;
        };
        let copy = Record::new(type_id, self.records[i].payload.clone());
        let at = self.random_slot();
        self.records.insert(at, copy);
        true
    }

    /// Rotate so that a random pivot in `1..len` becomes the head.
    pub fn rotate(&mut self) -> bool {
        let n = self.records.len();
        if n < 2 {
            return false;
        }
        let pivot = self.rng.gen_range(1..n);
        self.records.rotate_left(pivot);
        true
    }

    /// Give a random record a different random type id.
    pub fn retype(&mut self) -> bool {
        let Some(i) = self.random_index() else {
            return false;
        };
        match self.random_other_type(self.records[i].type_id) {
            Some(type_id) => {
                self.records[i].type_id = type_id;
                true
            }
            None => false,
        }
    }

    /// Insert a record with a random (possibly unregistered) type id and
    /// `len` random bytes from `alphabet`.
    pub fn insert_garbage(&mut self, len: usize, alphabet: Alphabet) -> bool {
        let type_id = self.random_type();
        let payload = generate::payload(&mut self.rng, alphabet, len);
        let at = self.random_slot();
        self.records.insert(at, Record::new(type_id, payload));
        true
    }

    /// Synthesize a well-typed record whose type matches `selection`.
    ///
    /// Payload shape follows the type:
    ///
    /// ```text
    /// ┌─────────────────────────┬──────────────────────────────┐
    /// │ Kind                    │ Payload                      │
    /// ├─────────────────────────┼──────────────────────────────┤
    /// │ Flag                    │ 4 random bytes               │
    /// │ String, not interesting │ printable, length 4..=30     │
    /// │ String, interesting     │ printable, length 0..=200    │
    /// │ Nested TLV / Other      │ binary, length 0..=200       │
    /// └─────────────────────────┴──────────────────────────────┘
    /// ```
    ///
    /// A singleton type that is already present has its existing record
    /// overwritten instead of gaining a second one.
    pub fn insert_from_thin_air(&mut self, selection: Selection) -> bool {
        let Some(type_id) = self.pick_type(selection) else {
            return false;
        };
        let Some(descriptor) = self.registry.lookup(type_id).copied() else {
            return false;
        };

        let payload = if descriptor.is_flag() {
            generate::payload(&mut self.rng, Alphabet::Binary, FLAG_PAYLOAD_LEN)
        } else if descriptor.is_string() {
            let range = if descriptor.interesting {
                LONG_STRING_LEN
            } else {
                SHORT_STRING_LEN
            };
            let len = self.rng.gen_range(range);
            generate::payload(&mut self.rng, Alphabet::Printable, len)
        } else {
            let len = self.rng.gen_range(OTHER_LEN);
            generate::payload(&mut self.rng, Alphabet::Binary, len)
        };

        let existing = if descriptor.allows_multiple() {
            None
        } else {
            self.records.iter().position(|r| r.type_id == type_id)
        };
        match existing {
            Some(i) => self.records[i].payload = payload,
            None => {
                let at = self.random_slot();
                self.records.insert(at, Record::new(type_id, payload));
            }
        }
        true
    }

    /// Drop every repeat of a type id that does not allow multiples. The
    /// first occurrence wins. Unregistered ids count as set-once.
    pub fn remove_redundant(&mut self) -> bool {
        let registry = self.registry;
        let before = self.records.len();
        let mut seen = HashSet::new();
        self.records
            .retain(|r| registry.allows_multiple(r.type_id) || seen.insert(r.type_id));
        self.records.len() != before
    }

    /// Delete random records until the encoded size fits `budget`.
    pub fn trim_to_budget(&mut self, budget: usize) -> bool {
        let mut removed = 0usize;
        while self.total_size() > budget && self.delete_random() {
            removed += 1;
        }
        if removed > 0 {
            debug!(removed, budget, remaining = self.records.len(), "trimmed to budget");
        }
        removed > 0
    }

    /// Stable sort by type id.
    pub fn canonicalize(&mut self) {
        self.records.sort_by_key(|r| r.type_id);
    }

    /// Seed a fresh collection: two not-interesting strings, one
    /// not-interesting flag, then at least one interesting string and more
    /// until the encoded size reaches `budget`.
    pub fn bootstrap(&mut self, budget: usize) -> bool {
        let mut changed = false;
        for _ in 0..2 {
            changed |= self.insert_from_thin_air(Selection::NOT_INTERESTING | Selection::STRING);
        }
        changed |= self.insert_from_thin_air(Selection::NOT_INTERESTING | Selection::FLAG);

        // At least one interesting string, even when the budget is already met.
        loop {
            let before = self.records.len();
            if !self.insert_from_thin_air(Selection::INTERESTING | Selection::STRING)
                || self.records.len() == before
            {
                break;
            }
            changed = true;
            if self.total_size() >= budget {
                break;
            }
        }

        debug!(
            budget,
            records = self.records.len(),
            size = self.total_size(),
            "bootstrapped collection"
        );
        changed
    }
}

impl fmt::Display for BlockCollection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            writeln!(f, "[{i}] {}", record.display(self.registry))?;
        }
        Ok(())
    }
}

impl fmt::Debug for BlockCollection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCollection")
            .field("config", &self.config)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlvm_types::{Cardinality, TypeDescriptor, tlv_type};

    fn collection(registry: &TypeRegistry, records: Vec<Record>) -> BlockCollection<'_> {
        BlockCollection::new(registry, MutatorConfig::default(), 5).with_records(records)
    }

    fn ids(c: &BlockCollection<'_>) -> Vec<u16> {
        c.records().iter().map(|r| r.type_id).collect()
    }

    #[test]
    fn from_bytes_drops_invalid_records() {
        let registry = TypeRegistry::standard();
        let mut bytes = vec![0, 28, 0, 0, 0, 3, 1, 2, 3];
        bytes.extend_from_slice(&[0, 1, 0, 0, 0, 2, b'h', b'i']);
        let c = BlockCollection::from_bytes(&registry, MutatorConfig::default(), 0, &bytes);
        assert_eq!(c.records(), &[Record::new(tlv_type::URL, b"hi".to_vec())]);
    }

    #[test]
    fn remove_redundant_keeps_first_singleton() {
        let registry = TypeRegistry::standard();
        let mut c = collection(
            &registry,
            vec![
                Record::new(tlv_type::URL, b"first".to_vec()),
                Record::new(tlv_type::HEADER, b"A: 1".to_vec()),
                Record::new(tlv_type::URL, b"second".to_vec()),
                Record::new(tlv_type::HEADER, b"B: 2".to_vec()),
            ],
        );
        assert!(c.remove_redundant());
        assert_eq!(
            c.records(),
            &[
                Record::new(tlv_type::URL, b"first".to_vec()),
                Record::new(tlv_type::HEADER, b"A: 1".to_vec()),
                Record::new(tlv_type::HEADER, b"B: 2".to_vec()),
            ]
        );
        assert!(!c.remove_redundant());
    }

    #[test]
    fn remove_redundant_handles_adjacent_and_unknown_repeats() {
        let registry = TypeRegistry::standard();
        let mut c = collection(
            &registry,
            vec![
                Record::new(tlv_type::NOBODY, vec![0; 4]),
                Record::new(tlv_type::NOBODY, vec![1; 4]),
                Record::new(tlv_type::NOBODY, vec![2; 4]),
                Record::new(14, b"x".to_vec()),
                Record::new(14, b"y".to_vec()),
            ],
        );
        assert!(c.remove_redundant());
        assert_eq!(ids(&c), vec![tlv_type::NOBODY, 14]);
        assert_eq!(c.records()[0].payload, vec![0; 4]);
    }

    #[test]
    fn canonicalize_is_stable() {
        let registry = TypeRegistry::standard();
        let mut c = collection(
            &registry,
            vec![
                Record::new(tlv_type::RESPONSE1, b"b".to_vec()),
                Record::new(tlv_type::HEADER, b"1".to_vec()),
                Record::new(tlv_type::URL, b"u".to_vec()),
                Record::new(tlv_type::HEADER, b"2".to_vec()),
            ],
        );
        c.canonicalize();
        assert_eq!(
            ids(&c),
            vec![tlv_type::URL, tlv_type::HEADER, tlv_type::HEADER, tlv_type::RESPONSE1]
        );
        assert_eq!(c.records()[1].payload, b"1");
        assert_eq!(c.records()[2].payload, b"2");
    }

    #[test]
    fn trim_to_budget_fits() {
        let registry = TypeRegistry::standard();
        let records = (0..20)
            .map(|i| Record::new(tlv_type::HEADER, vec![b'a'; i]))
            .collect();
        let mut c = collection(&registry, records);
        assert!(c.trim_to_budget(100));
        assert!(c.total_size() <= 100);
        assert!(!c.trim_to_budget(100));
        c.trim_to_budget(0);
        assert!(c.is_empty());
    }

    #[test]
    fn operators_refuse_small_collections() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        assert!(!c.delete_random());
        assert!(!c.retype());
        assert!(!c.duplicate_as_new_type());

        let mut c = collection(&registry, vec![Record::new(tlv_type::URL, b"u".to_vec())]);
        assert!(!c.swap_positions());
        assert!(!c.swap_types());
        assert!(!c.rotate());
        assert!(c.delete_random());
        assert!(c.is_empty());
    }

    #[test]
    fn swap_positions_exchanges_two_records() {
        let registry = TypeRegistry::standard();
        let mut c = collection(
            &registry,
            vec![
                Record::new(tlv_type::URL, b"u".to_vec()),
                Record::new(tlv_type::COOKIE, b"c".to_vec()),
            ],
        );
        assert!(c.swap_positions());
        assert_eq!(ids(&c), vec![tlv_type::COOKIE, tlv_type::URL]);
        assert_eq!(c.records()[0].payload, b"c");
    }

    #[test]
    fn swap_matching_leaves_other_records_in_place() {
        let registry = TypeRegistry::standard();
        let selection = Selection::INTERESTING | Selection::COMPOSING | Selection::STRING;
        for seed in 0..20 {
            let mut c = BlockCollection::new(&registry, MutatorConfig::default(), seed)
                .with_records(vec![
                    Record::new(tlv_type::RESPONSE0, b"a".to_vec()),
                    Record::new(tlv_type::URL, b"u".to_vec()),
                    Record::new(tlv_type::RESPONSE1, b"b".to_vec()),
                ]);
            assert!(c.swap_matching(selection));
            assert_eq!(
                c.records(),
                &[
                    Record::new(tlv_type::RESPONSE1, b"b".to_vec()),
                    Record::new(tlv_type::URL, b"u".to_vec()),
                    Record::new(tlv_type::RESPONSE0, b"a".to_vec()),
                ]
            );
        }
    }

    #[test]
    fn swap_matching_needs_two_candidates() {
        let registry = TypeRegistry::standard();
        let selection = Selection::INTERESTING | Selection::COMPOSING | Selection::STRING;
        let records = vec![
            Record::new(tlv_type::RESPONSE0, b"a".to_vec()),
            Record::new(tlv_type::URL, b"u".to_vec()),
            Record::new(tlv_type::HEADER, b"H: 1".to_vec()),
        ];
        let mut c = collection(&registry, records.clone());
        assert!(!c.swap_matching(selection));
        assert_eq!(c.records(), &records[..]);

        let mut c = collection(&registry, Vec::new());
        assert!(!c.swap_matching(selection));
    }

    #[test]
    fn swap_types_keeps_payloads() {
        let registry = TypeRegistry::standard();
        let mut c = collection(
            &registry,
            vec![
                Record::new(tlv_type::URL, b"u".to_vec()),
                Record::new(tlv_type::COOKIE, b"c".to_vec()),
            ],
        );
        assert!(c.swap_types());
        assert_eq!(
            c.records(),
            &[
                Record::new(tlv_type::COOKIE, b"u".to_vec()),
                Record::new(tlv_type::URL, b"c".to_vec()),
            ]
        );
    }

    #[test]
    fn rotate_moves_head() {
        let registry = TypeRegistry::standard();
        let records: Vec<Record> = (1..=5u16).map(|id| Record::new(id, Vec::new())).collect();
        let mut c = collection(&registry, records);
        assert!(c.rotate());
        let rotated = ids(&c);
        assert_ne!(rotated[0], 1);
        let start = usize::from(rotated[0] - 1);
        let expected: Vec<u16> = (0..5).map(|k| ((start + k) % 5) as u16 + 1).collect();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn retype_and_duplicate_pick_a_new_type() {
        let registry = TypeRegistry::standard();
        for seed in 0..50 {
            let mut c = BlockCollection::new(&registry, MutatorConfig::default(), seed)
                .with_records(vec![Record::new(tlv_type::URL, b"u".to_vec())]);
            assert!(c.retype());
            assert_ne!(c.records()[0].type_id, tlv_type::URL);

            let mut c = BlockCollection::new(&registry, MutatorConfig::default(), seed)
                .with_records(vec![Record::new(tlv_type::URL, b"u".to_vec())]);
            assert!(c.duplicate_as_new_type());
            assert_eq!(c.len(), 2);
            assert_eq!(c.records().iter().filter(|r| r.type_id == tlv_type::URL).count(), 1);
            assert!(c.records().iter().all(|r| r.payload == b"u"));
        }
    }

    #[test]
    fn retype_needs_two_ids() {
        let registry = TypeRegistry::from_descriptors([TypeDescriptor::string(
            7,
            "ONLY",
            Cardinality::Composing,
            true,
        )])
        .unwrap();
        let mut c = collection(&registry, vec![Record::new(7, b"x".to_vec())]);
        assert!(!c.retype());
        assert!(!c.duplicate_as_new_type());
    }

    #[test]
    fn two_distinct_never_repeats() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        for n in 2..20 {
            let (i, j) = c.two_distinct(n).unwrap();
            assert_ne!(i, j);
            assert!(i < n && j < n);
        }
        assert!(c.two_distinct(1).is_none());
    }

    #[test]
    fn insert_garbage_uses_alphabet_and_length() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        assert!(c.insert_garbage(300, Alphabet::Printable));
        let record = &c.records()[0];
        assert_eq!(record.payload.len(), 300);
        assert!(record.payload.iter().all(|b| generate::PRINTABLE.contains(b)));
        assert!(registry.in_range(record.type_id));
    }

    #[test]
    fn insert_from_thin_air_flag() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        assert!(c.insert_from_thin_air(Selection::NOT_INTERESTING | Selection::FLAG));
        let d = registry.lookup(c.records()[0].type_id).unwrap();
        assert!(d.is_flag());
        assert_eq!(c.records()[0].payload.len(), FLAG_PAYLOAD_LEN);
    }

    #[test]
    fn insert_from_thin_air_string_lengths() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        for _ in 0..100 {
            assert!(c.insert_from_thin_air(Selection::NOT_INTERESTING | Selection::STRING));
            assert!(c.insert_from_thin_air(Selection::INTERESTING | Selection::STRING));
        }
        for r in c.records() {
            let d = registry.lookup(r.type_id).unwrap();
            assert!(d.is_string());
            if d.interesting {
                assert!(r.payload.len() <= 200);
            } else {
                assert!((4..=30).contains(&r.payload.len()));
            }
        }
    }

    #[test]
    fn insert_from_thin_air_without_candidates() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        assert!(!c.insert_from_thin_air(Selection::INTERESTING | Selection::FLAG));
        assert!(!c.insert_from_thin_air(Selection::NONE));
        assert!(c.is_empty());
    }

    #[test]
    fn insert_overwrites_present_singleton() {
        let registry = TypeRegistry::from_descriptors([TypeDescriptor::string(
            1,
            "URL",
            Cardinality::Singleton,
            false,
        )])
        .unwrap();
        let mut c = collection(&registry, vec![Record::new(1, b"old".to_vec())]);
        assert!(c.insert_from_thin_air(Selection::NOT_INTERESTING | Selection::STRING));
        assert_eq!(c.len(), 1);
        assert_ne!(c.records()[0].payload, b"old");
    }

    #[test]
    fn bootstrap_reaches_budget() {
        let registry = TypeRegistry::standard();
        let mut c = collection(&registry, Vec::new());
        assert!(c.bootstrap(2000));
        assert!(c.total_size() >= 2000);

        let flags = c
            .records()
            .iter()
            .filter(|r| registry.lookup(r.type_id).is_some_and(|d| d.is_flag()))
            .count();
        assert_eq!(flags, 1);
        assert!(c.records().iter().all(|r| r.is_well_typed(&registry)));

        let bytes = c.encode_to_vec().unwrap();
        let report = TlvDecoder::new(&registry).decode_report(&bytes);
        assert!(report.is_clean());
        assert_eq!(report.records, c.records());
    }

    #[test]
    fn bootstrap_always_adds_an_interesting_string() {
        let registry = TypeRegistry::standard();
        for budget in [0, 64] {
            for seed in 0..20 {
                let mut c = BlockCollection::new(&registry, MutatorConfig::default(), seed);
                assert!(c.bootstrap(budget));
                assert!(c.total_size() >= budget);
                let interesting = c
                    .records()
                    .iter()
                    .filter(|r| registry.lookup(r.type_id).is_some_and(|d| d.interesting))
                    .count();
                assert!(interesting >= 1, "seed {seed}, budget {budget}");
            }
        }
    }

    #[test]
    fn bootstrap_terminates_when_interesting_types_are_singletons() {
        let registry = TypeRegistry::from_descriptors([
            TypeDescriptor::string(1, "A", Cardinality::Singleton, false),
            TypeDescriptor::flag(2, "B"),
            TypeDescriptor::string(3, "C", Cardinality::Singleton, true),
        ])
        .unwrap();
        let mut c = collection(&registry, Vec::new());
        c.bootstrap(1_000_000);
        assert!(c.len() <= 3);
    }

    #[test]
    fn display_lists_records() {
        let registry = TypeRegistry::standard();
        let c = collection(&registry, vec![Record::new(tlv_type::URL, b"http".to_vec())]);
        let text = c.to_string();
        assert!(text.starts_with("[0] URL(1) len=4"));
    }
}
