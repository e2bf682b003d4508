use tlvm_codec::TlvDecoder;
use tlvm_types::TypeRegistry;
use tracing::{debug, warn};

use crate::byte_mutator::ByteMutator;
use crate::collection::BlockCollection;
use crate::config::MutatorConfig;

/// Entry points for a coverage-guided fuzzer's custom mutator hooks.
///
/// Both hooks follow the same pipeline, each call owning a fresh
/// [`BlockCollection`] seeded from the caller's seed:
///
/// ```text
/// ┌────────┐   ┌──────────────────┐   ┌──────────────────┐   ┌──────────┐   ┌──────────────┐   ┌────────┐
/// │ decode │──▶│ remove_redundant │──▶│ mutate / splice  │──▶│ remove_  │──▶│ trim_to_     │──▶│ encode │
/// │        │   │ (+ bootstrap)    │   │                  │   │ redundant│   │ budget +     │   │        │
/// └────────┘   └──────────────────┘   └──────────────────┘   └──────────┘   │ canonicalize │   └────────┘
///                                                                            └──────────────┘
/// ```
///
/// The result is always at most the caller's size budget and is fully
/// determined by the input bytes, the budget and the seed (plus whatever
/// the injected [`ByteMutator`] does).
#[derive(Clone, Copy, Debug)]
pub struct TlvMutator<'r> {
    registry: &'r TypeRegistry,
    config: MutatorConfig,
}

impl<'r> TlvMutator<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, MutatorConfig::default())
    }

    pub fn with_config(registry: &'r TypeRegistry, config: MutatorConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    /// Mutate the `size`-byte input at the front of `data` in place and
    /// return the new size, which never exceeds `max_size`.
    ///
    /// `size` and `max_size` are clamped to `data.len()`. An input that
    /// decodes to nothing is replaced by a bootstrapped collection.
    pub fn mutate(
        &self,
        data: &mut [u8],
        size: usize,
        max_size: usize,
        seed: u32,
        bytes: &mut dyn ByteMutator,
    ) -> usize {
        let size = size.min(data.len());
        let max_size = max_size.min(data.len());

        let mut collection =
            BlockCollection::from_bytes(self.registry, self.config, u64::from(seed), &data[..size]);
        collection.remove_redundant();
        if collection.is_empty() {
            collection.bootstrap(max_size);
        }

        let mut mutated = false;
        for _ in 0..self.config.max_attempts {
            if collection.mutate(max_size, bytes) {
                mutated = true;
                break;
            }
        }
        if !mutated {
            debug!(attempts = self.config.max_attempts, "no mutation applied");
        }

        Self::finish(&mut collection, max_size);
        match collection.encode_into(&mut data[..max_size]) {
            Ok(written) => written,
            Err(e) => {
                warn!(error = %e, "failed to encode mutated collection");
                0
            }
        }
    }

    /// Convenience wrapper around [`mutate`](Self::mutate) for callers that
    /// own their input: returns the mutated bytes as a new buffer.
    pub fn mutate_to_vec(
        &self,
        input: &[u8],
        max_size: usize,
        seed: u32,
        bytes: &mut dyn ByteMutator,
    ) -> Vec<u8> {
        let mut buf = vec![0u8; input.len().max(max_size)];
        buf[..input.len()].copy_from_slice(input);
        let written = self.mutate(&mut buf, input.len(), max_size, seed, bytes);
        buf.truncate(written);
        buf
    }

    /// Splice the records of `a` and `b` into `out` and return the number of
    /// bytes written, at most `min(max_out, out.len())`.
    ///
    /// Returns 0 when either input decodes to no records.
    pub fn crossover(&self, a: &[u8], b: &[u8], seed: u32, out: &mut [u8], max_out: usize) -> usize {
        let max_out = max_out.min(out.len());

        let mut collection =
            BlockCollection::from_bytes(self.registry, self.config, u64::from(seed), a);
        let other = TlvDecoder::new(self.registry).decode(b);
        if !collection.splice(other) {
            debug!(left = a.len(), right = b.len(), "crossover refused: empty side");
            return 0;
        }

        Self::finish(&mut collection, max_out);
        match collection.encode_into(&mut out[..max_out]) {
            Ok(written) => written,
            Err(e) => {
                warn!(error = %e, "failed to encode spliced collection");
                0
            }
        }
    }

    /// Owned-buffer variant of [`crossover`](Self::crossover).
    pub fn crossover_to_vec(&self, a: &[u8], b: &[u8], seed: u32, max_out: usize) -> Vec<u8> {
        let mut out = vec![0u8; max_out];
        let written = self.crossover(a, b, seed, &mut out, max_out);
        out.truncate(written);
        out
    }

    fn finish(collection: &mut BlockCollection<'_>, budget: usize) {
        collection.remove_redundant();
        collection.trim_to_budget(budget);
        collection.canonicalize();
    }
}
