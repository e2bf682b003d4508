use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::generate::PRINTABLE;

/// Raw, structure-blind content mutator injected into the engine.
///
/// The engine uses it to perturb a single record's payload without
/// touching the record's type. Under libFuzzer this is
/// `libfuzzer_sys::fuzzer_mutate`; closures with the same shape work too:
///
/// ```rust
/// use tlvm_mutator::ByteMutator;
///
/// let mut invert = |buf: &mut [u8], len: usize, _capacity: usize| {
///     buf[..len].iter_mut().for_each(|b| *b = !*b);
///     len
/// };
/// let mut data = [0x0F, 0xF0, 0, 0];
/// assert_eq!(invert.mutate_bytes(&mut data, 2, 4), 2);
/// assert_eq!(data[..2], [0xF0, 0x0F]);
/// ```
pub trait ByteMutator {
    /// Mutate the first `len` bytes of `buf` in place, growing into at most
    /// `capacity` bytes, and return the new logical length.
    ///
    /// Callers guarantee `len <= capacity <= buf.len()`. Implementations
    /// should return a value `<= capacity`; the engine clamps it anyway.
    fn mutate_bytes(&mut self, buf: &mut [u8], len: usize, capacity: usize) -> usize;
}

impl<F> ByteMutator for F
where
    F: FnMut(&mut [u8], usize, usize) -> usize,
{
    fn mutate_bytes(&mut self, buf: &mut [u8], len: usize, capacity: usize) -> usize {
        self(buf, len, capacity)
    }
}

/// Deterministic stand-in for libFuzzer's byte mutator.
///
/// Applies between one and four stacked edits per call, drawn from:
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────┐
/// │ Edit         │ Effect                                       │
/// ├──────────────┼──────────────────────────────────────────────┤
/// │ FlipBit      │ toggle one bit of one byte                   │
/// │ RandomByte   │ overwrite one byte with a random value       │
/// │ InsertByte   │ insert one random byte (needs room)          │
/// │ EraseByte    │ remove one byte                              │
/// │ InsertText   │ insert a short printable run (needs room)    │
/// │ CopyChunk    │ copy a slice of the buffer over another spot │
/// └──────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Used by the CLI and by tests, where no fuzzing runtime is present.
#[derive(Debug)]
pub struct SeededByteMutator {
    rng: StdRng,
}

impl SeededByteMutator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn edit(&mut self, buf: &mut [u8], len: usize, capacity: usize) -> usize {
        match self.rng.gen_range(0..6u8) {
            0 if len > 0 => {
                let i = self.rng.gen_range(0..len);
                buf[i] ^= 1 << self.rng.gen_range(0..8u8);
                len
            }
            1 if len > 0 => {
                let i = self.rng.gen_range(0..len);
                buf[i] = self.rng.gen_range(0..=u8::MAX);
                len
            }
            3 if len > 0 => {
                let i = self.rng.gen_range(0..len);
                buf.copy_within(i + 1..len, i);
                len - 1
            }
            4 if len < capacity => {
                let run = self.rng.gen_range(1..=(capacity - len).min(8));
                let at = self.rng.gen_range(0..=len);
                buf.copy_within(at..len, at + run);
                for b in &mut buf[at..at + run] {
                    *b = PRINTABLE[self.rng.gen_range(0..PRINTABLE.len())];
                }
                len + run
            }
            5 if len > 1 => {
                let chunk = self.rng.gen_range(1..=len / 2);
                let from = self.rng.gen_range(0..=len - chunk);
                let to = self.rng.gen_range(0..=len - chunk);
                buf.copy_within(from..from + chunk, to);
                len
            }
            _ if len < capacity => {
                let at = self.rng.gen_range(0..=len);
                buf.copy_within(at..len, at + 1);
                buf[at] = self.rng.gen_range(0..=u8::MAX);
                len + 1
            }
            _ => len,
        }
    }
}

impl ByteMutator for SeededByteMutator {
    fn mutate_bytes(&mut self, buf: &mut [u8], len: usize, capacity: usize) -> usize {
        let capacity = capacity.min(buf.len());
        let mut len = len.min(capacity);
        let edits = self.rng.gen_range(1..=4);
        for _ in 0..edits {
            len = self.edit(buf, len, capacity);
        }
        len
    }
}
