use std::mem;

use rand::Rng;
use tlvm_types::Record;
use tracing::trace;

use crate::collection::BlockCollection;

impl BlockCollection<'_> {
    /// Replace this collection's records with a splice of them and `other`.
    ///
    /// Refuses (returns `false`, nothing changed) when either side is empty.
    /// Otherwise picks one of two splices with equal probability:
    ///
    /// ```text
    /// prefix/suffix   A = a0 a1 a2 a3     B = b0 b1 b2
    ///                 ──▶ a0 a1 │ b1 b2            (N = 2, M = 2)
    ///
    /// interleaved     A = a0 a1 a2 a3     B = b0 b1
    ///                 ──▶ (a0|b0) (a1|b1) a2 a3
    /// ```
    pub fn splice(&mut self, other: Vec<Record>) -> bool {
        if self.records.is_empty() || other.is_empty() {
            return false;
        }
        if self.rng.gen_bool(0.5) {
            self.splice_prefix_suffix(other);
        } else {
            self.splice_interleaved(other);
        }
        true
    }

    /// First `N` of ours followed by the last `M` of `other`, with
    /// `N` in `1..=len` and `M` in `1..=other.len()`.
    fn splice_prefix_suffix(&mut self, mut other: Vec<Record>) {
        let n = self.rng.gen_range(1..=self.records.len());
        let m = self.rng.gen_range(1..=other.len());
        trace!(prefix = n, suffix = m, "prefix/suffix splice");

        self.records.truncate(n);
        let tail = other.split_off(other.len() - m);
        self.records.extend(tail);
    }

    /// Walk both lists in lockstep, taking a random side where both have an
    /// element and the remaining side where only one does.
    fn splice_interleaved(&mut self, other: Vec<Record>) {
        trace!(left = self.records.len(), right = other.len(), "interleaved splice");

        let mut left = mem::take(&mut self.records).into_iter();
        let mut right = other.into_iter();
        loop {
            let next = match (left.next(), right.next()) {
                (Some(a), Some(b)) => {
                    if self.rng.gen_bool(0.5) {
                        a
                    } else {
                        b
                    }
                }
                (Some(only), None) | (None, Some(only)) => only,
                (None, None) => break,
            };
            self.records.push(next);
        }
    }
}
