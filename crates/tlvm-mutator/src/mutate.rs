use rand::Rng;
use rand::seq::index;
use tlvm_types::FLAG_PAYLOAD_LEN;
use tracing::trace;

use crate::byte_mutator::ByteMutator;
use crate::collection::BlockCollection;
use crate::generate::Alphabet;
use crate::selection::Selection;

/// Top-level choice made by the dispatcher for one mutation round.
///
/// The dispatcher rolls `dice` uniformly in `0..=10_000`:
///
/// ```text
/// ┌────────────┬──────────────────────────┬──────────────────────────────────────────┐
/// │ dice       │ Strategy                 │ Effect                                   │
/// ├────────────┼──────────────────────────┼──────────────────────────────────────────┤
/// │ 0          │ Blind                    │ one of eight structure-blind operators   │
/// │ 1          │ NotInterestingFlag       │ mutate a not-interesting flag record     │
/// │ 2          │ NotInterestingString     │ mutate a not-interesting string record   │
/// │ 3          │ InsertNotInteresting     │ synthesize a not-interesting string/flag │
/// │ 4          │ SwapInterestingComposing │ swap two interesting composing strings   │
/// │ 5          │ Reset                    │ clear everything and bootstrap           │
/// │ 6..=10_000 │ InterestingString        │ mutate an interesting string record      │
/// └────────────┴──────────────────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Blind,
    NotInterestingFlag,
    NotInterestingString,
    InsertNotInteresting,
    SwapInterestingComposing,
    Reset,
    InterestingString,
}

impl Strategy {
    /// Upper bound (inclusive) of the dispatcher's roll.
    pub const DICE_MAX: u32 = 10_000;

    pub fn from_dice(dice: u32) -> Self {
        match dice {
            0 => Self::Blind,
            1 => Self::NotInterestingFlag,
            2 => Self::NotInterestingString,
            3 => Self::InsertNotInteresting,
            4 => Self::SwapInterestingComposing,
            5 => Self::Reset,
            _ => Self::InterestingString,
        }
    }
}

/// The eight structure-blind operators, picked uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlindOp {
    MutateSingle,
    Delete,
    DuplicateAsNewType,
    Retype,
    InsertPrintable,
    InsertBinary,
    CloneAndPerturb,
    SwapTypes,
}

impl BlindOp {
    const ALL: [Self; 8] = [
        Self::MutateSingle,
        Self::Delete,
        Self::DuplicateAsNewType,
        Self::Retype,
        Self::InsertPrintable,
        Self::InsertBinary,
        Self::CloneAndPerturb,
        Self::SwapTypes,
    ];
}

impl BlockCollection<'_> {
    /// Run one dispatcher round. Returns `true` iff the collection changed.
    ///
    /// An empty collection is bootstrapped up to `budget` instead.
    pub fn mutate(&mut self, budget: usize, bytes: &mut dyn ByteMutator) -> bool {
        if self.records.is_empty() {
            return self.bootstrap(budget);
        }

        let dice = self.rng.gen_range(0..=Strategy::DICE_MAX);
        let strategy = Strategy::from_dice(dice);
        trace!(dice, ?strategy, records = self.records.len(), "dispatch");

        match strategy {
            Strategy::Blind => self.mutate_blindly(bytes),
            Strategy::NotInterestingFlag => {
                self.mutate_matching(Selection::NOT_INTERESTING | Selection::FLAG, bytes)
            }
            Strategy::NotInterestingString => {
                self.mutate_matching(Selection::NOT_INTERESTING | Selection::STRING, bytes)
            }
            Strategy::InsertNotInteresting => self.insert_from_thin_air(
                Selection::NOT_INTERESTING | Selection::STRING | Selection::FLAG,
            ),
            Strategy::SwapInterestingComposing => self.swap_matching(
                Selection::INTERESTING | Selection::COMPOSING | Selection::STRING,
            ),
            Strategy::Reset => {
                self.records.clear();
                self.bootstrap(budget)
            }
            Strategy::InterestingString => {
                self.mutate_matching(Selection::INTERESTING | Selection::STRING, bytes)
            }
        }
    }

    /// Mutate the content of one random record whose type matches
    /// `selection`.
    pub fn mutate_matching(&mut self, selection: Selection, bytes: &mut dyn ByteMutator) -> bool {
        match self.pick(selection) {
            Some(i) => self.mutate_single_at(i, bytes),
            None => false,
        }
    }

    /// Mutate the content of the record at `index`.
    ///
    /// Garbage records are first retyped until they resolve in the
    /// registry. Flags keep exactly four bytes; other payloads may grow to
    /// [`MutatorConfig::growth_capacity`](crate::MutatorConfig::growth_capacity)
    /// and are cut to whatever length `bytes` reports.
    pub fn mutate_single_at(&mut self, index: usize, bytes: &mut dyn ByteMutator) -> bool {
        if index >= self.records.len() {
            return false;
        }

        let registry = self.registry;
        while !registry.is_valid_type(self.records[index].type_id) {
            let type_id = self.random_type();
            self.records[index].type_id = type_id;
        }
        let Some(descriptor) = registry.lookup(self.records[index].type_id) else {
            return false;
        };

        let payload = &mut self.records[index].payload;
        if descriptor.is_flag() {
            payload.resize(FLAG_PAYLOAD_LEN, 0);
            bytes.mutate_bytes(&mut payload[..], FLAG_PAYLOAD_LEN, FLAG_PAYLOAD_LEN);
        } else {
            let len = payload.len();
            let capacity = self.config.growth_capacity(len);
            payload.resize(capacity, 0);
            let new_len = bytes.mutate_bytes(&mut payload[..], len, capacity);
            payload.truncate(new_len.min(capacity));
        }
        true
    }

    /// Mutate the content of `n` distinct random records (all of them when
    /// `n >= len`). Returns `true` if any record was touched.
    pub fn mutate_many(&mut self, n: usize, bytes: &mut dyn ByteMutator) -> bool {
        let len = self.records.len();
        let amount = n.min(len);
        if amount == 0 {
            return false;
        }
        let picked = index::sample(&mut self.rng, len, amount);
        let mut changed = false;
        for i in picked {
            changed |= self.mutate_single_at(i, bytes);
        }
        changed
    }

    /// Copy a random non-empty record, run `bytes` over the copy with some
    /// headroom to grow into and insert it at a random position.
    pub fn clone_and_perturb(&mut self, bytes: &mut dyn ByteMutator) -> bool {
        for _ in 0..self.config.clone_attempts {
            let Some(i) = self.random_index() else {
                return false;
            };
            if self.records[i].payload.is_empty() {
                continue;
            }

            let mut copy = self.records[i].clone();
            let len = copy.payload.len();
            let capacity = len.saturating_add(self.config.clone_headroom);
            copy.payload.resize(capacity, 0);
            let new_len = bytes.mutate_bytes(&mut copy.payload, len, capacity);
            copy.payload.truncate(new_len.min(capacity));

            let at = self.random_slot();
            self.records.insert(at, copy);
            return true;
        }
        false
    }

    /// Apply one structure-blind operator chosen uniformly.
    pub fn mutate_blindly(&mut self, bytes: &mut dyn ByteMutator) -> bool {
        let op = BlindOp::ALL[self.rng.gen_range(0..BlindOp::ALL.len())];
        trace!(?op, "blind mutation");

        match op {
            BlindOp::MutateSingle => match self.random_index() {
                Some(i) => self.mutate_single_at(i, bytes),
                None => false,
            },
            BlindOp::Delete => self.delete_random(),
            BlindOp::DuplicateAsNewType => self.duplicate_as_new_type(),
            BlindOp::Retype => self.retype(),
            BlindOp::InsertPrintable => {
                let len = self.rng.gen_range(0..=self.config.ascii_garbage_max_len);
                self.insert_garbage(len, Alphabet::Printable)
            }
            BlindOp::InsertBinary => {
                let len = self.rng.gen_range(0..=self.config.binary_garbage_max_len);
                self.insert_garbage(len, Alphabet::Binary)
            }
            BlindOp::CloneAndPerturb => self.clone_and_perturb(bytes),
            BlindOp::SwapTypes => self.swap_types(),
        }
    }
}
