use std::ops::BitOr;

use tlvm_types::TypeDescriptor;

/// Filter over registered types, used to pick records to mutate and types
/// to synthesize.
///
/// Bit layout:
///   bit 0 = flag kind
///   bit 1 = string kind
///   bit 2 = other kind (nested TLV or opaque)
///   bit 3 = interesting types allowed
///   bit 4 = not-interesting types allowed
///   bit 5 = singleton types allowed
///   bit 6 = composing types allowed
///
/// A descriptor matches when at least one kind bit and one interest bit
/// match it. The cardinality bits restrict further only when one of them
/// is set; with neither set any cardinality is fine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection(u8);

impl Selection {
    pub const NONE: Self = Self(0);
    pub const FLAG: Self = Self(0b0000_0001);
    pub const STRING: Self = Self(0b0000_0010);
    pub const OTHER: Self = Self(0b0000_0100);
    pub const INTERESTING: Self = Self(0b0000_1000);
    pub const NOT_INTERESTING: Self = Self(0b0001_0000);
    pub const SINGLETON: Self = Self(0b0010_0000);
    pub const COMPOSING: Self = Self(0b0100_0000);

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn matches(self, d: &TypeDescriptor) -> bool {
        let kind = (self.contains(Self::FLAG) && d.is_flag())
            || (self.contains(Self::STRING) && d.is_string())
            || (self.contains(Self::OTHER) && d.is_other());

        let interest = if d.interesting {
            self.contains(Self::INTERESTING)
        } else {
            self.contains(Self::NOT_INTERESTING)
        };

        let restricts_cardinality =
            self.contains(Self::SINGLETON) || self.contains(Self::COMPOSING);
        let cardinality = !restricts_cardinality
            || if d.allows_multiple() {
                self.contains(Self::COMPOSING)
            } else {
                self.contains(Self::SINGLETON)
            };

        kind && interest && cardinality
    }
}

impl BitOr for Selection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
