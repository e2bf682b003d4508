//! Payload synthesis for new records.

use std::ops::RangeInclusive;

use rand::Rng;

/// Printable ASCII (`0x20..=0x7E`) plus CR and LF, the characters that
/// matter for line-oriented text protocols.
pub const PRINTABLE: [u8; 97] = printable_alphabet();

/// Payload length for a synthesized not-interesting string (URL, cookie ...).
pub const SHORT_STRING_LEN: RangeInclusive<usize> = 4..=30;

/// Payload length for a synthesized interesting string (server response ...).
pub const LONG_STRING_LEN: RangeInclusive<usize> = 0..=200;

/// Payload length for synthesized nested or opaque content.
pub const OTHER_LEN: RangeInclusive<usize> = 0..=200;

const fn printable_alphabet() -> [u8; 97] {
    let mut out = [0u8; 97];
    let mut i = 0;
    let mut c = b' ';
    while c <= b'~' {
        out[i] = c;
        c += 1;
        i += 1;
    }
    out[95] = b'\r';
    out[96] = b'\n';
    out
}

/// Which byte values a generated payload is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alphabet {
    /// Uniform over [`PRINTABLE`].
    Printable,
    /// Uniform over all 256 byte values.
    Binary,
}

/// Generate `len` random bytes from `alphabet`.
pub fn payload(rng: &mut impl Rng, alphabet: Alphabet, len: usize) -> Vec<u8> {
    match alphabet {
        Alphabet::Printable => (0..len)
            .map(|_| PRINTABLE[rng.gen_range(0..PRINTABLE.len())])
            .collect(),
        Alphabet::Binary => {
            let mut out = vec![0u8; len];
            rng.fill(&mut out[..]);
            out
        }
    }
}
