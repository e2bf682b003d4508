/// Tuning knobs for the mutation engine.
///
/// The defaults reproduce the behaviour the engine was designed around;
/// they are exposed so tooling and tests can shrink or stretch them.
///
/// ```text
/// ┌─────────────────────────┬─────────┬────────────────────────────────────────┐
/// │ Field                   │ Default │ Used by                                │
/// ├─────────────────────────┼─────────┼────────────────────────────────────────┤
/// │ max_attempts            │ 10      │ dispatcher retries per custom_mutate   │
/// │ ascii_garbage_max_len   │ 1000    │ blind "insert printable garbage"       │
/// │ binary_garbage_max_len  │ 10      │ blind "insert binary garbage"          │
/// │ clone_attempts          │ 10      │ clone-and-perturb record picks         │
/// │ clone_headroom          │ 50      │ extra bytes the copy may grow into     │
/// │ small_payload_threshold │ 50      │ below this, payloads get a fixed room  │
/// │ small_payload_capacity  │ 100     │ that fixed room; otherwise len × 2     │
/// └─────────────────────────┴─────────┴────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutatorConfig {
    /// How many dispatcher rounds to try before accepting that nothing
    /// changed.
    pub max_attempts: usize,

    pub ascii_garbage_max_len: usize,

    pub binary_garbage_max_len: usize,

    /// How many random records clone-and-perturb looks at before giving
    /// up (records with an empty payload are skipped).
    pub clone_attempts: usize,

    pub clone_headroom: usize,

    /// Variable-length payloads shorter than this are given
    /// `small_payload_capacity` bytes to mutate into; longer ones get
    /// twice their length.
    pub small_payload_threshold: usize,

    pub small_payload_capacity: usize,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            ascii_garbage_max_len: 1000,
            binary_garbage_max_len: 10,
            clone_attempts: 10,
            clone_headroom: 50,
            small_payload_threshold: 50,
            small_payload_capacity: 100,
        }
    }
}

impl MutatorConfig {
    /// Capacity a variable-length payload of `len` bytes may grow into.
    pub fn growth_capacity(&self, len: usize) -> usize {
        if len < self.small_payload_threshold {
            self.small_payload_capacity.max(len)
        } else {
            len.saturating_mul(2)
        }
    }
}
