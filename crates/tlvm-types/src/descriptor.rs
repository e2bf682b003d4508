/// Payload length every [`ContentKind::Flag`] record must have: a big-endian
/// `u32` option value.
pub const FLAG_PAYLOAD_LEN: usize = 4;

/// How many times a type id may occur in one collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// At most once. Later occurrences are redundant and get removed.
    Singleton,
    /// Any number of times (headers, server responses, ...).
    Composing,
}

/// What a record's payload holds.
///
/// ```text
/// ┌───────────┬────────────────────────────┬──────────────────┐
/// │ Kind      │ Payload                    │ Valid length     │
/// ├───────────┼────────────────────────────┼──────────────────┤
/// │ Flag      │ u32 option value           │ exactly 4        │
/// │ String    │ text (URL, header, body)   │ any              │
/// │ NestedTlv │ a TLV stream of its own    │ any              │
/// │ Other     │ opaque bytes               │ any              │
/// └───────────┴────────────────────────────┴──────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Flag,
    String,
    NestedTlv,
    Other,
}

/// Metadata describing one registered type id.
///
/// Descriptors are plain values; the mutator never branches on a concrete
/// type id, only on the cardinality, kind and `interesting` flag found
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_id: u16,
    /// Display name used by tooling (`"URL"`, `"RESPONSE0"`, ...).
    pub name: &'static str,
    pub cardinality: Cardinality,
    pub kind: ContentKind,
    /// High-value target for content mutation, typically a large text
    /// payload such as a server response.
    pub interesting: bool,
}

impl TypeDescriptor {
    pub const fn new(
        type_id: u16,
        name: &'static str,
        cardinality: Cardinality,
        kind: ContentKind,
        interesting: bool,
    ) -> Self {
        Self {
            type_id,
            name,
            cardinality,
            kind,
            interesting,
        }
    }

    /// A set-once, not-interesting `u32` option.
    pub const fn flag(type_id: u16, name: &'static str) -> Self {
        Self::new(type_id, name, Cardinality::Singleton, ContentKind::Flag, false)
    }

    pub const fn string(
        type_id: u16,
        name: &'static str,
        cardinality: Cardinality,
        interesting: bool,
    ) -> Self {
        Self::new(type_id, name, cardinality, ContentKind::String, interesting)
    }

    pub const fn nested(type_id: u16, name: &'static str, cardinality: Cardinality) -> Self {
        Self::new(type_id, name, cardinality, ContentKind::NestedTlv, false)
    }

    pub fn allows_multiple(&self) -> bool {
        self.cardinality == Cardinality::Composing
    }

    pub fn is_flag(&self) -> bool {
        self.kind == ContentKind::Flag
    }

    pub fn is_string(&self) -> bool {
        self.kind == ContentKind::String
    }

    /// Anything that is neither a flag nor a string. Nested TLVs count as
    /// "other" for selection purposes.
    pub fn is_other(&self) -> bool {
        matches!(self.kind, ContentKind::NestedTlv | ContentKind::Other)
    }

    /// Whether `len` is a legal payload length for this type.
    pub fn is_valid_length(&self, len: usize) -> bool {
        match self.kind {
            ContentKind::Flag => len == FLAG_PAYLOAD_LEN,
            ContentKind::String | ContentKind::NestedTlv | ContentKind::Other => true,
        }
    }
}
