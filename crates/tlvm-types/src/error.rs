/// Errors that can occur when building a [`TypeRegistry`](crate::TypeRegistry)
/// from a custom descriptor list.
///
/// The built-in table can never produce these; they exist so that callers
/// assembling their own table find out at construction time rather than
/// through a mutator that silently treats half its types as garbage.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Variant          │ Cause                                        │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ Empty            │ no descriptors at all                        │
/// │ DuplicateTypeId  │ two descriptors claim the same type id       │
/// │ ReservedTypeId   │ type id 0, which the wire never uses         │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a type registry needs at least one descriptor")]
    Empty,

    #[error("type id {type_id} is registered twice ({first} and {second})")]
    DuplicateTypeId {
        type_id: u16,
        first: &'static str,
        second: &'static str,
    },

    #[error("type id 0 is reserved (descriptor {name})")]
    ReservedTypeId { name: &'static str },
}
