use std::collections::HashMap;

use crate::descriptor::{Cardinality, TypeDescriptor};
use crate::error::RegistryError;
use crate::tlv_type as t;

/// Immutable table mapping type ids to their [`TypeDescriptor`].
///
/// Built once and only read afterwards, so a single registry can be shared
/// freely (it is `Send + Sync`). Every mutation decision goes through this
/// table; nothing downstream hard-codes per-type behaviour.
///
/// Lookups are a direct index into a dense slot table covering
/// `lowest..=highest`.
///
/// # Example
///
/// ```rust
/// use tlvm_types::{ContentKind, TypeRegistry, tlv_type};
///
/// let registry = TypeRegistry::standard();
/// let url = registry.lookup(tlv_type::URL).unwrap();
/// assert_eq!(url.kind, ContentKind::String);
/// assert!(!registry.allows_multiple(tlv_type::URL));
/// assert!(registry.allows_multiple(tlv_type::HEADER));
/// assert!(!registry.is_valid_type(tlv_type::MIME_PART_NAME));
/// ```
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    lowest: u16,
    highest: u16,
    slots: Vec<Option<TypeDescriptor>>,
}

impl TypeRegistry {
    /// The built-in table of HTTP-client option types.
    ///
    /// ```text
    /// ┌───────────────────────────────────┬──────────────────────────────┐
    /// │ Kind                              │ Type ids                     │
    /// ├───────────────────────────────────┼──────────────────────────────┤
    /// │ interesting composing string      │ RESPONSE0..RESPONSE10        │
    /// │ composing string                  │ HEADER, MAIL_RECIPIENT       │
    /// │ singleton nested TLV              │ MIME_PART                    │
    /// │ singleton flag                    │ UPLOAD1, HTTPAUTH, NOBODY .. │
    /// │ singleton string                  │ URL, USERNAME, COOKIE ..     │
    /// └───────────────────────────────────┴──────────────────────────────┘
    /// ```
    pub fn standard() -> Self {
        Self::build(standard_descriptors())
    }

    /// Build a registry from a custom descriptor list.
    ///
    /// The valid type id range becomes `min(type_id)..=max(type_id)`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Empty`] if `descriptors` is empty.
    /// - [`RegistryError::ReservedTypeId`] if a descriptor uses id 0.
    /// - [`RegistryError::DuplicateTypeId`] if two descriptors share an id.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<Self, RegistryError> {
        let descriptors: Vec<TypeDescriptor> = descriptors.into_iter().collect();
        if descriptors.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen: HashMap<u16, &'static str> = HashMap::new();
        for d in &descriptors {
            if d.type_id == 0 {
                return Err(RegistryError::ReservedTypeId { name: d.name });
            }
            if let Some(first) = seen.insert(d.type_id, d.name) {
                return Err(RegistryError::DuplicateTypeId {
                    type_id: d.type_id,
                    first,
                    second: d.name,
                });
            }
        }

        Ok(Self::build(descriptors))
    }

    fn build(descriptors: Vec<TypeDescriptor>) -> Self {
        let lowest = descriptors.iter().map(|d| d.type_id).min().unwrap_or(t::LOWEST);
        let highest = descriptors.iter().map(|d| d.type_id).max().unwrap_or(t::HIGHEST);

        let mut slots = vec![None; usize::from(highest - lowest) + 1];
        for d in descriptors {
            slots[usize::from(d.type_id - lowest)] = Some(d);
        }

        Self {
            lowest,
            highest,
            slots,
        }
    }

    /// Smallest type id in the valid range.
    pub fn lowest(&self) -> u16 {
        self.lowest
    }

    /// Largest type id in the valid range.
    pub fn highest(&self) -> u16 {
        self.highest
    }

    /// Whether `type_id` lies in `lowest..=highest`. Ids in range may still
    /// be unregistered.
    pub fn in_range(&self, type_id: u16) -> bool {
        (self.lowest..=self.highest).contains(&type_id)
    }

    pub fn lookup(&self, type_id: u16) -> Option<&TypeDescriptor> {
        if !self.in_range(type_id) {
            return None;
        }
        self.slots[usize::from(type_id - self.lowest)].as_ref()
    }

    pub fn is_valid_type(&self, type_id: u16) -> bool {
        self.lookup(type_id).is_some()
    }

    /// Whether `len` is a legal payload length for `type_id`. Always false
    /// for unregistered ids.
    pub fn is_valid_length(&self, type_id: u16, len: usize) -> bool {
        self.lookup(type_id).is_some_and(|d| d.is_valid_length(len))
    }

    /// Whether `type_id` may appear more than once. Unregistered ids are
    /// treated as set-once.
    pub fn allows_multiple(&self, type_id: u16) -> bool {
        self.lookup(type_id).is_some_and(TypeDescriptor::allows_multiple)
    }

    /// Display name for `type_id`, or `None` if unregistered.
    pub fn name_of(&self, type_id: u16) -> Option<&'static str> {
        self.lookup(type_id).map(|d| d.name)
    }

    /// Find a registered type by its display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&TypeDescriptor> {
        self.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// All registered descriptors in ascending type id order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.slots.iter().flatten()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_descriptors() -> Vec<TypeDescriptor> {
    use Cardinality::{Composing, Singleton};

    vec![
        // Server responses: large and worth most of the mutation effort.
        TypeDescriptor::string(t::RESPONSE0, "RESPONSE0", Composing, true),
        TypeDescriptor::string(t::RESPONSE1, "RESPONSE1", Composing, true),
        TypeDescriptor::string(t::RESPONSE2, "RESPONSE2", Composing, true),
        TypeDescriptor::string(t::RESPONSE3, "RESPONSE3", Composing, true),
        TypeDescriptor::string(t::RESPONSE4, "RESPONSE4", Composing, true),
        TypeDescriptor::string(t::RESPONSE5, "RESPONSE5", Composing, true),
        TypeDescriptor::string(t::RESPONSE6, "RESPONSE6", Composing, true),
        TypeDescriptor::string(t::RESPONSE7, "RESPONSE7", Composing, true),
        TypeDescriptor::string(t::RESPONSE8, "RESPONSE8", Composing, true),
        TypeDescriptor::string(t::RESPONSE9, "RESPONSE9", Composing, true),
        TypeDescriptor::string(t::RESPONSE10, "RESPONSE10", Composing, true),
        // String lists.
        TypeDescriptor::string(t::HEADER, "HEADER", Composing, false),
        TypeDescriptor::string(t::MAIL_RECIPIENT, "MAIL_RECIPIENT", Composing, false),
        TypeDescriptor::nested(t::MIME_PART, "MIME_PART", Singleton),
        TypeDescriptor::string(t::POSTFIELDS, "POSTFIELDS", Singleton, false),
        // u32 options.
        TypeDescriptor::flag(t::UPLOAD1, "UPLOAD1"),
        TypeDescriptor::flag(t::HTTPAUTH, "HTTPAUTH"),
        TypeDescriptor::flag(t::OPTHEADER, "OPTHEADER"),
        TypeDescriptor::flag(t::NOBODY, "NOBODY"),
        TypeDescriptor::flag(t::FOLLOWLOCATION, "FOLLOWLOCATION"),
        TypeDescriptor::flag(t::WILDCARDMATCH, "WILDCARDMATCH"),
        TypeDescriptor::flag(t::RTSP_REQUEST, "RTSP_REQUEST"),
        TypeDescriptor::flag(t::RTSP_CLIENT_CSEQ, "RTSP_CLIENT_CSEQ"),
        TypeDescriptor::flag(t::HTTP_VERSION, "HTTP_VERSION"),
        TypeDescriptor::flag(t::FAILONERROR, "FAILONERROR"),
        TypeDescriptor::flag(t::PROXYPORT, "PROXYPORT"),
        TypeDescriptor::flag(t::PROXYAUTH, "PROXYAUTH"),
        TypeDescriptor::flag(t::HTTPPROXYTUNNEL, "HTTPPROXYTUNNEL"),
        TypeDescriptor::flag(t::SUPPRESS_CONNECT_HEADERS, "SUPPRESS_CONNECT_HEADERS"),
        TypeDescriptor::flag(t::TIMEVALUE, "TIMEVALUE"),
        TypeDescriptor::flag(t::TIMECONDITION, "TIMECONDITION"),
        // Short set-once strings.
        TypeDescriptor::string(t::URL, "URL", Singleton, false),
        TypeDescriptor::string(t::DOH_URL, "DOH_URL", Singleton, false),
        TypeDescriptor::string(t::PROXY_URL, "PROXY_URL", Singleton, false),
        TypeDescriptor::string(t::PROXYUSERPWD, "PROXYUSERPWD", Singleton, false),
        TypeDescriptor::string(t::USERNAME, "USERNAME", Singleton, false),
        TypeDescriptor::string(t::PASSWORD, "PASSWORD", Singleton, false),
        TypeDescriptor::string(t::COOKIE, "COOKIE", Singleton, false),
        TypeDescriptor::string(t::RANGE, "RANGE", Singleton, false),
        TypeDescriptor::string(t::CUSTOMREQUEST, "CUSTOMREQUEST", Singleton, false),
        TypeDescriptor::string(t::MAIL_FROM, "MAIL_FROM", Singleton, false),
        TypeDescriptor::string(t::ACCEPTENCODING, "ACCEPTENCODING", Singleton, false),
        TypeDescriptor::string(t::RTSP_SESSION_ID, "RTSP_SESSION_ID", Singleton, false),
        TypeDescriptor::string(t::RTSP_STREAM_URI, "RTSP_STREAM_URI", Singleton, false),
        TypeDescriptor::string(t::RTSP_TRANSPORT, "RTSP_TRANSPORT", Singleton, false),
        TypeDescriptor::string(t::MAIL_AUTH, "MAIL_AUTH", Singleton, false),
    ]
}
