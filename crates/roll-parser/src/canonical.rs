//! Contributor name canonicalization.

use roll_core::{InclusionPolicy, clean_name};

/// Maps raw contributor strings to one canonical identity.
///
/// Cleaning strips nicknames and remarks; the policy's alias table then
/// resolves known spellings. Alias targets are validated to be clean and
/// not aliases themselves, which keeps the mapping idempotent.
#[derive(Debug, Clone, Copy)]
pub struct NameCanonicalizer<'p> {
    policy: &'p InclusionPolicy,
}

impl<'p> NameCanonicalizer<'p> {
    #[must_use]
    pub const fn new(policy: &'p InclusionPolicy) -> Self {
        Self { policy }
    }

    /// Canonical form of `raw`. An empty string means no name was present.
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> String {
        let cleaned = clean_name(raw);
        match self.policy.alias_for(&cleaned) {
            Some(canonical) => canonical.to_string(),
            None => cleaned,
        }
    }
}
