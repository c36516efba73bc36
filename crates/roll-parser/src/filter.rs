//! Inclusion filter shared by the credits parsers.

use roll_core::InclusionPolicy;

use crate::canonical::NameCanonicalizer;

/// Policy lookups plus contributor admission.
///
/// A section label matching neither section set leaves the parser's current
/// section state unchanged.
#[derive(Debug, Clone, Copy)]
pub struct InclusionFilter<'p> {
    policy: &'p InclusionPolicy,
    canonicalizer: NameCanonicalizer<'p>,
}

impl<'p> InclusionFilter<'p> {
    #[must_use]
    pub const fn new(policy: &'p InclusionPolicy) -> Self {
        Self {
            policy,
            canonicalizer: NameCanonicalizer::new(policy),
        }
    }

    #[must_use]
    pub fn is_included_section(&self, label: &str) -> bool {
        self.policy.is_included_section(label)
    }

    #[must_use]
    pub fn is_excluded_section(&self, label: &str) -> bool {
        self.policy.is_excluded_section(label)
    }

    #[must_use]
    pub fn is_excluded_role(&self, label: &str) -> bool {
        self.policy.is_excluded_role(label)
    }

    #[must_use]
    pub fn is_excluded_entity(&self, name: &str) -> bool {
        self.policy.is_excluded_entity(name)
    }

    #[must_use]
    pub const fn canonicalizer(&self) -> NameCanonicalizer<'p> {
        self.canonicalizer
    }

    /// Canonicalize `raw` and admit it unless it is empty or an excluded
    /// entity.
    #[must_use]
    pub fn contributor(&self, raw: &str) -> Option<String> {
        let name = self.canonicalizer.canonicalize(raw);
        (!name.is_empty() && !self.is_excluded_entity(&name)).then_some(name)
    }

    /// Role label to activate for `label`, or `None` when it is empty or an
    /// excluded role.
    #[must_use]
    pub fn role(&self, label: &str) -> Option<String> {
        (!label.is_empty() && !self.is_excluded_role(label)).then(|| label.to_string())
    }
}
