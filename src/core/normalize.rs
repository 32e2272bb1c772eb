//! Dungeon identity normalization
//!
//! Statistic descriptions look like `"<Base> (<Variant>)"`. Which half becomes
//! the merge key is a policy: the parenthetical variant (historical behavior)
//! or the base dungeon name.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::EngineError;

static IDENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) \((.*)\)$").expect("identity pattern compiles"));

/// Which capture of the identity pattern is the canonical key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum IdentityPolicy {
    /// Parenthetical segment, e.g. "Normal" for "Ragefire Chasm (Normal)"
    #[default]
    Variant,
    /// Base name with every trailing parenthetical stripped
    Base,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IdentityNormalizer {
    policy: IdentityPolicy,
}

impl IdentityNormalizer {
    pub(crate) fn new(policy: IdentityPolicy) -> Self {
        Self { policy }
    }

    /// Extract the canonical identity, failing when the pattern does not match
    pub(crate) fn normalize<'a>(&self, description: &'a str) -> Result<&'a str, EngineError> {
        let (base, variant) = split(description).ok_or_else(|| EngineError::UnparseableIdentity {
            description: description.to_string(),
        })?;

        match self.policy {
            IdentityPolicy::Variant => Ok(variant.trim()),
            IdentityPolicy::Base => {
                // "Foo (A) (B)" -> "Foo", so a base identity never re-matches
                let mut base = base.trim();
                while let Some((inner, _)) = split(base) {
                    base = inner.trim();
                }
                Ok(base)
            }
        }
    }

    /// Identity used for descriptions without a parenthetical segment
    pub(crate) fn fallback<'a>(&self, description: &'a str) -> &'a str {
        description.trim()
    }
}

fn split(description: &str) -> Option<(&str, &str)> {
    let caps = IDENTITY_PATTERN.captures(description)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
