//! Account identities.
//!
//! An identity is an opaque string handle. Equality is exact string match;
//! ordering is lexicographic so that `BTreeSet` enumeration is stable within
//! a run, which keeps dry-run output reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A social-media account handle, treated as an opaque string key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a raw handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Parse an identity from either a bare handle or a profile URL.
    ///
    /// Accepts inputs like `alice`, `@alice`, `https://example.com/alice/`,
    /// or `example.com/alice?tab=posts` and extracts the handle: the first
    /// path segment after the host, with surrounding slashes, a leading `@`,
    /// and any query suffix stripped.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        // Strip scheme and host if this looks like a URL.
        let after_host = match trimmed.find("://") {
            Some(idx) => {
                let rest = &trimmed[idx + 3..];
                rest.find('/').map(|slash| &rest[slash + 1..]).unwrap_or("")
            }
            None if trimmed.contains('/') && trimmed.contains('.') => {
                // Host without scheme, e.g. `example.com/alice`
                match trimmed.find('/') {
                    Some(slash) => &trimmed[slash + 1..],
                    None => trimmed,
                }
            }
            None => trimmed,
        };

        let handle = after_host
            .split(['/', '?', '#'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(after_host);

        Self(handle.trim_start_matches('@').to_string())
    }

    /// The handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for Identity {
    fn from(handle: String) -> Self {
        Self::new(handle)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
