//! Node address type.

use serde::Serialize;
use std::fmt;

/// Identifier of a node in the membership set.
///
/// Addresses are opaque strings; equality and ordering are lexicographic.
/// Positional semantics (who a node fans out to) come from the address
/// book's ordering, not from the address itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeAddress(String);

impl NodeAddress {
    /// Create an address from anything string-like.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeAddress {
    fn from(addr: &str) -> Self {
        Self(addr.to_owned())
    }
}

impl From<String> for NodeAddress {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}
