//! Document revision counter used for optimistic concurrency control.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing revision of a stored document.
///
/// A replace only succeeds when the caller presents the revision it read,
/// so a stale read-modify-write cycle fails instead of silently losing
/// the concurrent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly created document.
    pub fn initial() -> Self {
        Self(1)
    }

    /// Revision after one successful replace.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Reconstructs a revision from a raw counter value.
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_revision_is_one() {
        assert_eq!(Revision::initial().value(), 1);
    }

    #[test]
    fn next_increments() {
        let rev = Revision::initial().next().next();
        assert_eq!(rev.value(), 3);
    }

    #[test]
    fn revisions_are_ordered() {
        assert!(Revision::initial() < Revision::initial().next());
    }
}
