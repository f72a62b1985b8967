//! Canonical permission-set keys.

use std::collections::BTreeSet;
use std::fmt;

/// Sorted, comma-joined permission ids.
///
/// The string itself is the clustering key; equal sets always produce equal
/// fingerprints regardless of the order the grants were recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of an arbitrary id collection; duplicates collapse.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::from_set(&sorted)
    }

    /// Fingerprint of an already sorted set.
    #[must_use]
    pub fn from_set(ids: &BTreeSet<String>) -> Self {
        let joined = ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }

    /// The comma-joined id list.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A subject with no grants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subjects sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    /// Shared permission set.
    pub fingerprint: Fingerprint,
    /// Permission ids in fingerprint (sorted) order.
    pub permission_ids: Vec<String>,
    /// Subject ids in assignment order.
    pub subject_ids: Vec<String>,
}

impl PermissionGroup {
    /// Number of grouped subjects.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.subject_ids.len()
    }

    /// Number of permission ids in the fingerprint.
    #[must_use]
    pub fn permission_count(&self) -> usize {
        self.permission_ids.len()
    }
}
