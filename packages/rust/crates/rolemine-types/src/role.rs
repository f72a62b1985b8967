//! Role record: the output unit of both engines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute key holding a free-text justification.
pub const JUSTIFICATION_ATTRIBUTE: &str = "justification";
/// Attribute key naming the interpreter strategy that produced a suggested role.
pub const STRATEGY_ATTRIBUTE: &str = "strategy";

/// Provenance of a role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleOrigin {
    /// Produced by fingerprint clustering.
    Derived,
    /// Produced by interpreting generation-service output.
    Suggested,
}

impl RoleOrigin {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::Suggested => "suggested",
        }
    }

    /// Whether the role came from the generation service.
    #[must_use]
    pub const fn is_suggested(self) -> bool {
        matches!(self, Self::Suggested)
    }
}

/// Candidate reusable permission bundle.
///
/// `member_count` may exceed `members.len()` when the count is known but the
/// member names are not; `members` is then empty or partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    /// Unique within a single mining run.
    pub id: u64,
    /// Human-readable, non-empty.
    pub name: String,
    /// Number of members, including ones that could not be described.
    pub member_count: usize,
    /// Member descriptors, e.g. `"u1 (Alice Johnson)"`.
    pub members: Vec<String>,
    /// Permission labels, typically `"<application>: <permission>"`.
    pub permissions: Vec<String>,
    /// Number of permissions, including ones that could not be labelled.
    pub permission_count: usize,
    /// Application names implicated by `permissions`.
    pub applications: Vec<String>,
    /// Provenance.
    pub origin: RoleOrigin,
    /// 0-100; always 0 for derived roles.
    pub confidence: u8,
    /// Extensible metadata; absent keys are simply not present.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl RoleRecord {
    /// Empty record with the given identity; callers fill the remaining fields.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, origin: RoleOrigin) -> Self {
        Self {
            id,
            name: name.into(),
            member_count: 0,
            members: Vec::new(),
            permissions: Vec::new(),
            permission_count: 0,
            applications: Vec::new(),
            origin,
            confidence: 0,
            attributes: BTreeMap::new(),
        }
    }

    /// Justification attribute, if present.
    #[must_use]
    pub fn justification(&self) -> Option<&str> {
        self.attributes
            .get(JUSTIFICATION_ATTRIBUTE)
            .map(String::as_str)
    }

    /// Whether the counts agree with the detail lists.
    ///
    /// `members` may legitimately be empty while `member_count > 0`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let permissions_ok = self.permission_count >= self.permissions.len();
        let members_ok = self.members.is_empty() || self.member_count >= self.members.len();
        permissions_ok && members_ok && !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_serializes_as_upper_snake() {
        let json = serde_json::to_string(&RoleOrigin::Suggested).expect("serialize");
        assert_eq!(json, "\"SUGGESTED\"");
    }

    #[test]
    fn record_uses_camel_case_and_skips_empty_attributes() {
        let record = RoleRecord::new(1, "HRPortal Viewer", RoleOrigin::Derived);
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("memberCount").is_some());
        assert!(json.get("permissionCount").is_some());
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn count_known_members_unknown_is_consistent() {
        let mut record = RoleRecord::new(101, "Auditors", RoleOrigin::Suggested);
        record.member_count = 4;
        assert!(record.is_consistent());
        record.name = "  ".to_string();
        assert!(!record.is_consistent());
    }

    #[test]
    fn counts_may_exceed_listed_details() {
        let mut record = RoleRecord::new(1, "HRPortal Viewer", RoleOrigin::Derived);
        record.permissions = vec!["HRPortal: HRView".to_string()];
        record.permission_count = 2;
        record.members = vec!["u1 (Alice Johnson)".to_string()];
        record.member_count = 60;
        assert!(record.is_consistent());

        record.permission_count = 0;
        assert!(!record.is_consistent());
        record.permission_count = 1;
        record.member_count = 0;
        assert!(!record.is_consistent());
    }
}
