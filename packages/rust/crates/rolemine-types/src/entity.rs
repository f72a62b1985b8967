//! Ingested entities. Read-only to the engines.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A user holding entitlements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable subject identifier (e.g. `u1001`).
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Owning organizational unit, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit_id: Option<String>,
}

impl Subject {
    /// `"<first> <last>"`, trimmed when either part is blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Member descriptor used in role records: `"<id> (<display name>)"`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("{} ({})", self.id, self.display_name())
    }
}

/// Organizational unit (department).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalUnit {
    /// Unit identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Application owning a set of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application identifier.
    pub id: String,
    /// Display name, used in permission labels and role names.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission identifier.
    pub id: String,
    /// Display name (e.g. `HRView`, or already qualified as `HRPortal: HRView`).
    pub name: String,
    /// Owning application, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Pre-aggregated grant: one record per subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Subject receiving the grants.
    pub subject_id: String,
    /// Granted permission ids (set semantics).
    pub permission_ids: BTreeSet<String>,
}

impl Assignment {
    /// Build an assignment from any iterable of permission ids; duplicates collapse.
    pub fn new<I, S>(subject_id: impl Into<String>, permission_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id: subject_id.into(),
            permission_ids: permission_ids.into_iter().map(Into::into).collect(),
        }
    }
}
