//! Acceptance filters for a mining run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum group size.
pub const DEFAULT_MIN_MEMBERS_PER_ROLE: usize = 2;
/// Default maximum permissions per role.
pub const DEFAULT_MAX_PERMISSIONS_PER_ROLE: usize = 10;

/// Invalid filter configuration (boundary validation only; engines clamp instead).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// `min_members_per_role` below 1.
    #[error("minimum members per role must be at least 1 (got {0})")]
    MinMembersTooSmall(usize),
    /// `max_permissions_per_role` below 1.
    #[error("maximum permissions per role must be at least 1 (got {0})")]
    MaxPermissionsTooSmall(usize),
}

/// Filter configuration recognised by the clustering engine and orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningFilters {
    /// Drop groups with fewer members.
    pub min_members_per_role: usize,
    /// Drop groups with more permissions.
    pub max_permissions_per_role: usize,
    /// Keep only groups touching at least one of these application ids.
    pub application_scope: Option<BTreeSet<String>>,
    /// Keep only groups with at least one member in these org-unit ids.
    pub org_unit_scope: Option<BTreeSet<String>>,
    /// Request generation-service augmentation.
    pub use_ai: bool,
}

impl Default for MiningFilters {
    fn default() -> Self {
        Self {
            min_members_per_role: DEFAULT_MIN_MEMBERS_PER_ROLE,
            max_permissions_per_role: DEFAULT_MAX_PERMISSIONS_PER_ROLE,
            application_scope: None,
            org_unit_scope: None,
            use_ai: true,
        }
    }
}

impl MiningFilters {
    /// Reject values below 1.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.min_members_per_role < 1 {
            return Err(FilterError::MinMembersTooSmall(self.min_members_per_role));
        }
        if self.max_permissions_per_role < 1 {
            return Err(FilterError::MaxPermissionsTooSmall(
                self.max_permissions_per_role,
            ));
        }
        Ok(())
    }

    /// Minimum members, clamped to at least 1.
    #[must_use]
    pub fn effective_min_members(&self) -> usize {
        self.min_members_per_role.max(1)
    }

    /// Maximum permissions, clamped to at least 1.
    #[must_use]
    pub fn effective_max_permissions(&self) -> usize {
        self.max_permissions_per_role.max(1)
    }

    /// Application scope, `None` when absent or empty.
    #[must_use]
    pub fn active_application_scope(&self) -> Option<&BTreeSet<String>> {
        self.application_scope.as_ref().filter(|s| !s.is_empty())
    }

    /// Org-unit scope, `None` when absent or empty.
    #[must_use]
    pub fn active_org_unit_scope(&self) -> Option<&BTreeSet<String>> {
        self.org_unit_scope.as_ref().filter(|s| !s.is_empty())
    }

    /// Builder-style setter for the application scope.
    #[must_use]
    pub fn with_application_scope<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.application_scope = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Builder-style setter for the org-unit scope.
    #[must_use]
    pub fn with_org_unit_scope<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.org_unit_scope = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_two_members_ten_permissions() {
        let filters = MiningFilters::default();
        assert_eq!(filters.min_members_per_role, 2);
        assert_eq!(filters.max_permissions_per_role, 10);
        assert!(filters.use_ai);
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_thresholds() {
        let filters = MiningFilters {
            min_members_per_role: 0,
            ..MiningFilters::default()
        };
        assert_eq!(filters.validate(), Err(FilterError::MinMembersTooSmall(0)));
        assert_eq!(filters.effective_min_members(), 1);

        let filters = MiningFilters {
            max_permissions_per_role: 0,
            ..MiningFilters::default()
        };
        assert_eq!(
            filters.validate(),
            Err(FilterError::MaxPermissionsTooSmall(0))
        );
    }

    #[test]
    fn empty_scope_counts_as_absent() {
        let filters = MiningFilters::default().with_application_scope(Vec::<String>::new());
        assert!(filters.active_application_scope().is_none());
        let filters = MiningFilters::default().with_org_unit_scope(["ou-hr"]);
        assert_eq!(filters.active_org_unit_scope().map(BTreeSet::len), Some(1));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let filters: MiningFilters =
            serde_json::from_str(r#"{"min_members_per_role": 3}"#).expect("deserialize");
        assert_eq!(filters.min_members_per_role, 3);
        assert_eq!(filters.max_permissions_per_role, 10);
    }
}
