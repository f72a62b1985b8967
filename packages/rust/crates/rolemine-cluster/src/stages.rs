//! Filter cascade. Each stage is an independent predicate over one group, so
//! the set of survivors does not depend on the order stages run in.

use rolemine_types::{EntityResolver, MiningFilters};

use crate::fingerprint::PermissionGroup;

/// One acceptance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    /// Always drops groups without permissions.
    EmptyFingerprint,
    /// Fewer members than the minimum.
    MinMembers,
    /// More permissions than the maximum.
    MaxPermissions,
    /// No-op unless an application scope is configured.
    ApplicationScope,
    /// No-op unless an org-unit scope is configured.
    OrgUnitScope,
}

impl FilterStage {
    /// Cascade order used by the engine.
    pub const CASCADE: [Self; 5] = [
        Self::EmptyFingerprint,
        Self::MinMembers,
        Self::MaxPermissions,
        Self::ApplicationScope,
        Self::OrgUnitScope,
    ];

    /// Stage name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyFingerprint => "empty_fingerprint",
            Self::MinMembers => "min_members",
            Self::MaxPermissions => "max_permissions",
            Self::ApplicationScope => "application_scope",
            Self::OrgUnitScope => "org_unit_scope",
        }
    }

    /// Whether `group` survives this stage.
    pub fn keeps<R: EntityResolver + ?Sized>(
        self,
        group: &PermissionGroup,
        resolver: &R,
        filters: &MiningFilters,
    ) -> bool {
        match self {
            Self::EmptyFingerprint => !group.fingerprint.is_empty(),
            Self::MinMembers => group.member_count() >= filters.effective_min_members(),
            Self::MaxPermissions => group.permission_count() <= filters.effective_max_permissions(),
            Self::ApplicationScope => {
                let Some(scope) = filters.active_application_scope() else {
                    return true;
                };
                group.permission_ids.iter().any(|id| {
                    resolver
                        .permission(id)
                        .and_then(|p| p.application_id.as_deref())
                        .is_some_and(|app_id| scope.contains(app_id))
                })
            }
            Self::OrgUnitScope => {
                let Some(scope) = filters.active_org_unit_scope() else {
                    return true;
                };
                group.subject_ids.iter().any(|id| {
                    resolver
                        .subject(id)
                        .and_then(|s| s.org_unit_id.as_deref())
                        .is_some_and(|ou| scope.contains(ou))
                })
            }
        }
    }
}

/// Run `stages` in the given order, removing groups without reordering the rest.
pub fn apply_stages<R: EntityResolver + ?Sized>(
    mut groups: Vec<PermissionGroup>,
    stages: &[FilterStage],
    resolver: &R,
    filters: &MiningFilters,
) -> Vec<PermissionGroup> {
    for stage in stages {
        let before = groups.len();
        groups.retain(|group| stage.keeps(group, resolver, filters));
        tracing::debug!(
            event = "cluster.filter.stage",
            stage = stage.as_str(),
            before,
            after = groups.len(),
            "filter stage applied"
        );
    }
    groups
}
