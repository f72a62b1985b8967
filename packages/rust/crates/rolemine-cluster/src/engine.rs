//! Clustering entry points and role synthesis.

use std::collections::HashMap;

use rolemine_types::{
    Assignment, DataContext, EntityResolver, MiningFilters, RoleOrigin, RoleRecord,
};

use crate::fingerprint::{Fingerprint, PermissionGroup};
use crate::naming::role_name;
use crate::stages::{FilterStage, apply_stages};

/// Application name used in a permission label when the owner is unknown.
const UNKNOWN_APPLICATION: &str = "Unknown";

/// Group subjects by fingerprint.
///
/// Groups are returned in the order their fingerprint is first seen;
/// subjects keep assignment order inside each group.
#[must_use]
pub fn group_by_fingerprint(assignments: &[Assignment]) -> Vec<PermissionGroup> {
    let mut groups: Vec<PermissionGroup> = Vec::new();
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    for assignment in assignments {
        let fingerprint = Fingerprint::from_set(&assignment.permission_ids);
        if let Some(group) = index.get(&fingerprint).and_then(|&i| groups.get_mut(i)) {
            group.subject_ids.push(assignment.subject_id.clone());
            continue;
        }
        index.insert(fingerprint.clone(), groups.len());
        groups.push(PermissionGroup {
            fingerprint,
            permission_ids: assignment.permission_ids.iter().cloned().collect(),
            subject_ids: vec![assignment.subject_id.clone()],
        });
    }
    groups
}

/// Cluster assignments into derived roles.
///
/// Never fails: unresolvable ids are left out of the detail lists but still
/// counted, and empty input yields an empty list.
pub fn cluster<R: EntityResolver + ?Sized>(
    assignments: &[Assignment],
    resolver: &R,
    filters: &MiningFilters,
) -> Vec<RoleRecord> {
    let groups = group_by_fingerprint(assignments);
    tracing::info!(
        event = "cluster.grouped",
        subjects = assignments.len(),
        groups = groups.len(),
        "grouped subjects into distinct permission sets"
    );

    let survivors = apply_stages(groups, &FilterStage::CASCADE, resolver, filters);

    let roles: Vec<RoleRecord> = survivors
        .iter()
        .zip(1_u64..)
        .map(|(group, id)| synthesize_role(id, group, resolver))
        .collect();
    tracing::info!(
        event = "cluster.completed",
        roles = roles.len(),
        "derived roles through clustering"
    );
    roles
}

/// Cluster every assignment held by `ctx`.
#[must_use]
pub fn cluster_context(ctx: &DataContext, filters: &MiningFilters) -> Vec<RoleRecord> {
    cluster(ctx.assignments(), ctx, filters)
}

fn synthesize_role<R: EntityResolver + ?Sized>(
    id: u64,
    group: &PermissionGroup,
    resolver: &R,
) -> RoleRecord {
    let members: Vec<String> = group
        .subject_ids
        .iter()
        .filter_map(|subject_id| resolver.subject(subject_id))
        .map(rolemine_types::Subject::descriptor)
        .collect();

    let mut permissions = Vec::with_capacity(group.permission_count());
    let mut applications: Vec<String> = Vec::new();
    for permission in group
        .permission_ids
        .iter()
        .filter_map(|permission_id| resolver.permission(permission_id))
    {
        let application = resolver.permission_application(permission);
        if let Some(app) = application
            && !applications.contains(&app.name)
        {
            applications.push(app.name.clone());
        }
        if permission.name.contains(':') {
            permissions.push(permission.name.clone());
        } else {
            let app_name = application.map_or(UNKNOWN_APPLICATION, |a| a.name.as_str());
            permissions.push(format!("{app_name}: {}", permission.name));
        }
    }

    let name = role_name(&applications, &permissions);
    tracing::debug!(
        event = "cluster.role.created",
        role_id = id,
        name = %name,
        members = group.member_count(),
        permissions = group.permission_count(),
        "created derived role"
    );

    let mut role = RoleRecord::new(id, name, RoleOrigin::Derived);
    role.member_count = group.member_count();
    role.members = members;
    role.permission_count = group.permission_count();
    role.permissions = permissions;
    role.applications = applications;
    role
}
