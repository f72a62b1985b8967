#![allow(missing_docs)]

use rolemine_cluster::{
    FilterStage, RoleCategory, apply_stages, cluster, cluster_context, group_by_fingerprint,
};
use rolemine_types::{
    Application, Assignment, DataContext, MiningFilters, OrganizationalUnit, Permission,
    RoleOrigin, Subject,
};

fn subject(id: &str, first: &str, last: &str, ou: &str) -> Subject {
    Subject {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        org_unit_id: Some(ou.to_string()),
    }
}

fn permission(id: &str, name: &str, app: &str) -> Permission {
    Permission {
        id: id.to_string(),
        name: name.to_string(),
        application_id: Some(app.to_string()),
        description: None,
    }
}

fn application(id: &str, name: &str) -> Application {
    Application {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
    }
}

fn org_unit(id: &str, name: &str) -> OrganizationalUnit {
    OrganizationalUnit {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
    }
}

/// Small directory: HR, Finance and Engineering users over three applications.
fn corpus(assignments: Vec<Assignment>) -> DataContext {
    DataContext::new(
        vec![
            subject("u1", "Alice", "Johnson", "ou-hr"),
            subject("u2", "Bob", "Williams", "ou-hr"),
            subject("u3", "Carol", "Lee", "ou-fin"),
            subject("u4", "Jane", "Smith", "ou-eng"),
            subject("u5", "John", "Doe", "ou-eng"),
            subject("u6", "Dana", "Park", "ou-fin"),
        ],
        vec![
            org_unit("ou-hr", "HR"),
            org_unit("ou-fin", "Finance"),
            org_unit("ou-eng", "Engineering"),
        ],
        vec![
            application("app-hr", "HRPortal"),
            application("app-fin", "FinanceTool"),
            application("app-code", "CodeRepo"),
        ],
        vec![
            permission("p1", "HRView", "app-hr"),
            permission("p2", "HRManage", "app-hr"),
            permission("p3", "FinanceView", "app-fin"),
            permission("p4", "FinanceEdit", "app-fin"),
            permission("p5", "CodeRead", "app-code"),
            permission("p6", "CodeWrite", "app-code"),
        ],
        assignments,
    )
}

fn standard_assignments() -> Vec<Assignment> {
    vec![
        Assignment::new("u1", ["p1", "p2"]),
        Assignment::new("u2", ["p2", "p1"]),
        Assignment::new("u3", ["p3", "p4"]),
        Assignment::new("u6", ["p4", "p3"]),
        Assignment::new("u4", ["p5", "p6"]),
        Assignment::new("u5", ["p5", "p6"]),
    ]
}

#[test]
fn scenario_two_identical_sets_and_a_singleton() {
    let ctx = corpus(vec![
        Assignment::new("u1", ["p1", "p2"]),
        Assignment::new("u2", ["p1", "p2"]),
        Assignment::new("u3", ["p3"]),
    ]);
    let filters = MiningFilters {
        min_members_per_role: 2,
        ..MiningFilters::default()
    };

    let roles = cluster_context(&ctx, &filters);
    assert_eq!(roles.len(), 1, "u3's singleton group must be dropped");
    let role = &roles[0];
    assert_eq!(role.id, 1);
    assert_eq!(role.member_count, 2);
    assert_eq!(role.permission_count, 2);
    assert_eq!(
        role.permissions,
        vec!["HRPortal: HRView".to_string(), "HRPortal: HRManage".to_string()]
    );
    assert_eq!(
        role.members,
        vec!["u1 (Alice Johnson)".to_string(), "u2 (Bob Williams)".to_string()]
    );
    assert_eq!(role.applications, vec!["HRPortal".to_string()]);
    assert_eq!(role.name, "HRPortal Administrator");
    assert_eq!(role.origin, RoleOrigin::Derived);
    assert_eq!(role.confidence, 0);
    assert!(role.attributes.is_empty());
}

#[test]
fn identical_sets_share_a_cluster_regardless_of_order() {
    let groups = group_by_fingerprint(&[
        Assignment::new("a", ["p3", "p1", "p2"]),
        Assignment::new("b", ["p2", "p3", "p1"]),
        Assignment::new("c", ["p1", "p2"]),
        Assignment::new("d", ["p1", "p2", "p4"]),
    ]);
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].subject_ids, vec!["a", "b"]);
    assert_eq!(groups[1].subject_ids, vec!["c"]);
    assert_eq!(groups[2].subject_ids, vec!["d"]);
}

#[test]
fn ids_are_sequential_in_cascade_order() {
    let ctx = corpus(standard_assignments());
    let roles = cluster_context(&ctx, &MiningFilters::default());
    let ids: Vec<u64> = roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "HRPortal Administrator",
            "FinanceTool Editor",
            "CodeRepo Editor"
        ]
    );
}

#[test]
fn empty_fingerprint_is_always_dropped() {
    let ctx = corpus(vec![
        Assignment::new("u1", Vec::<String>::new()),
        Assignment::new("u2", Vec::<String>::new()),
    ]);
    let filters = MiningFilters {
        min_members_per_role: 1,
        ..MiningFilters::default()
    };
    assert!(cluster_context(&ctx, &filters).is_empty());
}

#[test]
fn empty_input_yields_empty_output() {
    let ctx = corpus(Vec::new());
    assert!(cluster_context(&ctx, &MiningFilters::default()).is_empty());
    let empty = DataContext::default();
    assert!(cluster_context(&empty, &MiningFilters::default()).is_empty());
}

#[test]
fn min_members_is_a_lower_bound_and_monotone() {
    let mut assignments = standard_assignments();
    assignments.push(Assignment::new("u7", ["p1", "p2"]));
    assignments.push(Assignment::new("u8", ["p5"]));
    let ctx = corpus(assignments);

    let mut previous = usize::MAX;
    for n in 1..=5 {
        let filters = MiningFilters {
            min_members_per_role: n,
            ..MiningFilters::default()
        };
        let roles = cluster_context(&ctx, &filters);
        assert!(roles.iter().all(|r| r.member_count >= n));
        assert!(roles.len() <= previous, "raising N must not add survivors");
        previous = roles.len();
    }
}

#[test]
fn max_permissions_drops_wide_groups() {
    let ctx = corpus(vec![
        Assignment::new("u1", ["p1", "p2", "p3"]),
        Assignment::new("u2", ["p1", "p2", "p3"]),
        Assignment::new("u3", ["p5"]),
        Assignment::new("u4", ["p5"]),
    ]);
    let filters = MiningFilters {
        max_permissions_per_role: 2,
        ..MiningFilters::default()
    };
    let roles = cluster_context(&ctx, &filters);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].permissions, vec!["CodeRepo: CodeRead".to_string()]);
}

#[test]
fn application_scope_keeps_groups_touching_scope() {
    let ctx = corpus(standard_assignments());
    let filters = MiningFilters::default().with_application_scope(["app-fin", "app-unknown"]);
    let roles = cluster_context(&ctx, &filters);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].applications, vec!["FinanceTool".to_string()]);
}

#[test]
fn org_unit_scope_keeps_groups_with_a_member_in_scope() {
    let ctx = corpus(standard_assignments());
    let filters = MiningFilters::default().with_org_unit_scope(["ou-eng"]);
    let roles = cluster_context(&ctx, &filters);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "CodeRepo Editor");
}

#[test]
fn survivors_do_not_depend_on_stage_order() {
    let mut assignments = standard_assignments();
    assignments.push(Assignment::new("u7", ["p1", "p2", "p3", "p4"]));
    assignments.push(Assignment::new("u8", ["p1", "p2", "p3", "p4"]));
    assignments.push(Assignment::new("u9", Vec::<String>::new()));
    let ctx = corpus(assignments);
    let filters = MiningFilters {
        min_members_per_role: 2,
        max_permissions_per_role: 3,
        ..MiningFilters::default()
    }
    .with_application_scope(["app-hr", "app-code"])
    .with_org_unit_scope(["ou-hr", "ou-eng"]);

    let groups = group_by_fingerprint(ctx.assignments());
    let forward = apply_stages(groups.clone(), &FilterStage::CASCADE, &ctx, &filters);
    let mut reversed_order = FilterStage::CASCADE;
    reversed_order.reverse();
    let reversed = apply_stages(groups.clone(), &reversed_order, &ctx, &filters);
    let shuffled = apply_stages(
        groups,
        &[
            FilterStage::OrgUnitScope,
            FilterStage::MinMembers,
            FilterStage::EmptyFingerprint,
            FilterStage::ApplicationScope,
            FilterStage::MaxPermissions,
        ],
        &ctx,
        &filters,
    );

    assert_eq!(forward.len(), 2);
    assert_eq!(forward, reversed);
    assert_eq!(forward, shuffled);
}

#[test]
fn unresolved_ids_are_omitted_but_counted() {
    let ctx = corpus(vec![
        Assignment::new("u1", ["p1", "p-missing"]),
        Assignment::new("ghost", ["p1", "p-missing"]),
    ]);
    let roles = cluster_context(&ctx, &MiningFilters::default());
    assert_eq!(roles.len(), 1);
    let role = &roles[0];
    assert_eq!(role.member_count, 2);
    assert_eq!(role.members, vec!["u1 (Alice Johnson)".to_string()]);
    assert_eq!(role.permission_count, 2);
    assert_eq!(role.permissions, vec!["HRPortal: HRView".to_string()]);
    assert!(role.is_consistent());
}

#[test]
fn unowned_permissions_use_unknown_application_and_generic_name() {
    let ctx = DataContext::new(
        vec![subject("u1", "Alice", "Johnson", "ou-hr")],
        Vec::new(),
        Vec::new(),
        vec![
            Permission {
                id: "badge".to_string(),
                name: "BuildingAccess".to_string(),
                application_id: None,
                description: None,
            },
            Permission {
                id: "qualified".to_string(),
                name: "Legacy: ReadOnly".to_string(),
                application_id: None,
                description: None,
            },
        ],
        vec![Assignment::new("u1", ["badge", "qualified"])],
    );
    let filters = MiningFilters {
        min_members_per_role: 1,
        ..MiningFilters::default()
    };
    let roles = cluster(ctx.assignments(), &ctx, &filters);
    assert_eq!(roles.len(), 1);
    assert_eq!(
        roles[0].permissions,
        vec![
            "Unknown: BuildingAccess".to_string(),
            "Legacy: ReadOnly".to_string()
        ]
    );
    assert!(roles[0].applications.is_empty());
    assert_eq!(roles[0].name, "Multi-App Viewer");
}

#[test]
fn naming_round_trip_reproduces_category_suffix() {
    let mut assignments = standard_assignments();
    assignments.push(Assignment::new("u7", ["p1", "p3"]));
    assignments.push(Assignment::new("u8", ["p3", "p1"]));
    let ctx = corpus(assignments);
    let roles = cluster_context(&ctx, &MiningFilters::default());
    assert!(!roles.is_empty());
    for role in &roles {
        let from_name = RoleCategory::from_role_name(&role.name);
        let from_permissions = RoleCategory::from_labels(&role.permissions);
        assert_eq!(from_name, Some(from_permissions), "role {}", role.name);
    }
}
