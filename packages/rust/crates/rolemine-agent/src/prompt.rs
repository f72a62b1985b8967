//! Prompt construction for the generation service.

use std::fmt::Write as _;

use rolemine_types::{DataContext, EntityResolver};

/// Org-unit / application placeholder for unresolvable references.
const UNKNOWN: &str = "Unknown";

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a role engineering expert. Analyze user permissions and \
suggest appropriate roles based on common access patterns. Look for clusters of permissions that \
are frequently assigned together and might represent a logical business role.";

const INSTRUCTIONS: &str = "\
Analyze these user permission assignments and suggest 3-5 business roles. For each role, provide: \
1) A descriptive name, 2) Key permissions that define this role, 3) Estimated user count, \
4) Confidence level (0-100), and 5) A brief justification.

Your response MUST follow this exact format for each role:

Role 1:
Name: [Role Name]
Key permissions:
- [Permission 1]
- [Permission 2]
Estimated user count: [Number]
Confidence: [Number 0-100]
Justification: [Brief explanation]

Role 2:
[...and so on]

User Permission Data:
";

/// User prompt: instructions followed by one block per resolvable subject,
/// in assignment order.
#[must_use]
pub fn build_prompt(ctx: &DataContext) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    prompt.push_str(&format_assignments(ctx));
    prompt
}

/// `User:` / `Permissions:` blocks for every subject that resolves.
#[must_use]
pub fn format_assignments(ctx: &DataContext) -> String {
    let mut out = String::new();
    for assignment in ctx.assignments() {
        let Some(subject) = ctx.subject(&assignment.subject_id) else {
            continue;
        };
        let org_unit = subject
            .org_unit_id
            .as_deref()
            .and_then(|id| ctx.org_unit(id))
            .map_or(UNKNOWN, |ou| ou.name.as_str());
        let _ = writeln!(
            out,
            "User: {} ({}, {org_unit})",
            subject.id,
            subject.display_name()
        );
        out.push_str("Permissions:\n");
        for permission in assignment
            .permission_ids
            .iter()
            .filter_map(|id| ctx.permission(id))
        {
            let app = ctx
                .permission_application(permission)
                .map_or(UNKNOWN, |a| a.name.as_str());
            let _ = writeln!(out, "- {app}: {}", permission.name);
        }
        out.push('\n');
    }
    out
}
