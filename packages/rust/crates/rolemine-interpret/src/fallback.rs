//! Fixed suggestions returned when nothing can be extracted.

use rolemine_types::{JUSTIFICATION_ATTRIBUTE, RoleOrigin, RoleRecord, STRATEGY_ATTRIBUTE};

use crate::synthesis::SUGGESTED_ID_BASE;

/// Strategy attribute value carried by fallback records.
pub const FALLBACK_STRATEGY: &str = "fallback";

struct FallbackRole {
    name: &'static str,
    permissions: &'static [&'static str],
    members: &'static [&'static str],
    application: &'static str,
    confidence: u8,
    justification: &'static str,
}

const FALLBACK_ROLES: [FallbackRole; 3] = [
    FallbackRole {
        name: "HR Team",
        permissions: &["HRPortal: HRView", "HRPortal: HRManage"],
        members: &["Alice Johnson (HR)", "Bob Williams (HR)"],
        application: "HRPortal",
        confidence: 85,
        justification: "HR staff consistently need to view and manage employee records in the HR portal.",
    },
    FallbackRole {
        name: "Finance Team",
        permissions: &["FinanceTool: FinanceView", "FinanceTool: FinanceEdit"],
        members: &["Carol Lee (Finance)"],
        application: "FinanceTool",
        confidence: 80,
        justification: "Finance staff share view and edit access to the finance tool.",
    },
    FallbackRole {
        name: "Engineering Team",
        permissions: &["CodeRepo: CodeRead", "CodeRepo: CodeWrite"],
        members: &["Jane Smith (Engineering)", "John Doe (Engineering)"],
        application: "CodeRepo",
        confidence: 90,
        justification: "Engineers share read and write access to the code repository.",
    },
];

/// The three fallback suggestions. Identical on every call.
#[must_use]
pub fn fallback_roles() -> Vec<RoleRecord> {
    FALLBACK_ROLES
        .iter()
        .zip(1_u64..)
        .map(|(entry, ordinal)| {
            let mut role =
                RoleRecord::new(SUGGESTED_ID_BASE + ordinal, entry.name, RoleOrigin::Suggested);
            role.permissions = entry.permissions.iter().map(|p| (*p).to_string()).collect();
            role.permission_count = role.permissions.len();
            role.members = entry.members.iter().map(|m| (*m).to_string()).collect();
            role.member_count = role.members.len();
            role.applications = vec![entry.application.to_string()];
            role.confidence = entry.confidence;
            role.attributes.insert(
                JUSTIFICATION_ATTRIBUTE.to_string(),
                entry.justification.to_string(),
            );
            role.attributes
                .insert(STRATEGY_ATTRIBUTE.to_string(), FALLBACK_STRATEGY.to_string());
            role
        })
        .collect()
}
