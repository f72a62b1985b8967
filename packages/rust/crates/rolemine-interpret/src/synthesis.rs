//! Turn one extracted section into a suggested role record.

use std::borrow::Cow;

use rolemine_types::{JUSTIFICATION_ATTRIBUTE, RoleOrigin, RoleRecord, STRATEGY_ATTRIBUTE};

use crate::fields::{
    FieldKind, FieldValue, LabelMode, clean_text, default_member_count, extract_field, parse_confidence,
    parse_leading_number,
};
use crate::patterns::{PARENTHETICAL, ROLE_PREFIX};

/// Suggested ids start above this value so they never collide with derived ids.
pub const SUGGESTED_ID_BASE: u64 = 100;
/// Upper bound on synthesized roster entries.
pub const ROSTER_CAP: usize = 50;
/// Justification used when a section carries none.
pub const DEFAULT_JUSTIFICATION: &str =
    "Suggested from recurring permission patterns in the assignment data.";
/// Application name used when nothing more specific can be inferred.
pub const GENERIC_APPLICATION: &str = "Application";

/// Placeholder members cycled when a section lists no names.
const ROSTER: [(&str, &str); 5] = [
    ("Alice Johnson", "HR"),
    ("Bob Williams", "Finance"),
    ("Carol Lee", "Finance"),
    ("Jane Smith", "Engineering"),
    ("John Doe", "Engineering"),
];

/// A role-shaped slice of the response.
#[derive(Debug, Clone)]
pub(crate) struct SectionDraft<'a> {
    /// Name taken from the section header, if the header carried one.
    pub header_name: Option<String>,
    pub body: Cow<'a, str>,
}

impl<'a> SectionDraft<'a> {
    pub(crate) fn new(header_name: Option<&str>, body: impl Into<Cow<'a, str>>) -> Self {
        Self {
            header_name: header_name.map(clean_role_name).filter(|n| !n.is_empty()),
            body: body.into(),
        }
    }
}

/// Strip emphasis, brackets and leftover `Role n:` / `Name:` prefixes.
pub(crate) fn clean_role_name(raw: &str) -> String {
    let cleaned = clean_text(raw);
    let trimmed = cleaned.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '[' | ']' | '#' | ':' | '*' | '-' | '"')
    });
    let without_role = ROLE_PREFIX.replace(trimmed, "");
    let without_name = strip_prefix_ignore_case(&without_role, "name:").unwrap_or(&*without_role);
    without_name
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | ':'))
        .to_string()
}

fn strip_prefix_ignore_case<'s>(text: &'s str, prefix: &str) -> Option<&'s str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Build the record for the `ordinal`-th section (1-based) found by `strategy`.
pub(crate) fn synthesize(
    ordinal: u64,
    draft: &SectionDraft<'_>,
    mode: LabelMode,
    strategy: &str,
) -> RoleRecord {
    let body: &str = &draft.body;
    let name = draft
        .header_name
        .clone()
        .or_else(|| {
            extract_field(body, FieldKind::Name, mode)
                .map(|value| clean_role_name(value.first_line()))
                .filter(|n| !n.is_empty())
        })
        .unwrap_or_else(|| format!("Suggested Role {ordinal}"));

    let mut permissions: Vec<String> = Vec::new();
    for item in extract_field(body, FieldKind::Permissions, mode)
        .map(FieldValue::into_items)
        .unwrap_or_default()
    {
        if !permissions.contains(&item) {
            permissions.push(item);
        }
    }

    let count_value = extract_field(body, FieldKind::MemberCount, mode);
    let mut names: Vec<String> = extract_field(body, FieldKind::Members, mode)
        .map(FieldValue::into_items)
        .unwrap_or_default()
        .into_iter()
        .filter(|n| is_person_name(n))
        .collect();
    if names.is_empty() {
        names = count_value
            .as_ref()
            .map(|value| parenthetical_names(value.first_line()))
            .unwrap_or_default();
    }
    let parsed_count = count_value
        .as_ref()
        .and_then(|value| parse_leading_number(value.first_line()))
        .and_then(|n| usize::try_from(n).ok());
    let member_count = match parsed_count {
        Some(n) => n.max(names.len()),
        None if names.is_empty() => default_member_count(&name),
        None => names.len(),
    };

    let members = if names.is_empty() {
        roster(member_count)
    } else {
        let department = department_for(&name);
        names
            .iter()
            .map(|person| format!("{person} ({department})"))
            .collect()
    };

    let confidence = parse_confidence(
        extract_field(body, FieldKind::Confidence, mode)
            .as_ref()
            .map(FieldValue::first_line),
    );
    let justification = extract_field(body, FieldKind::Justification, mode)
        .map(|value| clean_text(&value.into_text()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_JUSTIFICATION.to_string());

    let mut role = RoleRecord::new(SUGGESTED_ID_BASE + ordinal, name, RoleOrigin::Suggested);
    role.applications = applications_for(&permissions, &role.name);
    role.permission_count = permissions.len();
    role.permissions = permissions;
    role.member_count = member_count;
    role.members = members;
    role.confidence = confidence;
    role.attributes
        .insert(JUSTIFICATION_ATTRIBUTE.to_string(), justification);
    role.attributes
        .insert(STRATEGY_ATTRIBUTE.to_string(), strategy.to_string());
    role
}

/// Distinct applications named by permission prefixes, else a keyword guess.
pub(crate) fn applications_for(permissions: &[String], role_name: &str) -> Vec<String> {
    let mut applications: Vec<String> = Vec::new();
    for permission in permissions {
        let app = match permission.split_once(':') {
            Some((app, _)) => app.trim(),
            None => permission.split_whitespace().next().unwrap_or_default(),
        };
        if !app.is_empty() && !applications.iter().any(|a| a == app) {
            applications.push(app.to_string());
        }
    }
    if applications.is_empty() {
        applications.push(application_for_name(role_name).to_string());
    }
    applications
}

fn application_for_name(role_name: &str) -> &'static str {
    let lower = role_name.to_lowercase();
    if lower.contains("hr") || lower.contains("human resources") {
        "HRPortal"
    } else if lower.contains("finance") {
        "FinanceTool"
    } else if lower.contains("engineer") || lower.contains("code") || lower.contains("developer") {
        "CodeRepo"
    } else {
        GENERIC_APPLICATION
    }
}

/// Department label attached to listed member names.
pub(crate) fn department_for(role_name: &str) -> &'static str {
    let lower = role_name.to_lowercase();
    if lower.contains("finance") {
        "Finance"
    } else if lower.contains("hr") {
        "HR"
    } else if lower.contains("eng") || lower.contains("code") || lower.contains("developer") {
        "Engineering"
    } else {
        "Department"
    }
}

/// Names inside the first parenthetical of a member-count line.
pub(crate) fn parenthetical_names(line: &str) -> Vec<String> {
    let Some(inner) = PARENTHETICAL
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|inner| inner.chars().any(char::is_alphabetic))
    else {
        return Vec::new();
    };
    let separator = if inner.contains(';') { ';' } else { ',' };
    inner
        .split(separator)
        .map(clean_text)
        .filter(|token| is_person_name(token))
        .collect()
}

fn is_person_name(token: &str) -> bool {
    !token.is_empty()
        && !token.contains('%')
        && !token.chars().any(|c| c.is_ascii_digit())
        && token.chars().any(char::is_alphabetic)
}

/// Deterministic placeholder members: exactly `count` entries, capped.
pub(crate) fn roster(count: usize) -> Vec<String> {
    ROSTER
        .iter()
        .cycle()
        .take(count.min(ROSTER_CAP))
        .map(|(person, department)| format!("{person} ({department})"))
        .collect()
}
