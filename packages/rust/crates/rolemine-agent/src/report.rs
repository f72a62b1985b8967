//! Tabular role report rendered as CSV.

use rolemine_types::RoleRecord;

/// CSV header, in column order.
pub const REPORT_HEADER: [&str; 7] = [
    "Role ID",
    "Role Name",
    "User Count",
    "Applications",
    "Permission Count",
    "AI Generated",
    "Confidence",
];

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Role id.
    pub id: u64,
    /// Role name.
    pub name: String,
    /// Member count.
    pub member_count: usize,
    /// Application names joined with `", "`.
    pub applications: String,
    /// Permission count.
    pub permission_count: usize,
    /// `Yes` for suggested roles, `No` for derived ones.
    pub ai_generated: &'static str,
    /// `N%` for suggested roles, `-` for derived ones.
    pub confidence: String,
}

impl From<&RoleRecord> for ReportRow {
    fn from(role: &RoleRecord) -> Self {
        let suggested = role.origin.is_suggested();
        Self {
            id: role.id,
            name: role.name.clone(),
            member_count: role.member_count,
            applications: role.applications.join(", "),
            permission_count: role.permission_count,
            ai_generated: if suggested { "Yes" } else { "No" },
            confidence: if suggested {
                format!("{}%", role.confidence)
            } else {
                "-".to_string()
            },
        }
    }
}

impl ReportRow {
    fn fields(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.member_count.to_string(),
            self.applications.clone(),
            self.permission_count.to_string(),
            self.ai_generated.to_string(),
            self.confidence.clone(),
        ]
    }
}

/// Render `rows` with a header line. Fields containing commas, quotes or
/// line breaks are quoted, with embedded quotes doubled.
#[must_use]
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = csv_line(REPORT_HEADER.iter().copied());
    for row in rows {
        out.push_str(&csv_line(row.fields().iter().map(String::as_str)));
    }
    out
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(escape_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
