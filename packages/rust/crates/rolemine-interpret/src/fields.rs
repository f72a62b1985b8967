//! Labelled field extraction shared by every strategy.

use crate::patterns::DIGITS;

/// Member count used when the field is missing and no names were listed.
pub const DEFAULT_MEMBER_COUNT: usize = 1;
/// Confidence used when the field is missing or unparsable.
pub const DEFAULT_CONFIDENCE: u8 = 70;
/// Upper bound for confidence values.
pub const MAX_CONFIDENCE: u8 = 100;

const EMPHASIS: [char; 2] = ['*', '_'];

/// Field a role section may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Role name.
    Name,
    /// Permission list.
    Permissions,
    /// Estimated member count.
    MemberCount,
    /// Explicit member names.
    Members,
    /// Confidence 0-100.
    Confidence,
    /// Free-text justification.
    Justification,
}

impl FieldKind {
    /// Every field, for terminator checks.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Permissions,
        Self::MemberCount,
        Self::Members,
        Self::Confidence,
        Self::Justification,
    ];

    /// Lower-case labels, longest first within overlapping prefixes.
    #[must_use]
    pub const fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["role name", "name"],
            Self::Permissions => &["key permissions", "core permissions", "permissions"],
            Self::MemberCount => &[
                "estimated user count",
                "estimated member count",
                "estimated users",
                "estimated members",
                "user count",
                "member count",
            ],
            Self::Members => &["example users", "sample users", "user names", "members"],
            Self::Confidence => &["confidence level", "confidence score", "confidence"],
            Self::Justification => &["justification", "rationale", "reasoning"],
        }
    }
}

/// How much punctuation a label needs before its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Label must be followed by `:` or end the line.
    #[default]
    Strict,
    /// Whitespace after the label is also accepted.
    Loose,
}

/// Captured field content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Bullet lines following a bare label.
    List(Vec<String>),
    /// Inline remainder of the label line, or the next non-empty line.
    Line(String),
}

impl FieldValue {
    /// Items of the value; inline lines are split on `,` and `;`.
    #[must_use]
    pub fn into_items(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Line(line) => line
                .split([',', ';'])
                .map(clean_text)
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    /// Value flattened to one line.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::List(items) => items.join(" "),
            Self::Line(line) => line,
        }
    }

    /// First line of the value.
    #[must_use]
    pub fn first_line(&self) -> &str {
        match self {
            Self::List(items) => items.first().map_or("", String::as_str),
            Self::Line(line) => line,
        }
    }
}

/// Remove emphasis markers, backticks and surrounding whitespace.
///
/// Single `*`/`_` emphasis is only removed at the ends of the text.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .trim_matches(EMPHASIS)
        .trim()
        .to_string()
}

/// Strip heading, bullet and quote markers plus emphasis from a line.
#[must_use]
pub fn normalize_line(line: &str) -> String {
    let cleaned = clean_text(line);
    let mut rest = cleaned.as_str();
    loop {
        let trimmed = rest.trim_start();
        let stripped = trimmed
            .strip_prefix(['#', '-', '*', '>', '•', '+'])
            .or_else(|| strip_ordinal(trimmed));
        match stripped {
            Some(next) => rest = next,
            None => return trimmed.trim_end().to_string(),
        }
    }
}

/// Strip a `1.` or `1)` list ordinal.
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(['.', ')'])
}

/// Bullet content of a raw line, if the line is a list item.
fn bullet_item(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let body = if let Some(rest) = trimmed.strip_prefix(['-', '•', '+']) {
        if rest.starts_with('-') {
            return None;
        }
        rest
    } else if let Some(rest) = trimmed.strip_prefix('*') {
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        rest
    } else {
        strip_ordinal(trimmed)?
    };
    let item = clean_text(body);
    (!item.is_empty()).then_some(item)
}

/// Value after `kind`'s label at the start of a normalized line.
fn match_label(normalized: &str, kind: FieldKind, mode: LabelMode) -> Option<String> {
    for label in kind.labels() {
        let Some(head) = normalized.get(..label.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(label) {
            continue;
        }
        // `*Label*:` leaves the closing marker between label and colon.
        let rest = normalized[label.len()..].trim_start_matches(EMPHASIS);
        if rest.is_empty() {
            return Some(String::new());
        }
        if let Some(value) = rest.trim_start().strip_prefix(':') {
            return Some(value.trim().trim_start_matches(EMPHASIS).trim().to_string());
        }
        if mode == LabelMode::Loose && rest.starts_with(char::is_whitespace) {
            return Some(rest.trim().to_string());
        }
    }
    None
}

/// Label mode for one raw line: bullet items always need a colon, so a list
/// entry such as `- Members Portal: View` stays an item.
fn line_mode(line: &str, mode: LabelMode) -> LabelMode {
    if bullet_item(line).is_some() {
        LabelMode::Strict
    } else {
        mode
    }
}

/// Value after `kind`'s label on a raw line.
fn line_label(line: &str, kind: FieldKind, mode: LabelMode) -> Option<String> {
    match_label(&normalize_line(line), kind, line_mode(line, mode))
}

/// Whether `line` opens the `kind` field.
#[must_use]
pub fn is_label_line(line: &str, kind: FieldKind, mode: LabelMode) -> bool {
    line_label(line, kind, mode).is_some()
}

/// Whether `line` opens any known field.
#[must_use]
pub fn is_field_line(line: &str, mode: LabelMode) -> bool {
    let normalized = normalize_line(line);
    let mode = line_mode(line, mode);
    FieldKind::ALL
        .iter()
        .any(|kind| match_label(&normalized, *kind, mode).is_some())
}

/// Locate `kind` inside `section` and capture its value.
///
/// An inline value wins. A bare label collects the bullet lines that follow
/// it, stopping at the next recognised label; without bullets the next
/// non-empty line is taken.
#[must_use]
pub fn extract_field(section: &str, kind: FieldKind, mode: LabelMode) -> Option<FieldValue> {
    let lines: Vec<&str> = section.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        let Some(inline) = line_label(line, kind, mode) else {
            continue;
        };
        if !inline.is_empty() {
            return Some(FieldValue::Line(inline));
        }

        let mut items = Vec::new();
        for next in &lines[index + 1..] {
            if next.trim().is_empty() {
                continue;
            }
            if is_field_line(next, mode) {
                break;
            }
            if let Some(item) = bullet_item(next) {
                items.push(item);
                continue;
            }
            if items.is_empty() {
                let text = clean_text(next);
                return (!text.is_empty()).then_some(FieldValue::Line(text));
            }
            break;
        }
        if !items.is_empty() {
            return Some(FieldValue::List(items));
        }
    }
    None
}

/// First run of digits in `text`.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<u64> {
    DIGITS.find(text)?.as_str().parse().ok()
}

/// Member-count default keyed on the role name.
#[must_use]
pub fn default_member_count(role_name: &str) -> usize {
    let lower = role_name.to_lowercase();
    if lower.contains("hr") {
        2
    } else if lower.contains("finance") {
        1
    } else if lower.contains("engineer") || lower.contains("developer") {
        2
    } else {
        DEFAULT_MEMBER_COUNT
    }
}

/// Parsed confidence, clamped to 100, or the default.
#[must_use]
pub fn parse_confidence(value: Option<&str>) -> u8 {
    value
        .and_then(parse_leading_number)
        .map_or(DEFAULT_CONFIDENCE, |n| {
            u8::try_from(n.min(u64::from(MAX_CONFIDENCE))).unwrap_or(MAX_CONFIDENCE)
        })
}
