//! Extraction strategies, from most to least structured.

use regex::Regex;
use rolemine_types::RoleRecord;

use crate::fields::{FieldKind, LabelMode, extract_field, is_field_line, is_label_line};
use crate::patterns::{
    BOLD_HEADER, DASH_SEPARATOR, HEADING_HEADER, NAME_FIELD_HEADER, PLAIN_HEADER,
};
use crate::synthesis::{SectionDraft, synthesize};

/// One way of locating role sections in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStrategy {
    /// `**Role 1: Name**` headers.
    BoldHeader,
    /// `### Role 1: Name` headers.
    HeadingMarker,
    /// Bare `Role 1: Name` lines, with loose field labels.
    PlainText,
    /// Blocks terminated by `---` lines that carry a permissions field.
    DashBlocks,
    /// Sections opened by `Name: ...` lines.
    NameField,
}

impl ExtractionStrategy {
    /// Cascade order used by a default interpreter.
    pub const DEFAULT_ORDER: [Self; 5] = [
        Self::BoldHeader,
        Self::HeadingMarker,
        Self::PlainText,
        Self::DashBlocks,
        Self::NameField,
    ];

    /// Value stored in the `strategy` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BoldHeader => "bold_header",
            Self::HeadingMarker => "heading_marker",
            Self::PlainText => "plain_text",
            Self::DashBlocks => "dash_blocks",
            Self::NameField => "name_field",
        }
    }

    /// Label strictness used while reading fields.
    #[must_use]
    pub const fn label_mode(self) -> LabelMode {
        match self {
            Self::PlainText => LabelMode::Loose,
            _ => LabelMode::Strict,
        }
    }

    /// Parse a name produced by [`Self::as_str`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Records found in `text`, in order of appearance; empty when the
    /// strategy does not apply.
    #[must_use]
    pub fn extract(self, text: &str) -> Vec<RoleRecord> {
        let mode = self.label_mode();
        self.sections(text)
            .iter()
            .zip(1_u64..)
            .map(|(draft, ordinal)| synthesize(ordinal, draft, mode, self.as_str()))
            .collect()
    }

    fn sections(self, text: &str) -> Vec<SectionDraft<'_>> {
        match self {
            Self::BoldHeader => header_sections(text, &BOLD_HEADER, 2),
            Self::HeadingMarker => header_sections(text, &HEADING_HEADER, 2),
            Self::PlainText => header_sections(text, &PLAIN_HEADER, 2),
            Self::DashBlocks => dash_sections(text),
            Self::NameField => header_sections(text, &NAME_FIELD_HEADER, 1),
        }
    }
}

/// Split `text` at every header match; each section runs to the next header.
///
/// An empty name group falls back to whatever follows the match on the
/// header line (e.g. `**Role 1:** HR Manager`).
fn header_sections<'t>(text: &'t str, header: &Regex, name_group: usize) -> Vec<SectionDraft<'t>> {
    let matches: Vec<_> = header.captures_iter(text).collect();
    let mut sections = Vec::with_capacity(matches.len());
    for (index, caps) in matches.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let end = matches
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let captured = caps.get(name_group).map_or("", |m| m.as_str());
        let header_name = if captured.trim().is_empty() {
            text[whole.end()..end].lines().next().unwrap_or_default()
        } else {
            captured
        };
        sections.push(SectionDraft::new(
            Some(header_name),
            &text[whole.start()..end],
        ));
    }
    sections
}

/// Blocks closed by a dash separator; trailing text after the last
/// separator is not a block.
fn dash_sections(text: &str) -> Vec<SectionDraft<'static>> {
    let mut sections = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    for line in text.lines() {
        if !DASH_SEPARATOR.is_match(line) {
            block.push(line);
            continue;
        }
        let lines = std::mem::take(&mut block);
        if let Some(draft) = dash_block(&lines) {
            sections.push(draft);
        }
    }
    sections
}

fn dash_block(lines: &[&str]) -> Option<SectionDraft<'static>> {
    let mode = ExtractionStrategy::DashBlocks.label_mode();
    let body = lines.join("\n");
    extract_field(&body, FieldKind::Permissions, mode)?;

    let permissions_at = lines
        .iter()
        .position(|line| is_label_line(line, FieldKind::Permissions, mode))
        .unwrap_or(lines.len());
    let title = lines[..permissions_at]
        .iter()
        .rev()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !is_field_line(line, mode));
    Some(SectionDraft::new(title, body))
}
