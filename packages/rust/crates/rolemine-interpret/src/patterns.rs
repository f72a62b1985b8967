//! Compiled patterns for section headers, separators and reasoning markers.
//!
//! Patterns are compiled once at first use via `Lazy` statics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening sentinel of a reasoning side-channel segment.
pub const REASONING_OPEN: &str = "<think>";
/// Closing sentinel of a reasoning side-channel segment.
pub const REASONING_CLOSE: &str = "</think>";

/// Complete reasoning segment (lazy, spans lines).
pub(crate) static REASONING_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("reasoning block pattern"));
pub(crate) static REASONING_OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<think>").expect("reasoning open pattern"));
pub(crate) static REASONING_CLOSE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</think>").expect("reasoning close pattern"));

/// Strategy A: `**Role 1: HR Manager**`
pub(crate) static BOLD_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*[ \t]*Role[ \t]+(\d+)[ \t]*:?[ \t]*([^*\n]*?)[ \t]*\*\*")
        .expect("bold header pattern")
});

/// Strategy B: `### Role 1: HR Manager`
pub(crate) static HEADING_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*Role[ \t]+(\d+)[ \t]*:?[ \t]*([^\n]*)$")
        .expect("heading header pattern")
});

/// Strategy C: `Role 1: HR Manager` (case-insensitive, colon and emphasis optional).
pub(crate) static PLAIN_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:[-*][ \t]+)?(?:\*\*)?[ \t]*Role[ \t]*(\d+)[ \t]*(?:\*\*)?[ \t]*:?[ \t]*(?:\*\*)?([^\n]*)$",
    )
    .expect("plain header pattern")
});

/// Strategy D block terminator: a line of three or more dashes.
pub(crate) static DASH_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*-{3,}[ \t]*$").expect("dash separator pattern"));

/// Strategy E: `Name: HR Manager` lines opening a section.
pub(crate) static NAME_FIELD_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:[-*][ \t]+)?(?:\*\*)?[ \t]*(?:Role[ \t]+)?Name[ \t]*(?:\*\*)?[ \t]*:[ \t]*(?:\*\*)?[ \t]*([^\n]+)$",
    )
    .expect("name field pattern")
});

/// `Role 3:` prefix left on a block's title line.
pub(crate) static ROLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Role[ \t]*\d+[ \t]*:?[ \t]*").expect("role prefix pattern"));

/// First parenthetical group, e.g. the names in `3 (Alice Johnson; Bob Williams)`.
pub(crate) static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]*)\)").expect("parenthetical pattern"));

/// First run of digits.
pub(crate) static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digits pattern"));
