//! Removal of reasoning side-channel segments before extraction.

use std::borrow::Cow;

use crate::patterns::{REASONING_BLOCK, REASONING_CLOSE_TAG, REASONING_OPEN_TAG};

/// Strip `<think>...</think>` segments (case-insensitive).
///
/// Complete segments are removed wherever they appear. A leftover closing
/// marker discards everything before it; a leftover opening marker truncates
/// the text at that point.
#[must_use]
pub fn strip_reasoning(raw: &str) -> Cow<'_, str> {
    if !REASONING_OPEN_TAG.is_match(raw) && !REASONING_CLOSE_TAG.is_match(raw) {
        return Cow::Borrowed(raw);
    }

    let mut text = REASONING_BLOCK.replace_all(raw, "").into_owned();
    if let Some(end) = REASONING_CLOSE_TAG.find_iter(&text).last().map(|m| m.end()) {
        text.drain(..end);
    }
    if let Some(start) = REASONING_OPEN_TAG.find(&text).map(|m| m.start()) {
        text.truncate(start);
    }
    tracing::debug!(
        event = "interpret.reasoning.stripped",
        before = raw.len(),
        after = text.len(),
        "removed reasoning segments"
    );
    Cow::Owned(text)
}
