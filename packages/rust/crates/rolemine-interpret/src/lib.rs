//! rolemine-interpret - Free-form generation output to suggested roles.
//!
//! Responses are pre-processed to drop reasoning segments, then handed to an
//! ordered cascade of [`ExtractionStrategy`] variants. The first strategy that
//! finds at least one role section wins. When none does, or a strategy
//! panics, the interpreter returns a fixed three-role fallback set, so
//! [`ResponseInterpreter::interpret`] never returns an empty list.
//!
//! ```
//! use rolemine_interpret::ResponseInterpreter;
//!
//! let roles = ResponseInterpreter::new().interpret(Some(
//!     "**Role 1: HR Manager**\nKey Permissions:\n- HRPortal: HRView\nConfidence: 85%",
//! ));
//! assert_eq!(roles[0].name, "HR Manager");
//! assert_eq!(roles[0].confidence, 85);
//! ```

mod error;
mod fallback;
mod fields;
mod interpreter;
mod patterns;
mod preprocess;
mod strategy;
mod synthesis;

pub use error::InterpretError;
pub use fallback::{FALLBACK_STRATEGY, fallback_roles};
pub use fields::{
    DEFAULT_CONFIDENCE, DEFAULT_MEMBER_COUNT, FieldKind, FieldValue, LabelMode, MAX_CONFIDENCE,
    extract_field,
};
pub use interpreter::{Interpretation, InterpretationSource, ResponseInterpreter};
pub use patterns::{REASONING_CLOSE, REASONING_OPEN};
pub use preprocess::strip_reasoning;
pub use strategy::ExtractionStrategy;
pub use synthesis::{DEFAULT_JUSTIFICATION, ROSTER_CAP, SUGGESTED_ID_BASE};
