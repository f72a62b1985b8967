//! Strategy cascade with a panic barrier and deterministic fallback.

use std::panic::{self, AssertUnwindSafe};

use rolemine_types::RoleRecord;

use crate::error::InterpretError;
use crate::fallback::fallback_roles;
use crate::preprocess::strip_reasoning;
use crate::strategy::ExtractionStrategy;

/// Where an interpretation's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationSource {
    /// Records from the named strategy.
    Strategy(ExtractionStrategy),
    /// The fixed fallback set.
    Fallback,
}

impl InterpretationSource {
    /// Value stored in the `strategy` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strategy(strategy) => strategy.as_str(),
            Self::Fallback => crate::fallback::FALLBACK_STRATEGY,
        }
    }
}

/// Interpreted records plus their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// Never empty.
    pub roles: Vec<RoleRecord>,
    /// Producer of `roles`.
    pub source: InterpretationSource,
}

impl Interpretation {
    /// The fixed fallback set.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            roles: fallback_roles(),
            source: InterpretationSource::Fallback,
        }
    }

    /// Whether `roles` is the fallback set.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, InterpretationSource::Fallback)
    }
}

/// Converts free-form generation output into suggested role records.
///
/// Strategies run in the configured order; the first to yield at least one
/// record wins and later strategies are not consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInterpreter {
    strategies: Vec<ExtractionStrategy>,
}

impl Default for ResponseInterpreter {
    fn default() -> Self {
        Self {
            strategies: ExtractionStrategy::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl ResponseInterpreter {
    /// Interpreter with the default strategy order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter running only `strategies`, in the given order.
    #[must_use]
    pub fn with_strategies(strategies: impl IntoIterator<Item = ExtractionStrategy>) -> Self {
        Self {
            strategies: strategies.into_iter().collect(),
        }
    }

    /// Suggested roles for `raw`. Never empty; falls back on any failure.
    #[must_use]
    pub fn interpret(&self, raw: Option<&str>) -> Vec<RoleRecord> {
        self.interpret_detailed(raw).roles
    }

    /// Like [`Self::interpret`], also reporting which strategy produced the records.
    #[must_use]
    pub fn interpret_detailed(&self, raw: Option<&str>) -> Interpretation {
        match self.try_interpret(raw) {
            Ok(interpretation) => interpretation,
            Err(err) => {
                tracing::warn!(
                    event = "interpret.fallback",
                    reason = %err,
                    "using fallback suggestions"
                );
                Interpretation::fallback()
            }
        }
    }

    /// Run the cascade without substituting the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`InterpretError`] when the response is empty, no strategy
    /// matches, or a strategy panics.
    pub fn try_interpret(&self, raw: Option<&str>) -> Result<Interpretation, InterpretError> {
        let raw = raw.ok_or(InterpretError::EmptyResponse)?;
        let text = strip_reasoning(raw);
        if text.trim().is_empty() {
            return Err(InterpretError::EmptyResponse);
        }

        for &strategy in &self.strategies {
            let roles = run_guarded(strategy.as_str(), || strategy.extract(&text))?;
            tracing::debug!(
                event = "interpret.strategy.tried",
                strategy = strategy.as_str(),
                roles = roles.len(),
                "strategy attempted"
            );
            if !roles.is_empty() {
                tracing::info!(
                    event = "interpret.strategy.matched",
                    strategy = strategy.as_str(),
                    roles = roles.len(),
                    "interpreted suggested roles"
                );
                return Ok(Interpretation {
                    roles,
                    source: InterpretationSource::Strategy(strategy),
                });
            }
        }
        Err(InterpretError::NoMatch {
            tried: self.strategies.len(),
        })
    }
}

/// Run `f`, converting a panic into [`InterpretError::StrategyPanicked`].
fn run_guarded<F>(strategy: &'static str, f: F) -> Result<Vec<RoleRecord>, InterpretError>
where
    F: FnOnce() -> Vec<RoleRecord>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        tracing::error!(
            event = "interpret.strategy.panicked",
            strategy,
            message = %message,
            "strategy panicked"
        );
        InterpretError::StrategyPanicked { strategy, message }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_converts_panics_into_errors() {
        let result = run_guarded("test", || panic!("boom"));
        assert_eq!(
            result,
            Err(InterpretError::StrategyPanicked {
                strategy: "test",
                message: "boom".to_string(),
            })
        );
    }

    #[test]
    fn guard_passes_results_through() {
        assert_eq!(run_guarded("test", Vec::new), Ok(Vec::new()));
    }

    #[test]
    fn empty_strategy_list_always_falls_back() {
        let interpreter = ResponseInterpreter::with_strategies([]);
        let result = interpreter.interpret_detailed(Some("**Role 1: HR Manager**"));
        assert!(result.is_fallback());
        assert_eq!(
            interpreter.try_interpret(Some("x")),
            Err(InterpretError::NoMatch { tried: 0 })
        );
    }

    #[test]
    fn cascade_order_is_configurable() {
        let text = "**Role 1: HR Manager**\nKey Permissions: HRPortal: HRView\n---\n";
        let default_pick = ResponseInterpreter::new().interpret_detailed(Some(text));
        assert_eq!(
            default_pick.source,
            InterpretationSource::Strategy(ExtractionStrategy::BoldHeader)
        );
        let dash_first = ResponseInterpreter::with_strategies([
            ExtractionStrategy::DashBlocks,
            ExtractionStrategy::BoldHeader,
        ])
        .interpret_detailed(Some(text));
        assert_eq!(
            dash_first.source,
            InterpretationSource::Strategy(ExtractionStrategy::DashBlocks)
        );
    }
}
