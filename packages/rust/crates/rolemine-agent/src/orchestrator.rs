//! Mining run: clustering plus optional generated suggestions.

use std::sync::Arc;

use rolemine_cluster::cluster_context;
use rolemine_interpret::{ResponseInterpreter, fallback_roles};
use rolemine_types::{DataContext, MiningFilters, RoleRecord};
use serde::Serialize;

use crate::generation::RoleGenerator;
use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::report::ReportRow;

/// How the suggested list of the latest run was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Parsed from generation output.
    Interpreted,
    /// Fixed fallback set.
    Fallback,
    /// Suggestions disabled for the run; the list is empty.
    Skipped,
}

/// Summary of one [`MiningOrchestrator::mine`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MiningOutcome {
    /// Derived roles kept by the run.
    pub derived_count: usize,
    /// Suggested roles kept by the run.
    pub suggested_count: usize,
    /// Where the suggestions came from.
    pub suggestion_source: SuggestionSource,
}

impl MiningOutcome {
    /// Whether the fixed fallback set was used.
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        matches!(self.suggestion_source, SuggestionSource::Fallback)
    }
}

/// Runs both engines and retains the latest results.
///
/// `mine` takes `&mut self`; concurrent runs need separate instances or
/// external locking.
pub struct MiningOrchestrator {
    generator: Option<Arc<dyn RoleGenerator>>,
    interpreter: ResponseInterpreter,
    derived: Vec<RoleRecord>,
    suggested: Vec<RoleRecord>,
}

impl MiningOrchestrator {
    /// Orchestrator with an optional generation service.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn RoleGenerator>>) -> Self {
        Self {
            generator,
            interpreter: ResponseInterpreter::default(),
            derived: Vec::new(),
            suggested: Vec::new(),
        }
    }

    /// Replace the response interpreter (e.g. a custom strategy order).
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: ResponseInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Derived roles from the latest run.
    #[must_use]
    pub fn latest_derived(&self) -> &[RoleRecord] {
        &self.derived
    }

    /// Suggested roles from the latest run.
    #[must_use]
    pub fn latest_suggested(&self) -> &[RoleRecord] {
        &self.suggested
    }

    /// Report rows: derived roles first, then suggested ones.
    #[must_use]
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.derived
            .iter()
            .chain(&self.suggested)
            .map(ReportRow::from)
            .collect()
    }

    /// Run clustering and, when enabled, one generation request.
    ///
    /// Both retained lists are replaced. Generation failures never surface;
    /// they yield the fallback suggestions.
    pub async fn mine(&mut self, ctx: &DataContext, filters: &MiningFilters) -> MiningOutcome {
        if let Err(error) = filters.validate() {
            tracing::warn!(
                event = "mining.filters.clamped",
                error = %error,
                "invalid filter threshold; using clamped value"
            );
        }

        let derived = cluster_context(ctx, filters);
        let (suggested, suggestion_source) = if filters.use_ai {
            self.suggest(ctx).await
        } else {
            (Vec::new(), SuggestionSource::Skipped)
        };

        self.derived = derived;
        self.suggested = suggested;
        let outcome = MiningOutcome {
            derived_count: self.derived.len(),
            suggested_count: self.suggested.len(),
            suggestion_source,
        };
        tracing::info!(
            event = "mining.completed",
            derived = outcome.derived_count,
            suggested = outcome.suggested_count,
            source = ?outcome.suggestion_source,
            "mining run finished"
        );
        outcome
    }

    async fn suggest(&self, ctx: &DataContext) -> (Vec<RoleRecord>, SuggestionSource) {
        if !ctx.is_minable() {
            tracing::warn!(
                event = "mining.suggest.no_data",
                "no subjects, permissions or assignments; using fallback suggestions"
            );
            return (fallback_roles(), SuggestionSource::Fallback);
        }
        let Some(generator) = self.generator.as_ref() else {
            tracing::info!(
                event = "mining.suggest.no_generator",
                "no generation service configured; using fallback suggestions"
            );
            return (fallback_roles(), SuggestionSource::Fallback);
        };

        let prompt = build_prompt(ctx);
        tracing::debug!(
            event = "mining.generation.request",
            prompt_chars = prompt.len(),
            "sending generation request"
        );
        match generator.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => {
                tracing::debug!(
                    event = "mining.generation.response",
                    response_chars = text.len(),
                    "received generation response"
                );
                let interpretation = self.interpreter.interpret_detailed(Some(&text));
                let source = if interpretation.is_fallback() {
                    SuggestionSource::Fallback
                } else {
                    SuggestionSource::Interpreted
                };
                (interpretation.roles, source)
            }
            Err(error) => {
                tracing::warn!(
                    event = "mining.generation.failed",
                    error = %error,
                    "generation request failed; using fallback suggestions"
                );
                (fallback_roles(), SuggestionSource::Fallback)
            }
        }
    }
}
