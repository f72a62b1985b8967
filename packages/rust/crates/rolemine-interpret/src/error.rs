use thiserror::Error;

/// Reasons a response could not be interpreted.
///
/// [`crate::ResponseInterpreter::interpret`] never surfaces these; it
/// substitutes the fallback suggestions instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// No text, or only whitespace after reasoning removal.
    #[error("response is missing or empty")]
    EmptyResponse,

    /// Every configured strategy returned zero records.
    #[error("no extraction strategy recognised the response ({tried} tried)")]
    NoMatch {
        /// Number of strategies run.
        tried: usize,
    },

    /// A strategy panicked; the cascade stops.
    #[error("strategy {strategy} panicked: {message}")]
    StrategyPanicked {
        /// Name of the panicking strategy.
        strategy: &'static str,
        /// Panic payload text.
        message: String,
    },
}
