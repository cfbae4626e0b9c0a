//! Error types for the synthesis chain.

use dom_adapter::DomError;
use thiserror::Error;

/// Failures inside the synthesis chain. Callers never see these: the
/// public entry point logs them and collapses the result to `None`.
#[derive(Debug, Error, Clone)]
pub enum SynthError {
    /// DOM read faulted mid-chain.
    #[error("dom fault: {0}")]
    Dom(#[from] DomError),

    /// A strategy hit state it cannot interpret.
    #[error("strategy '{strategy}' failed: {reason}")]
    StrategyFailed {
        strategy: &'static str,
        reason: String,
    },
}
