use thiserror::Error;

/// Agent-level failures that escape to the embedding host.
///
/// Faults inside message handling never surface here; they are logged at
/// the operation boundary and swallowed so one bad request cannot break
/// the listener loop.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid bridge config: {0}")]
    Config(#[from] serde_yaml::Error),
}
