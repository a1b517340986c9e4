/// Errors that can occur while running the gate itself.
///
/// A request that fails a check is not an error: it produces a rejected
/// [`GateResult`](crate::GateResult).
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A stage could not complete its evaluation.
    #[error("stage error in '{stage}': {message}")]
    StageError { stage: String, message: String },
}

impl GateError {
    /// Create a stage error with a name and message.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageError {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
