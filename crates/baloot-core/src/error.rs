use thiserror::Error;

/// Failures the core itself can raise. §7 requires every decision path to
/// recover from these rather than propagate a panic: `baloot-bot`'s brain
/// cascade catches `InternalLogicError` and falls back to the lowest legal
/// action with `confidence = 0.0`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("internal logic error: {detail}")]
    InternalLogicError { detail: String },

    #[error("endgame solver exceeded its search bound")]
    EndgameOverflow,
}

impl CoreError {
    pub fn logic(detail: impl Into<String>) -> Self {
        CoreError::InternalLogicError {
            detail: detail.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
