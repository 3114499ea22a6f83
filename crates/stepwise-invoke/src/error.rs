//! Error types for the step invoker.

use stepwise_types::InvocationError;
use thiserror::Error;

/// Result alias for invocation operations.
pub type InvokeResult<T> = Result<T, InvocationError>;

/// Invalid [`InvokeOptions`](crate::InvokeOptions) input.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid invoke options: {0}")]
    Json(#[from] serde_json::Error),
}
