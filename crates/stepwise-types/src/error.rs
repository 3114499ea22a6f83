use crate::{ParameterKind, RawKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discriminant of an [`InvocationError`].
///
/// Reporters compare on this, never on rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArgumentCountMismatch,
    CannotConvert,
    UnsupportedArgumentType,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentCountMismatch => write!(f, "argument count mismatch"),
            Self::CannotConvert => write!(f, "cannot convert"),
            Self::UnsupportedArgumentType => write!(f, "unsupported argument type"),
        }
    }
}

/// Why a step handler could not be invoked.
///
/// Every variant is an ordinary returned value; none of them abort the
/// process. A handler that ran and reported failure through its own return
/// value is not an `InvocationError`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationError {
    /// Fewer raw arguments than the handler declares parameters (or, under
    /// an exact arity policy, a different count).
    #[error(
        "argument count mismatch: expected {expected} arguments, matched {got} from step ({})",
        count_detail(.expected, .got)
    )]
    ArgumentCountMismatch { expected: usize, got: usize },

    /// A raw argument could not be turned into its declared parameter kind.
    #[error(
        "cannot convert argument {position}: \"{raw_value}\" of type \"{raw_kind}\" \
         to {target}: {cause}"
    )]
    CannotConvert {
        position: usize,
        raw_value: String,
        raw_kind: RawKind,
        target: ParameterKind,
        cause: String,
    },

    /// The handler declares a parameter kind with no conversion strategy.
    #[error(
        "unsupported argument type: the argument {position} type {target} is not supported"
    )]
    UnsupportedArgumentType {
        position: usize,
        target: ParameterKind,
    },
}

fn count_detail(expected: &usize, got: &usize) -> &'static str {
    if got < expected {
        "fewer arguments than declared"
    } else {
        "a different count than declared"
    }
}

impl InvocationError {
    /// The discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCountMismatch { .. } => ErrorKind::ArgumentCountMismatch,
            Self::CannotConvert { .. } => ErrorKind::CannotConvert,
            Self::UnsupportedArgumentType { .. } => ErrorKind::UnsupportedArgumentType,
        }
    }

    /// The 0-based argument position the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::ArgumentCountMismatch { .. } => None,
            Self::CannotConvert { position, .. }
            | Self::UnsupportedArgumentType { position, .. } => Some(*position),
        }
    }

    pub fn cannot_convert(
        position: usize,
        raw_value: impl Into<String>,
        raw_kind: RawKind,
        target: ParameterKind,
        cause: impl fmt::Display,
    ) -> Self {
        Self::CannotConvert {
            position,
            raw_value: raw_value.into(),
            raw_kind,
            target,
            cause: cause.to_string(),
        }
    }
}
