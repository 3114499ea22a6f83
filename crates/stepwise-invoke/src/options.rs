use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// How the supplied argument count is checked against a handler's arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityPolicy {
    /// At least `arity` arguments; trailing extras are ignored.
    #[default]
    AtLeast,
    /// Exactly `arity` arguments.
    Exact,
}

impl ArityPolicy {
    /// Whether `supplied` arguments satisfy a handler declaring `arity`.
    pub fn accepts(self, arity: usize, supplied: usize) -> bool {
        match self {
            Self::AtLeast => supplied >= arity,
            Self::Exact => supplied == arity,
        }
    }
}

/// Knobs for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvokeOptions {
    pub arity: ArityPolicy,
}

impl InvokeOptions {
    /// Options that reject surplus arguments.
    pub fn strict() -> Self {
        Self {
            arity: ArityPolicy::Exact,
        }
    }

    /// Parse options from JSON, e.g. `{"arity": "exact"}`. Missing fields
    /// take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}
