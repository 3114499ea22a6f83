use serde::{Deserialize, Serialize};
use std::fmt;

/// What a handler parameter expects to receive.
///
/// Closed set: every supported kind has exactly one conversion strategy.
/// Anything else a handler declares is carried as [`ParameterKind::Unsupported`]
/// with the declared type name, so it can be reported rather than rejected
/// at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    // ── Integers ──
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-default width (`isize`).
    Int,

    // ── Floating point ──
    Float32,
    Float64,

    // ── Text ──
    String,
    /// The UTF-8 bytes of the captured text.
    Bytes,

    // ── Multi-line payloads ──
    DocString,
    DataTable,

    /// A declared type with no conversion strategy (maps, trait objects, ...).
    Unsupported(std::string::String),
}

impl ParameterKind {
    /// Whether a conversion strategy exists for this kind.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Int => write!(f, "int"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::String => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::DocString => write!(f, "doc string"),
            Self::DataTable => write!(f, "data table"),
            Self::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// The introspected shape of a step handler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HandlerSignature {
    /// Declared parameter kinds, in order.
    pub params: Vec<ParameterKind>,
    /// Whether the handler declares a return value (return arity 1).
    pub returns_value: bool,
}

impl HandlerSignature {
    pub fn new(params: Vec<ParameterKind>, returns_value: bool) -> Self {
        Self {
            params,
            returns_value,
        }
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for HandlerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")?;
        if self.returns_value {
            write!(f, " -> value")?;
        }
        Ok(())
    }
}
