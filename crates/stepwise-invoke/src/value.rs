//! Coerced argument values and their typed extraction.

use stepwise_types::{DataTable, DocString, ParameterKind, RawKind};
use std::fmt;

/// A step argument after coercion, one variant per supported [`ParameterKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int(isize),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    DocString(DocString),
    DataTable(DataTable),
}

impl Value {
    /// The parameter kind this value satisfies.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Int8(_) => ParameterKind::Int8,
            Self::Int16(_) => ParameterKind::Int16,
            Self::Int32(_) => ParameterKind::Int32,
            Self::Int64(_) => ParameterKind::Int64,
            Self::Int(_) => ParameterKind::Int,
            Self::Float32(_) => ParameterKind::Float32,
            Self::Float64(_) => ParameterKind::Float64,
            Self::String(_) => ParameterKind::String,
            Self::Bytes(_) => ParameterKind::Bytes,
            Self::DocString(_) => ParameterKind::DocString,
            Self::DataTable(_) => ParameterKind::DataTable,
        }
    }

    /// The raw shape this value is produced from.
    pub fn source_kind(&self) -> RawKind {
        match self {
            Self::DocString(_) => RawKind::DocString,
            Self::DataTable(_) => RawKind::DataTable,
            _ => RawKind::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Self::DocString(doc) => write!(f, "{}", doc.content),
            Self::DataTable(table) => write!(f, "{table}"),
        }
    }
}

/// A Rust type a step handler can declare as a parameter.
///
/// `kind()` tells the coercer what to produce; `from_value` takes the
/// produced value back out. The two must agree.
pub trait StepParam: Sized {
    fn kind() -> ParameterKind;

    /// Extract `Self`, handing the value back if it has another kind.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! step_param {
    ($ty:ty, $variant:ident) => {
        impl StepParam for $ty {
            fn kind() -> ParameterKind {
                ParameterKind::$variant
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

step_param!(i8, Int8);
step_param!(i16, Int16);
step_param!(i32, Int32);
step_param!(i64, Int64);
step_param!(isize, Int);
step_param!(f32, Float32);
step_param!(f64, Float64);
step_param!(String, String);
step_param!(Vec<u8>, Bytes);
step_param!(DocString, DocString);
step_param!(DataTable, DataTable);
