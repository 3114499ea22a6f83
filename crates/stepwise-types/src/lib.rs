//! Shared types for stepwise.
//!
//! This crate defines the values exchanged at the step invocation
//! boundary: raw arguments and their payload shapes, the parameter kinds
//! a handler can declare, step metadata for reporters, and the invocation
//! error taxonomy.

mod error;
mod kind;
mod location;
pub mod payload;

pub use error::{ErrorKind, InvocationError};
pub use kind::{HandlerSignature, ParameterKind};
pub use location::{Location, StepMetadata};
pub use payload::{DataTable, DocString, RawArgument, RawKind, StepArgument, TableRow};

/// Result type used throughout stepwise.
pub type Result<T> = std::result::Result<T, InvocationError>;
