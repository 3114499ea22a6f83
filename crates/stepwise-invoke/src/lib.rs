//! Stepwise step invoker.
//!
//! Takes a matched step (its raw captured arguments plus the registered
//! handler), coerces every argument to the kind the handler declares,
//! calls the handler and hands back whatever it returned.
//!
//! ```text
//! raw arguments + handler → signature → coerce (per position) → call → outcome
//! ```

pub mod coerce;
pub mod error;
pub mod handler;
pub mod invoker;
pub mod options;
pub mod step;
pub mod value;

pub use coerce::coerce;
pub use error::{InvokeResult, OptionsError};
pub use handler::{
    step_fn, FnHandler, IntoStepHandler, InvocationOutcome, ReturnValue, StepError, StepHandler,
    StepResult, StepReturn, Steps,
};
pub use invoker::{coerce_args, invoke};
pub use options::{ArityPolicy, InvokeOptions};
pub use step::{metadata_of, StepDefinition};
pub use value::{StepParam, Value};
