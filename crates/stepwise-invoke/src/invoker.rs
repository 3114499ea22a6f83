//! The invoker: argument count check, per-position coercion, handler call.

use crate::coerce::coerce;
use crate::error::InvokeResult;
use crate::handler::{InvocationOutcome, StepHandler};
use crate::options::InvokeOptions;
use crate::value::Value;
use stepwise_types::{HandlerSignature, InvocationError, RawArgument};
use tracing::{debug, trace, warn};

/// Coerce `args` against `handler`'s signature and call it.
///
/// Fails fast: the first argument that cannot be coerced aborts the
/// invocation and the handler is never called.
pub fn invoke(
    handler: &dyn StepHandler,
    args: &[RawArgument],
    options: &InvokeOptions,
) -> InvokeResult<InvocationOutcome> {
    let signature = handler.signature();
    debug!(
        signature = %signature,
        supplied = args.len(),
        "Invoking step handler"
    );

    check_arity(&signature, args.len(), options)?;
    let values = coerce_args(&signature, args)?;
    let outcome = handler.call(values)?;

    match (signature.returns_value, outcome.value().is_some()) {
        (false, true) => {
            debug!("Discarding value from handler that declares no return");
            return Ok(InvocationOutcome::NoValue);
        }
        (true, false) => {
            debug!("Handler declares a return value but produced none");
        }
        _ => {}
    }

    debug!(returned = outcome.value().is_some(), "Step handler finished");
    Ok(outcome)
}

fn check_arity(
    signature: &HandlerSignature,
    supplied: usize,
    options: &InvokeOptions,
) -> InvokeResult<()> {
    let arity = signature.arity();
    if !options.arity.accepts(arity, supplied) {
        return Err(InvocationError::ArgumentCountMismatch {
            expected: arity,
            got: supplied,
        });
    }
    if supplied > arity {
        debug!(
            arity,
            ignored = supplied - arity,
            "Ignoring trailing step arguments"
        );
    }
    Ok(())
}

/// Coerce the first `arity` raw arguments, in order.
///
/// Fewer raw arguments than declared parameters is an
/// [`InvocationError::ArgumentCountMismatch`]; no partial list is returned.
pub fn coerce_args(
    signature: &HandlerSignature,
    args: &[RawArgument],
) -> InvokeResult<Vec<Value>> {
    let arity = signature.arity();
    if args.len() < arity {
        return Err(InvocationError::ArgumentCountMismatch {
            expected: arity,
            got: args.len(),
        });
    }

    let mut values = Vec::with_capacity(arity);
    for (position, (raw, kind)) in args.iter().zip(&signature.params).enumerate() {
        match coerce(position, raw, kind) {
            Ok(value) => {
                trace!(position, kind = %kind, "Coerced step argument");
                values.push(value);
            }
            Err(e) => {
                if !kind.is_supported() {
                    warn!(
                        position,
                        kind = %kind,
                        "Step handler declares an unsupported parameter type"
                    );
                } else {
                    debug!(position, error = %e, "Step argument coercion failed");
                }
                return Err(e);
            }
        }
    }
    Ok(values)
}
