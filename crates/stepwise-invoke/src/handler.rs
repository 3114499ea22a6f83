//! Step handlers: the signature they expose and the outcome they produce.
//!
//! A handler is anything implementing [`StepHandler`]. Plain Rust functions
//! and closures become handlers through [`IntoStepHandler`]; their signature
//! is read off the parameter types ([`StepParam`]) and the return type
//! ([`StepReturn`]).

use crate::error::InvokeResult;
use crate::value::{StepParam, Value};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use stepwise_types::{HandlerSignature, InvocationError};

// ══════════════════════════════════════════════════════════════════════════════
// Outcome
// ══════════════════════════════════════════════════════════════════════════════

/// The type-erased value a handler returned.
///
/// Opaque to the invoker; the orchestrator downcasts it to whatever its
/// handlers are known to return.
pub struct ReturnValue(Box<dyn Any + Send>);

impl ReturnValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Take the value out as `T`, handing it back unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.0.downcast::<T>().map(|b| *b).map_err(Self)
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReturnValue(..)")
    }
}

/// Result of a successful invocation.
#[derive(Debug)]
pub enum InvocationOutcome {
    /// The handler declares no return value.
    NoValue,
    /// The handler's sole return value.
    Returned(ReturnValue),
}

impl InvocationOutcome {
    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }

    pub fn value(&self) -> Option<&ReturnValue> {
        match self {
            Self::NoValue => None,
            Self::Returned(v) => Some(v),
        }
    }

    pub fn into_value(self) -> Option<ReturnValue> {
        match self {
            Self::NoValue => None,
            Self::Returned(v) => Some(v),
        }
    }
}

/// Step texts a multi-step handler expands into.
///
/// Returned by handlers of `nested` step definitions; the orchestrator
/// matches and runs each entry in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Steps(pub Vec<String>);

impl Steps {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(steps.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A Rust type a step handler can return.
pub trait StepReturn {
    /// Return arity: `false` for `()`, `true` otherwise.
    const RETURNS_VALUE: bool;

    fn into_outcome(self) -> InvocationOutcome;
}

impl StepReturn for () {
    const RETURNS_VALUE: bool = false;

    fn into_outcome(self) -> InvocationOutcome {
        InvocationOutcome::NoValue
    }
}

macro_rules! step_return {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StepReturn for $ty {
                const RETURNS_VALUE: bool = true;

                fn into_outcome(self) -> InvocationOutcome {
                    InvocationOutcome::Returned(ReturnValue::new(self))
                }
            }
        )*
    };
}

step_return!(bool, String, Steps, Value);

/// Error type for fallible handlers. `Send` so the result can cross threads;
/// a plain `Box<dyn Error>` is not accepted as a return type.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// What a fallible handler returns; `?` lifts any std error into it.
pub type StepResult<T = ()> = Result<T, StepError>;

/// The whole `Result` is handed back unchanged; the invoker never inspects
/// which side it holds.
impl<T, E> StepReturn for Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    const RETURNS_VALUE: bool = true;

    fn into_outcome(self) -> InvocationOutcome {
        InvocationOutcome::Returned(ReturnValue::new(self))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Handlers
// ══════════════════════════════════════════════════════════════════════════════

/// A registered step procedure.
///
/// Handlers are shared read-only across concurrent invocations, so
/// `call` must not rely on exclusive access to handler state.
pub trait StepHandler: Send + Sync {
    /// The declared parameter kinds and return arity.
    fn signature(&self) -> HandlerSignature;

    /// Call the handler with values already coerced to `signature().params`.
    fn call(&self, args: Vec<Value>) -> InvokeResult<InvocationOutcome>;
}

/// Adapts a Rust function or closure to [`StepHandler`].
pub struct FnHandler<F, Args> {
    f: F,
    _args: PhantomData<fn() -> Args>,
}

impl<F, Args> FnHandler<F, Args> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _args: PhantomData,
        }
    }
}

/// Conversion of a function or closure into a shared step handler.
pub trait IntoStepHandler<Args> {
    fn into_step_handler(self) -> Arc<dyn StepHandler>;
}

/// Shorthand for [`IntoStepHandler::into_step_handler`].
pub fn step_fn<Args, F: IntoStepHandler<Args>>(f: F) -> Arc<dyn StepHandler> {
    f.into_step_handler()
}

fn take<T: StepParam>(position: usize, value: Value) -> InvokeResult<T> {
    T::from_value(value).map_err(|v| {
        InvocationError::cannot_convert(
            position,
            v.to_string(),
            v.source_kind(),
            T::kind(),
            format!("handler received a {} value", v.kind()),
        )
    })
}

macro_rules! fn_handler {
    ($arity:expr; $($ty:ident $var:ident $idx:expr),*) => {
        impl<Func, Ret, $($ty,)*> StepHandler for FnHandler<Func, ($($ty,)*)>
        where
            Func: Fn($($ty),*) -> Ret + Send + Sync,
            Ret: StepReturn,
            $($ty: StepParam,)*
        {
            fn signature(&self) -> HandlerSignature {
                HandlerSignature::new(vec![$(<$ty as StepParam>::kind()),*], Ret::RETURNS_VALUE)
            }

            #[allow(unused_mut, unused_variables)]
            fn call(&self, args: Vec<Value>) -> InvokeResult<InvocationOutcome> {
                let got = args.len();
                if got != $arity {
                    return Err(InvocationError::ArgumentCountMismatch {
                        expected: $arity,
                        got,
                    });
                }
                let mut args = args.into_iter();
                $(
                    let $var: $ty = match args.next() {
                        Some(value) => take($idx, value)?,
                        None => {
                            return Err(InvocationError::ArgumentCountMismatch {
                                expected: $arity,
                                got,
                            })
                        }
                    };
                )*
                Ok((self.f)($($var),*).into_outcome())
            }
        }

        impl<Func, Ret, $($ty,)*> IntoStepHandler<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Ret + Send + Sync + 'static,
            Ret: StepReturn,
            $($ty: StepParam + 'static,)*
        {
            fn into_step_handler(self) -> Arc<dyn StepHandler> {
                Arc::new(FnHandler::<Func, ($($ty,)*)>::new(self))
            }
        }
    };
}

fn_handler!(0;);
fn_handler!(1; A a 0);
fn_handler!(2; A a 0, B b 1);
fn_handler!(3; A a 0, B b 1, C c 2);
fn_handler!(4; A a 0, B b 1, C c 2, D d 3);
fn_handler!(5; A a 0, B b 1, C c 2, D d 3, E e 4);
fn_handler!(6; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5);

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_types::{DocString, ErrorKind, ParameterKind};

    #[test]
    fn test_signature_from_types() {
        let h = step_fn(|_n: i32, _s: String, _d: DocString| {});
        assert_eq!(
            h.signature(),
            HandlerSignature::new(
                vec![ParameterKind::Int32, ParameterKind::String, ParameterKind::DocString],
                false
            )
        );
    }

    #[test]
    fn test_signature_return_arity() {
        let h = step_fn(|| -> Result<(), String> { Ok(()) });
        assert!(h.signature().returns_value);
        assert_eq!(h.signature().arity(), 0);
    }

    #[test]
    fn test_call_passes_values_in_order() {
        let h = step_fn(|a: i64, b: f64| -> String { format!("{a}/{b}") });
        let out = h
            .call(vec![Value::Int64(3), Value::Float64(0.5)])
            .unwrap()
            .into_value()
            .unwrap();
        assert_eq!(out.downcast::<String>().unwrap(), "3/0.5");
    }

    #[test]
    fn test_call_with_wrong_value_kind() {
        let h = step_fn(|_a: i8| {});
        let err = h.call(vec![Value::String("x".into())]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CannotConvert);
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn test_call_with_wrong_value_count() {
        let h = step_fn(|_a: i8, _b: i8| {});
        assert_eq!(
            h.call(vec![Value::Int8(1)]).unwrap_err(),
            InvocationError::ArgumentCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_return_value_downcast_mismatch_hands_back() {
        let v = ReturnValue::new(7_i32);
        assert!(v.is::<i32>());
        let v = v.downcast::<String>().unwrap_err();
        assert_eq!(v.downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn test_steps_return() {
        let h = step_fn(|| Steps::new(["I eat 5", "there should be 7 remaining"]));
        let steps = h
            .call(vec![])
            .unwrap()
            .into_value()
            .unwrap()
            .downcast::<Steps>()
            .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.iter().next().map(String::as_str), Some("I eat 5"));
    }
}
