//! Argument coercion: one raw argument plus one declared kind to a [`Value`].
//!
//! The matcher only ever hands back literal text or a payload, so every
//! text-to-number parse happens here, at invocation time.

use crate::error::InvokeResult;
use crate::value::Value;
use stepwise_types::{InvocationError, ParameterKind, RawArgument};
use std::fmt::Display;
use std::str::FromStr;

/// Convert the raw argument at `position` into a value of `kind`.
///
/// Unsupported kinds fail with [`InvocationError::UnsupportedArgumentType`]
/// whatever the raw argument is.
pub fn coerce(position: usize, raw: &RawArgument, kind: &ParameterKind) -> InvokeResult<Value> {
    match kind {
        ParameterKind::Int8 => parse_int(position, raw, kind).map(Value::Int8),
        ParameterKind::Int16 => parse_int(position, raw, kind).map(Value::Int16),
        ParameterKind::Int32 => parse_int(position, raw, kind).map(Value::Int32),
        ParameterKind::Int64 => parse_int(position, raw, kind).map(Value::Int64),
        ParameterKind::Int => parse_int(position, raw, kind).map(Value::Int),
        ParameterKind::Float32 => parse_float(position, raw, kind).map(Value::Float32),
        ParameterKind::Float64 => parse_float(position, raw, kind).map(Value::Float64),
        ParameterKind::String => {
            expect_text(position, raw, kind).map(|s| Value::String(s.to_string()))
        }
        ParameterKind::Bytes => {
            expect_text(position, raw, kind).map(|s| Value::Bytes(s.as_bytes().to_vec()))
        }
        ParameterKind::DocString => raw
            .doc_string()
            .cloned()
            .map(Value::DocString)
            .ok_or_else(|| {
                shape_mismatch(
                    position,
                    raw,
                    kind,
                    "expected a doc string or a step argument holding one",
                )
            }),
        ParameterKind::DataTable => raw
            .data_table()
            .cloned()
            .map(Value::DataTable)
            .ok_or_else(|| {
                shape_mismatch(
                    position,
                    raw,
                    kind,
                    "expected a data table or a step argument holding one",
                )
            }),
        ParameterKind::Unsupported(_) => Err(InvocationError::UnsupportedArgumentType {
            position,
            target: kind.clone(),
        }),
    }
}

fn expect_text<'a>(
    position: usize,
    raw: &'a RawArgument,
    kind: &ParameterKind,
) -> InvokeResult<&'a str> {
    raw.as_text()
        .ok_or_else(|| shape_mismatch(position, raw, kind, "expected text"))
}

fn shape_mismatch(
    position: usize,
    raw: &RawArgument,
    kind: &ParameterKind,
    cause: &str,
) -> InvocationError {
    InvocationError::cannot_convert(position, raw.render(), raw.kind(), kind.clone(), cause)
}

/// Base-10 signed parse into the exact target width; overflow is an error.
fn parse_int<T>(position: usize, raw: &RawArgument, kind: &ParameterKind) -> InvokeResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text = expect_text(position, raw, kind)?;
    text.parse::<T>().map_err(|e| {
        InvocationError::cannot_convert(position, text, raw.kind(), kind.clone(), e)
    })
}

trait Float: FromStr {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

/// Decimal parse at the requested precision.
///
/// A finite literal that rounds to infinity at this precision is out of range.
fn parse_float<T>(position: usize, raw: &RawArgument, kind: &ParameterKind) -> InvokeResult<T>
where
    T: Float,
    T::Err: Display,
{
    let text = expect_text(position, raw, kind)?;
    let value = text.parse::<T>().map_err(|e| {
        InvocationError::cannot_convert(position, text, raw.kind(), kind.clone(), e)
    })?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(InvocationError::cannot_convert(
            position,
            text,
            raw.kind(),
            kind.clone(),
            "value out of range",
        ));
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_types::{DataTable, DocString, ErrorKind, RawKind, StepArgument};

    fn text(s: &str) -> RawArgument {
        RawArgument::from(s)
    }

    fn err_kind(result: InvokeResult<Value>) -> ErrorKind {
        result.expect_err("expected coercion to fail").kind()
    }

    #[test]
    fn test_int_widths() {
        assert_eq!(coerce(0, &text("-128"), &ParameterKind::Int8), Ok(Value::Int8(-128)));
        assert_eq!(coerce(0, &text("32767"), &ParameterKind::Int16), Ok(Value::Int16(32767)));
        assert_eq!(coerce(0, &text("42"), &ParameterKind::Int32), Ok(Value::Int32(42)));
        assert_eq!(
            coerce(0, &text("-9223372036854775808"), &ParameterKind::Int64),
            Ok(Value::Int64(i64::MIN))
        );
        assert_eq!(coerce(0, &text("+5"), &ParameterKind::Int), Ok(Value::Int(5)));
    }

    #[test]
    fn test_int_overflow_names_width() {
        let err = coerce(2, &text("128"), &ParameterKind::Int8).unwrap_err();
        match err {
            InvocationError::CannotConvert {
                position,
                raw_value,
                raw_kind,
                target,
                ..
            } => {
                assert_eq!(position, 2);
                assert_eq!(raw_value, "128");
                assert_eq!(raw_kind, RawKind::Text);
                assert_eq!(target, ParameterKind::Int8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_int_rejects_non_decimal() {
        for bad in ["", "abc", "1.5", " 1", "0x10", "1_000", "--1"] {
            assert_eq!(
                err_kind(coerce(0, &text(bad), &ParameterKind::Int32)),
                ErrorKind::CannotConvert,
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_int_from_payload_is_cannot_convert() {
        let raw = RawArgument::from(DocString::new("12"));
        assert_eq!(
            err_kind(coerce(0, &raw, &ParameterKind::Int)),
            ErrorKind::CannotConvert
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce(0, &text("1.5"), &ParameterKind::Float32), Ok(Value::Float32(1.5)));
        assert_eq!(
            coerce(0, &text("-2.25e3"), &ParameterKind::Float64),
            Ok(Value::Float64(-2250.0))
        );
        assert_eq!(
            coerce(0, &text("inf"), &ParameterKind::Float64),
            Ok(Value::Float64(f64::INFINITY))
        );
        assert_eq!(
            coerce(0, &text("-Infinity"), &ParameterKind::Float32),
            Ok(Value::Float32(f32::NEG_INFINITY))
        );
    }

    #[test]
    fn test_float_out_of_range_for_precision() {
        assert_eq!(
            err_kind(coerce(0, &text("1e40"), &ParameterKind::Float32)),
            ErrorKind::CannotConvert
        );
        assert_eq!(coerce(0, &text("1e40"), &ParameterKind::Float64), Ok(Value::Float64(1e40)));
        assert_eq!(
            err_kind(coerce(0, &text("1e400"), &ParameterKind::Float64)),
            ErrorKind::CannotConvert
        );
    }

    #[test]
    fn test_float_rejects_garbage() {
        assert_eq!(
            err_kind(coerce(0, &text("one"), &ParameterKind::Float64)),
            ErrorKind::CannotConvert
        );
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(
            coerce(0, &text("  spaced  "), &ParameterKind::String),
            Ok(Value::String("  spaced  ".into()))
        );
    }

    #[test]
    fn test_string_from_table_names_shape() {
        let raw = RawArgument::from(StepArgument::DataTable(DataTable::from_rows([["a"]])));
        let err = coerce(1, &raw, &ParameterKind::String).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CannotConvert);
        assert!(err.to_string().contains("step argument (data table)"));
    }

    #[test]
    fn test_bytes_are_utf8_of_text() {
        assert_eq!(
            coerce(0, &text("abc"), &ParameterKind::Bytes),
            Ok(Value::Bytes(vec![0x61, 0x62, 0x63]))
        );
        assert_eq!(
            coerce(0, &text("é"), &ParameterKind::Bytes),
            Ok(Value::Bytes(vec![0xc3, 0xa9]))
        );
    }

    #[test]
    fn test_doc_string_wrapped_and_unwrapped() {
        let doc = DocString::new("hello\nworld");
        let wrapped = RawArgument::from(StepArgument::DocString(doc.clone()));
        let bare = RawArgument::from(doc.clone());
        assert_eq!(
            coerce(0, &wrapped, &ParameterKind::DocString),
            Ok(Value::DocString(doc.clone()))
        );
        assert_eq!(coerce(0, &bare, &ParameterKind::DocString), Ok(Value::DocString(doc)));
    }

    #[test]
    fn test_doc_string_rejects_wrapped_table() {
        let raw = RawArgument::from(StepArgument::DataTable(DataTable::default()));
        assert_eq!(
            err_kind(coerce(0, &raw, &ParameterKind::DocString)),
            ErrorKind::CannotConvert
        );
    }

    #[test]
    fn test_data_table_wrapped_and_unwrapped() {
        let table = DataTable::from_rows([["x", "y"], ["1", "2"]]);
        let wrapped = RawArgument::from(StepArgument::DataTable(table.clone()));
        assert_eq!(
            coerce(0, &wrapped, &ParameterKind::DataTable),
            Ok(Value::DataTable(table.clone()))
        );
        assert_eq!(
            coerce(0, &RawArgument::from(table.clone()), &ParameterKind::DataTable),
            Ok(Value::DataTable(table))
        );
        assert_eq!(
            err_kind(coerce(0, &text("x"), &ParameterKind::DataTable)),
            ErrorKind::CannotConvert
        );
    }

    #[test]
    fn test_unsupported_kind_ignores_raw_argument() {
        let kind = ParameterKind::Unsupported("map".into());
        for raw in [
            text("42"),
            RawArgument::from(DocString::new("doc")),
            RawArgument::from(DataTable::default()),
        ] {
            assert_eq!(
                coerce(4, &raw, &kind),
                Err(InvocationError::UnsupportedArgumentType {
                    position: 4,
                    target: kind.clone(),
                })
            );
        }
    }
}
