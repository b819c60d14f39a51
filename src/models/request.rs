use serde::{Deserialize, Serialize};

use super::context::LibraryContext;
use super::error::{ErrorKind, UtilResult, UtilityError};
use crate::{clock, math};

/// A single library call, as received in a JSON envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Checked factorial of `n`.
    Factorial { n: i32 },
    /// Checked truncating remainder `x % y`.
    Modulo { x: i32, y: i32 },
    /// Current local time, ctime layout.
    CurrentTime,
    /// Read the context's shared constant.
    GetConstant,
    /// Replace the context's shared constant.
    SetConstant { value: f64 },
}

/// Successful result of a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseValue {
    Int(i32),
    Float(f64),
    Text(String),
}

/// JSON envelope returned for every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        value: ResponseValue,
    },
    Error {
        code: i32,
        kind: ErrorKind,
        message: String,
    },
}

impl Response {
    pub fn from_error(err: &UtilityError) -> Self {
        Response::Error {
            code: err.code(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl Request {
    /// Runs the request against `ctx`.
    pub fn execute(&self, ctx: &mut LibraryContext) -> UtilResult<ResponseValue> {
        let value = match *self {
            Request::Factorial { n } => ResponseValue::Int(math::factorial(n)?),
            Request::Modulo { x, y } => ResponseValue::Int(math::modulo(x, y)?),
            Request::CurrentTime => ResponseValue::Text(clock::current_time_string()?),
            Request::GetConstant => ResponseValue::Float(ctx.shared_constant()),
            Request::SetConstant { value } => {
                ctx.set_shared_constant(value)?;
                ResponseValue::Float(value)
            }
        };
        Ok(value)
    }
}

/// Parses a JSON request, executes it and serializes the outcome.
///
/// Always produces a JSON document; failures become a `status: "error"`
/// envelope instead of an `Err`.
pub fn handle_json(input: &str, ctx: &mut LibraryContext) -> String {
    let outcome = serde_json::from_str::<Request>(input)
        .map_err(UtilityError::from)
        .and_then(|request| {
            tracing::debug!(?request, "handling request");
            request.execute(ctx)
        });

    let response = match outcome {
        Ok(value) => Response::Ok { value },
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            Response::from_error(&err)
        }
    };

    // Serializing these plain enums cannot fail; fall back to a fixed document anyway.
    serde_json::to_string(&response).unwrap_or_else(|_| {
        r#"{"status":"error","code":5,"kind":"invalid_request","message":"unserializable response"}"#
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(input: &str, ctx: &mut LibraryContext) -> Value {
        serde_json::from_str(&handle_json(input, ctx)).unwrap()
    }

    #[test]
    fn test_factorial_request() {
        let mut ctx = LibraryContext::new();
        let out = call(r#"{"op":"factorial","n":5}"#, &mut ctx);
        assert_eq!(out, json!({"status": "ok", "value": 120}));
    }

    #[test]
    fn test_modulo_request_keeps_sign_of_dividend() {
        let mut ctx = LibraryContext::new();
        let out = call(r#"{"op":"modulo","x":-7,"y":3}"#, &mut ctx);
        assert_eq!(out, json!({"status": "ok", "value": -1}));
    }

    #[test]
    fn test_division_by_zero_is_an_error_envelope() {
        let mut ctx = LibraryContext::new();
        let out = call(r#"{"op":"modulo","x":7,"y":0}"#, &mut ctx);
        assert_eq!(out["status"], "error");
        assert_eq!(out["kind"], "division_by_zero");
        assert_eq!(out["code"], 2);
    }

    #[test]
    fn test_factorial_overflow_is_an_error_envelope() {
        let mut ctx = LibraryContext::new();
        let out = call(r#"{"op":"factorial","n":13}"#, &mut ctx);
        assert_eq!(out["kind"], "arithmetic_overflow");
    }

    #[test]
    fn test_constant_requests_use_the_context() {
        let mut ctx = LibraryContext::new();
        assert_eq!(call(r#"{"op":"get_constant"}"#, &mut ctx)["value"], 3.0);

        let out = call(r#"{"op":"set_constant","value":4.5}"#, &mut ctx);
        assert_eq!(out, json!({"status": "ok", "value": 4.5}));
        assert_eq!(ctx.shared_constant(), 4.5);
        assert_eq!(call(r#"{"op":"get_constant"}"#, &mut ctx)["value"], 4.5);
    }

    #[test]
    fn test_current_time_request_returns_text() {
        let mut ctx = LibraryContext::new();
        let out = call(r#"{"op":"current_time"}"#, &mut ctx);
        let text = out["value"].as_str().unwrap();
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_malformed_and_unknown_requests() {
        let mut ctx = LibraryContext::new();
        for input in ["", "{", r#"{"op":"sqrt","n":4}"#, r#"{"op":"factorial"}"#] {
            let out = call(input, &mut ctx);
            assert_eq!(out["kind"], "invalid_request", "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_request_serializes_with_op_tag() {
        let json = serde_json::to_value(Request::Modulo { x: 7, y: 3 }).unwrap();
        assert_eq!(json, json!({"op": "modulo", "x": 7, "y": 3}));
    }
}
