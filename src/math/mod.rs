//! Integer arithmetic: factorial and truncating remainder.
//!
//! Every operation comes in two flavors. The checked one returns
//! `UtilResult`; the legacy one keeps the C `int` contract (always returns a
//! value, never traps) and backs the exported `fact` and `my_mod`.

use crate::models::error::{UtilResult, UtilityError};
use crate::models::last_error;

/// Largest `n` whose factorial fits in an `i32`.
pub const MAX_EXACT_FACTORIAL: i32 = 12;

/// Checked factorial.
///
/// Returns `1` for every `n <= 1`, negative inputs included. Fails with
/// `ArithmeticOverflow` from `n = 13` on.
pub fn factorial(n: i32) -> UtilResult<i32> {
    let mut acc: i32 = 1;
    for k in 2..=n {
        acc = acc.checked_mul(k).ok_or_else(|| {
            tracing::debug!(n, "factorial overflow");
            UtilityError::ArithmeticOverflow {
                operation: "factorial",
                input: i64::from(n),
            }
        })?;
    }
    Ok(acc)
}

/// Factorial with two's-complement wraparound on overflow.
///
/// Matches what the recursive C `int` implementation produces on common
/// platforms, e.g. `factorial_wrapping(13) == 1_932_053_504`, without the
/// recursion.
///
/// From `n = 34` on the product carries at least 32 factors of two, so the
/// wrapped value is `0` and stays there; the loop stops as soon as it hits it.
pub fn factorial_wrapping(n: i32) -> i32 {
    let mut acc: i32 = 1;
    for k in 2..=n {
        acc = acc.wrapping_mul(k);
        if acc == 0 {
            break;
        }
    }
    acc
}

/// Checked truncating remainder: the result takes the sign of `x`.
///
/// `y == 0` fails with `DivisionByZero`. `i32::MIN % -1` fails with
/// `ArithmeticOverflow` because the implied quotient is not representable.
pub fn modulo(x: i32, y: i32) -> UtilResult<i32> {
    if y == 0 {
        tracing::debug!(x, "modulo by zero");
        return Err(UtilityError::DivisionByZero { dividend: x });
    }
    x.checked_rem(y).ok_or(UtilityError::ArithmeticOverflow {
        operation: "modulo",
        input: i64::from(x),
    })
}

/// Remainder with the C `int` signature that never traps.
///
/// A zero divisor yields `0` and records `DivisionByZero` as the calling
/// thread's last error. `i32::MIN % -1` yields `0`, the exact remainder.
pub fn modulo_legacy(x: i32, y: i32) -> i32 {
    match modulo(x, y) {
        Ok(r) => r,
        Err(err @ UtilityError::DivisionByZero { .. }) => {
            tracing::warn!(x, "my_mod called with zero divisor");
            last_error::record(&err);
            0
        }
        Err(_) => x.wrapping_rem(y),
    }
}
