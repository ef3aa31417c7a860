//! Reported arity of bound functions.
//!
//! A bound function's `length` is the target's declared parameter count minus
//! the number of pre-bound arguments, never below zero. The value is metadata
//! only: every call-time argument is still delivered to the target.

use crate::value::{JsValue, MAX_SAFE_INTEGER, to_integer_or_infinity};

/// `max(0, original_arity - bound_arg_count)`
#[inline]
pub fn compute_length(original_arity: usize, bound_arg_count: usize) -> usize {
    original_arity.saturating_sub(bound_arg_count)
}

/// Compute the `length` of a bound function from the target's own `length`
/// property value.
///
/// A missing or non-Number `length` counts as 0. `+Infinity` stays
/// `+Infinity`, `-Infinity` gives 0, and fractional lengths are truncated
/// toward zero before subtracting.
pub fn bound_function_length(target_length: &JsValue, bound_arg_count: usize) -> f64 {
    let JsValue::Number(n) = target_length else {
        return 0.0;
    };
    if *n == f64::INFINITY {
        return f64::INFINITY;
    }
    let arity = to_integer_or_infinity(*n);
    if arity <= 0.0 {
        return 0.0;
    }
    if arity <= MAX_SAFE_INTEGER {
        compute_length(arity as usize, bound_arg_count) as f64
    } else {
        (arity - bound_arg_count as f64).max(0.0)
    }
}
