//! Array-like argument sources.
//!
//! `apply` only needs a `length` and indexed lookup, not a real sequence.
//! [`ArrayLike`] captures exactly that; slices, vectors and objects all
//! implement it.

use crate::error::JsError;
use crate::prelude::*;
use crate::value::{JsObject, JsValue, MAX_SAFE_INTEGER, PropertyKey, to_integer_or_infinity};

/// Upper bound on the number of arguments an array-like may expand into.
pub const MAX_ARGUMENTS: usize = 65_536;

/// Something with a length and values at indices `0..length`.
pub trait ArrayLike {
    /// Number of slots, already normalized to a non-negative integer
    fn length(&self) -> usize;

    /// Value at `index`; a missing slot is `undefined`, never an error
    fn get(&self, index: usize) -> JsValue;
}

impl ArrayLike for [JsValue] {
    fn length(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> JsValue {
        <[JsValue]>::get(self, index).cloned().unwrap_or_default()
    }
}

impl ArrayLike for Vec<JsValue> {
    fn length(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> JsValue {
        self.as_slice().get(index).cloned().unwrap_or_default()
    }
}

impl ArrayLike for JsObject {
    fn length(&self) -> usize {
        let length = self
            .get_property(&PropertyKey::from("length"))
            .unwrap_or_default();
        to_length(&length)
    }

    fn get(&self, index: usize) -> JsValue {
        self.get_property(&PropertyKey::from_index(index))
            .unwrap_or_default()
    }
}

/// ToLength: ToNumber, then truncate toward zero, clamped to `[0, 2^53 - 1]`.
///
/// NaN, negative values and anything non-numeric become 0.
pub fn to_length(value: &JsValue) -> usize {
    let len = to_integer_or_infinity(value.to_number());
    if len <= 0.0 {
        return 0;
    }
    // Float-to-int `as` saturates on targets where usize is narrower
    len.min(MAX_SAFE_INTEGER) as usize
}

/// Expand an array-like into an argument list.
///
/// Slots are read in ascending index order and absent ones become
/// `undefined`; positions are never compacted.
pub fn create_list_from_array_like<A: ArrayLike + ?Sized>(
    source: &A,
) -> Result<Vec<JsValue>, JsError> {
    let len = source.length();
    if len > MAX_ARGUMENTS {
        return Err(JsError::range_error("Too many arguments in function call"));
    }
    Ok((0..len).map(|index| source.get(index)).collect())
}
