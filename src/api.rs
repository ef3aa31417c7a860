//! Public API for interacting with the callable object model from Rust.
//!
//! Free functions over a [`Realm`]: build values (including from JSON), read
//! and write properties, and drive `bind`, `apply`, `call` and `new`.
//!
//! # Example
//!
//! ```
//! use fnbind::{Realm, api, JsValue};
//! use serde_json::json;
//!
//! let mut realm = Realm::silent();
//! let point = api::create_from_json(&mut realm, &json!({"x": 1, "y": 2})).unwrap();
//! assert_eq!(api::get_property(&point, "x").unwrap(), JsValue::from(1));
//! assert_eq!(api::to_json(&point).unwrap(), json!({"x": 1, "y": 2}));
//! ```

use crate::array_like::ArrayLike;
use crate::error::JsError;
use crate::prelude::*;
use crate::realm::Realm;
use crate::value::{CheapClone, JsObjectRef, JsValue, PropertyKey};

// ═══════════════════════════════════════════════════════════════════════════════
// Value Creation
// ═══════════════════════════════════════════════════════════════════════════════

/// Create a JsValue from any type that implements Into<JsValue>.
///
/// Works for primitive types:
/// - `bool` → JsValue::Boolean
/// - `f64`, `i32`, `u32`, `usize` → JsValue::Number
/// - `&str`, `String` → JsValue::String
/// - `()` → JsValue::Undefined
///
/// For objects and arrays, use `create_from_json()` instead.
pub fn create_value<T: Into<JsValue>>(value: T) -> JsValue {
    value.into()
}

/// Create a JsValue containing undefined.
pub fn create_undefined() -> JsValue {
    JsValue::Undefined
}

/// Create a JsValue containing null.
pub fn create_null() -> JsValue {
    JsValue::Null
}

/// Create a JsValue from a JSON value.
///
/// Objects inherit from Object.prototype and arrays from Array.prototype.
pub fn create_from_json(realm: &mut Realm, json: &serde_json::Value) -> Result<JsValue, JsError> {
    Ok(match json {
        serde_json::Value::Null => JsValue::Null,
        serde_json::Value::Bool(b) => JsValue::Boolean(*b),
        serde_json::Value::Number(n) => JsValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => JsValue::from(s.as_str()),
        serde_json::Value::Array(items) => {
            let elements = items
                .iter()
                .map(|item| create_from_json(realm, item))
                .collect::<Result<Vec<_>, _>>()?;
            JsValue::Object(realm.create_array(elements))
        }
        serde_json::Value::Object(map) => {
            let obj = realm.create_object();
            for (key, item) in map {
                let value = create_from_json(realm, item)?;
                realm.set(&obj, key, value);
            }
            JsValue::Object(obj)
        }
    })
}

/// Convert a value to JSON.
///
/// `undefined` and functions become `null`, objects keep their enumerable own
/// properties. Cyclic structures are a TypeError.
pub fn to_json(value: &JsValue) -> Result<serde_json::Value, JsError> {
    serde_json::to_value(value)
        .map_err(|e| JsError::type_error(format!("Cannot convert value to JSON: {}", e)))
}

/// Create an empty object.
pub fn create_object(realm: &mut Realm) -> JsValue {
    JsValue::Object(realm.create_object())
}

/// Create an array holding `elements`.
pub fn create_array(realm: &mut Realm, elements: Vec<JsValue>) -> JsValue {
    JsValue::Object(realm.create_array(elements))
}

/// Create an `arguments` object for `args`: array-like, but not an array.
pub fn create_arguments(realm: &mut Realm, args: &[JsValue]) -> JsValue {
    JsValue::Object(realm.create_arguments_object(args))
}

/// Wrap a Rust closure as a callable function object.
///
/// ```
/// use fnbind::{Realm, api, JsValue};
///
/// let mut realm = Realm::silent();
/// let add = api::create_function(&mut realm, "add", 2, |_realm, _this, args| {
///     let sum: f64 = args.iter().map(JsValue::to_number).sum();
///     Ok(JsValue::from(sum))
/// });
/// let add_one = api::bind(&mut realm, &add, JsValue::Undefined, &[JsValue::from(1)]).unwrap();
/// let result = api::call_function(&mut realm, &add_one, None, &[JsValue::from(41)]).unwrap();
/// assert_eq!(result, JsValue::from(42));
/// ```
pub fn create_function<F>(realm: &mut Realm, name: &str, arity: usize, func: F) -> JsValue
where
    F: Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError> + 'static,
{
    JsValue::Object(realm.create_native_function(name, func, arity))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Property Access
// ═══════════════════════════════════════════════════════════════════════════════

fn as_object<'a>(value: &'a JsValue, what: &str) -> Result<&'a JsObjectRef, JsError> {
    value
        .as_object()
        .ok_or_else(|| JsError::type_error(format!("Cannot {} of non-object", what)))
}

/// Get a property value by key, searching the prototype chain.
pub fn get_property(obj: &JsValue, key: &str) -> Result<JsValue, JsError> {
    let object = as_object(obj, "get property")?;
    let value = object.borrow().get_property(&PropertyKey::from(key));
    Ok(value.unwrap_or_default())
}

/// Get an array-like element by index.
///
/// Returns undefined if the index is missing.
pub fn get_index(arr: &JsValue, index: usize) -> Result<JsValue, JsError> {
    let object = as_object(arr, "get index")?;
    Ok(ArrayLike::get(&*object.borrow(), index))
}

/// Get all elements of an array-like as JsValues (holes become undefined).
pub fn get_elements(arr: &JsValue) -> Result<Vec<JsValue>, JsError> {
    let object = as_object(arr, "get elements")?;
    crate::array_like::create_list_from_array_like(&*object.borrow())
}

/// Set a property on an object.
pub fn set_property(obj: &JsValue, key: &str, value: JsValue) -> Result<(), JsError> {
    let object = as_object(obj, "set property")?;
    object.borrow_mut().set_property(PropertyKey::from(key), value);
    Ok(())
}

/// Push a value onto an array.
pub fn push(arr: &JsValue, value: JsValue) -> Result<(), JsError> {
    let object = as_object(arr, "push to")?;
    let mut borrowed = object.borrow_mut();
    let elements = borrowed
        .array_elements_mut()
        .ok_or_else(|| JsError::type_error("Cannot push to non-array"))?;
    elements.push(value);
    Ok(())
}

/// Get the length of an array.
///
/// Returns `None` if this is not an array.
pub fn len(arr: &JsValue) -> Option<usize> {
    let obj = arr.as_object()?;
    obj.borrow().array_elements().map(<[JsValue]>::len)
}

/// Check if an array is empty.
///
/// Returns `None` if this is not an array.
pub fn is_empty(arr: &JsValue) -> Option<bool> {
    len(arr).map(|l| l == 0)
}

/// Check if a value is an array.
pub fn is_array(value: &JsValue) -> bool {
    value.as_object().is_some_and(|obj| obj.borrow().is_array())
}

/// Get the enumerable own property keys of an object.
pub fn keys(obj: &JsValue) -> Vec<String> {
    let Some(object) = obj.as_object() else {
        return Vec::new();
    };
    let borrowed = object.borrow();
    borrowed
        .own_keys()
        .into_iter()
        .filter(|key| {
            borrowed
                .get_own_property(key)
                .is_none_or(|prop| prop.enumerable)
        })
        .map(|key| key.to_string())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Function and Method Calls
// ═══════════════════════════════════════════════════════════════════════════════

/// Call a method on an object, with the object as the receiver.
pub fn call_method(
    realm: &mut Realm,
    obj: &JsValue,
    method_name: &str,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let key = realm.key(method_name);
    let method = realm.get_property(obj, &key);
    if !method.is_callable() {
        return Err(JsError::type_error(format!(
            "{} is not a function",
            method_name
        )));
    }
    realm.call_function(&method, obj.clone(), args)
}

/// Call a function with optional `this` binding.
pub fn call_function(
    realm: &mut Realm,
    func: &JsValue,
    this: Option<&JsValue>,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let this_value = this.cloned().unwrap_or_default();
    realm.call(func, this_value, args)
}

/// `new func(...args)`
pub fn construct(realm: &mut Realm, func: &JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    realm.construct(func, args, None)
}

/// `value instanceof constructor`
pub fn instance_of(realm: &mut Realm, value: &JsValue, constructor: &JsValue) -> Result<bool, JsError> {
    realm.instance_of(value, constructor)
}

/// `func.bind(this_arg, ...bound_args)`
pub fn bind(
    realm: &mut Realm,
    func: &JsValue,
    this_arg: JsValue,
    bound_args: &[JsValue],
) -> Result<JsValue, JsError> {
    realm.bind(func, this_arg, bound_args)
}

/// `func.apply(this_arg, array_like)`; `undefined`/`null` mean no arguments
pub fn apply(
    realm: &mut Realm,
    func: &JsValue,
    this_arg: JsValue,
    array_like: &JsValue,
) -> Result<JsValue, JsError> {
    realm.apply_value(func, this_arg, array_like)
}

/// Identity of the object behind a value, if any
pub fn object_ref(value: &JsValue) -> Option<JsObjectRef> {
    value.as_object().map(CheapClone::cheap_clone)
}
