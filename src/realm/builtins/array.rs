//! Array constructor and the generic Array.prototype methods.
//!
//! `slice`, `forEach` and `push` only rely on `length` and indexed
//! properties, so they work on any array-like receiver (`arguments` objects
//! included), not just arrays.

use crate::array_like::to_length;
use crate::error::JsError;
use crate::prelude::*;
use crate::realm::Realm;
use crate::value::{
    CheapClone, JsObjectRef, JsValue, MAX_DENSE_GROWTH, MAX_SAFE_INTEGER, NativeFunction,
    Property, PropertyKey, to_integer_or_infinity,
};

/// Largest result a generic (non-array) `slice` will materialize
const MAX_GENERIC_SLICE: usize = 1 << 20;

/// Initialize Array.prototype with slice, forEach and push
pub fn init_array_prototype(realm: &mut Realm) {
    let proto = realm.array_prototype.cheap_clone();

    realm.register_method(&proto, "slice", array_slice, 2);
    realm.register_method(&proto, "forEach", array_for_each, 1);
    realm.register_method(&proto, "push", array_push, 1);
}

/// Create the global Array constructor with `Array.isArray`
pub fn create_array_constructor(realm: &mut Realm) -> JsObjectRef {
    let name = realm.intern("Array");
    let constructor =
        realm.create_function(NativeFunction::new(name, 1, array_constructor_fn).constructor());

    let proto_key = realm.key("prototype");
    constructor.borrow_mut().define_property(
        proto_key,
        Property::with_attributes(
            JsValue::Object(realm.array_prototype.cheap_clone()),
            false,
            false,
            false,
        ),
    );

    let ctor_key = realm.key("constructor");
    realm
        .array_prototype
        .borrow_mut()
        .define_property(ctor_key, Property::hidden(JsValue::Object(constructor.cheap_clone())));

    realm.register_method(&constructor, "isArray", array_is_array, 1);

    constructor
}

/// `Array(n)` makes `n` undefined slots, `Array(a, b, ...)` holds its arguments
fn array_constructor_fn(
    realm: &mut Realm,
    _this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let elements = match args {
        [JsValue::Number(n)] => {
            let len = *n as u32;
            if len as f64 != *n || len as usize > MAX_DENSE_GROWTH {
                return Err(JsError::range_error("Invalid array length"));
            }
            vec![JsValue::Undefined; len as usize]
        }
        _ => args.to_vec(),
    };
    Ok(JsValue::Object(realm.create_array(elements)))
}

pub fn array_is_array(
    _realm: &mut Realm,
    _this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let is_array = match args.first() {
        Some(JsValue::Object(obj)) => obj.borrow().is_array(),
        _ => false,
    };
    Ok(JsValue::Boolean(is_array))
}

/// The receiver of a generic method as an object, or None for primitives
/// that have no indexed properties. `undefined`/`null` are a TypeError.
fn this_object(this: &JsValue, method: &str) -> Result<Option<JsObjectRef>, JsError> {
    match this {
        JsValue::Object(obj) => Ok(Some(obj.cheap_clone())),
        JsValue::Undefined | JsValue::Null => Err(JsError::type_error(format!(
            "Array.prototype.{} called on null or undefined",
            method
        ))),
        _ => Ok(None),
    }
}

fn length_of(realm: &mut Realm, obj: &JsObjectRef) -> usize {
    let key = realm.key("length");
    to_length(&obj.borrow().get_property(&key).unwrap_or_default())
}

/// Resolve a relative `slice` bound against `len`
fn relative_index(value: &JsValue, len: usize) -> usize {
    let relative = to_integer_or_infinity(value.to_number());
    if relative < 0.0 {
        (len as f64 + relative).max(0.0) as usize
    } else {
        relative.min(len as f64) as usize
    }
}

pub fn array_slice(realm: &mut Realm, this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    let Some(obj) = this_object(&this, "slice")? else {
        return Ok(JsValue::Object(realm.create_array(Vec::new())));
    };

    let len = length_of(realm, &obj);
    let start = args.first().map_or(0, |v| relative_index(v, len));
    let end = match args.get(1) {
        None | Some(JsValue::Undefined) => len,
        Some(v) => relative_index(v, len),
    };

    // Fast path: dense arrays copy a sub-slice
    let dense = obj
        .borrow()
        .array_elements()
        .map(|elements| elements.get(start..end.max(start)).unwrap_or_default().to_vec());
    if let Some(elements) = dense {
        return Ok(JsValue::Object(realm.create_array(elements)));
    }

    let count = end.saturating_sub(start);
    if count > MAX_GENERIC_SLICE {
        return Err(JsError::range_error("Invalid array length"));
    }
    let elements: Vec<JsValue> = {
        let o = obj.borrow();
        (start..end)
            .map(|k| o.get_property(&PropertyKey::from_index(k)).unwrap_or_default())
            .collect()
    };
    Ok(JsValue::Object(realm.create_array(elements)))
}

/// Calls the callback for every present index below the initial length.
/// Missing indices are skipped; elements appended during the walk are not
/// visited.
pub fn array_for_each(
    realm: &mut Realm,
    this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let obj = this_object(&this, "forEach")?;
    let callback = args.first().cloned().unwrap_or_default();
    if !callback.is_callable() {
        return Err(JsError::type_error(format!(
            "{} is not a function",
            callback.to_js_string()
        )));
    }
    let Some(obj) = obj else {
        return Ok(JsValue::Undefined);
    };
    let this_arg = args.get(1).cloned().unwrap_or_default();

    let len = length_of(realm, &obj);
    for k in 0..len {
        let key = PropertyKey::from_index(k);
        // The borrow must end before the callback runs: it may mutate the object
        let value = {
            let o = obj.borrow();
            if !o.has_property(&key) {
                continue;
            }
            o.get_property(&key).unwrap_or_default()
        };
        realm.call_function(
            &callback,
            this_arg.clone(),
            &[value, JsValue::from(k), JsValue::Object(obj.cheap_clone())],
        )?;
    }
    Ok(JsValue::Undefined)
}

pub fn array_push(realm: &mut Realm, this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    let Some(obj) = this_object(&this, "push")? else {
        return Err(JsError::type_error("Array.prototype.push called on a primitive"));
    };

    let pushed = obj.borrow_mut().array_elements_mut().map(|elements| {
        elements.extend_from_slice(args);
        elements.len()
    });
    if let Some(new_length) = pushed {
        return Ok(JsValue::from(new_length));
    }

    // Generic receiver: write at length.. and update length
    let len = length_of(realm, &obj);
    if (len + args.len()) as f64 > MAX_SAFE_INTEGER {
        return Err(JsError::type_error("Pushing past the maximum array-like length"));
    }
    let length_key = realm.key("length");
    let mut o = obj.borrow_mut();
    for (i, arg) in args.iter().enumerate() {
        o.set_property(PropertyKey::from_index(len + i), arg.clone());
    }
    let new_length = len + args.len();
    o.set_property(length_key, JsValue::from(new_length));
    Ok(JsValue::from(new_length))
}
