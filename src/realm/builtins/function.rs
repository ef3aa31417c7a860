//! Function.prototype built-in methods (call, apply, bind) and the Function
//! constructor.
//!
//! [`bind_function`] and [`apply_function`] are the Binder and Applier; the
//! `Function.prototype` methods are thin wrappers that pull the receiver and
//! argument list out of a native call.

use crate::array_like::{ArrayLike, create_list_from_array_like};
use crate::arity::bound_function_length;
use crate::error::JsError;
use crate::prelude::*;
use crate::realm::Realm;
use crate::value::{
    BoundFunctionData, CheapClone, JsFunction, JsObjectRef, JsString, JsValue, NativeFunction,
    Property,
};

/// Initialize Function.prototype with call, apply, bind methods
pub fn init_function_prototype(realm: &mut Realm) {
    let proto = realm.function_prototype.cheap_clone();

    realm.register_method(&proto, "call", function_call, 1);
    realm.register_method(&proto, "apply", function_apply, 2);
    realm.register_method(&proto, "bind", function_bind, 1);
}

/// Create the global Function constructor.
///
/// There is no source compiler, so only `Function()` with no arguments
/// succeeds (an empty function). Its `prototype` is Function.prototype.
pub fn create_function_constructor(realm: &mut Realm) -> JsObjectRef {
    let name = realm.intern("Function");
    let constructor =
        realm.create_function(NativeFunction::new(name, 1, function_constructor_fn).constructor());

    let proto_key = realm.key("prototype");
    constructor.borrow_mut().define_property(
        proto_key,
        Property::with_attributes(
            JsValue::Object(realm.function_prototype.cheap_clone()),
            false,
            false,
            false,
        ),
    );

    let ctor_key = realm.key("constructor");
    realm
        .function_prototype
        .borrow_mut()
        .define_property(ctor_key, Property::hidden(JsValue::Object(constructor.cheap_clone())));

    constructor
}

fn function_constructor_fn(
    realm: &mut Realm,
    _this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    if !args.is_empty() {
        return Err(JsError::type_error(
            "Function constructor cannot compile source text",
        ));
    }
    let f = realm.create_native_function("anonymous", |_, _, _| Ok(JsValue::Undefined), 0);
    Ok(JsValue::Object(f))
}

// Function.prototype.call - call function with specified this value and arguments
pub fn function_call(realm: &mut Realm, this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    // `this` is the function to call
    // args[0] is the thisArg for the call
    // args[1..] are the arguments
    let this_arg = args.first().cloned().unwrap_or_default();
    let call_args = args.get(1..).unwrap_or_default();
    realm.call(&this, this_arg, call_args)
}

// Function.prototype.apply - call function with specified this value and an array-like of arguments
pub fn function_apply(realm: &mut Realm, this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    let this_arg = args.first().cloned().unwrap_or_default();
    let array_like = args.get(1).cloned().unwrap_or_default();
    apply_function(realm, &this, this_arg, &array_like)
}

// Function.prototype.bind - create a new function with bound this value and pre-filled arguments
pub fn function_bind(realm: &mut Realm, this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    let this_arg = args.first().cloned().unwrap_or_default();
    let bound_args = args.get(1..).unwrap_or_default();
    bind_function(realm, &this, this_arg, bound_args).map(JsValue::Object)
}

/// Create a bound function over `target`.
///
/// The result calls `target` with `this_arg` and `bound_args` prepended to the
/// call-time arguments. Under `new` the bound receiver is ignored. Its
/// `length` is the target's own `length` minus the bound argument count
/// (never below zero) and its `name` is `"bound " + target.name`. The target
/// is never modified.
pub fn bind_function(
    realm: &mut Realm,
    target: &JsValue,
    this_arg: JsValue,
    bound_args: &[JsValue],
) -> Result<JsObjectRef, JsError> {
    let Some(target_fn) = target.as_callable().cloned() else {
        return Err(JsError::invalid_operand("Function.prototype.bind", target));
    };

    let length_key = realm.key("length");
    let name_key = realm.key("name");
    let (target_length, target_name, target_proto) = {
        let t = target_fn.borrow();
        (
            t.get_own(&length_key).unwrap_or_default(),
            t.get_property(&name_key).unwrap_or_default(),
            t.prototype.clone(),
        )
    };

    let length = bound_function_length(&target_length, bound_args.len());
    let name = match target_name {
        JsValue::String(s) => JsString::from("bound ") + &s,
        _ => JsString::from("bound "),
    };

    let bound = realm.create_function_object(
        JsFunction::Bound(Box::new(BoundFunctionData {
            target: target_fn,
            this_arg,
            bound_args: Rc::from(bound_args),
        })),
        name,
        length,
    );
    // [[Prototype]] follows the target, not Function.prototype
    bound.borrow_mut().prototype = target_proto;

    Ok(bound)
}

/// Invoke `target` with the arguments held by an array-like value.
///
/// `undefined` and `null` mean no arguments. Any other primitive is a
/// TypeError.
pub fn apply_function(
    realm: &mut Realm,
    target: &JsValue,
    this_arg: JsValue,
    array_like: &JsValue,
) -> Result<JsValue, JsError> {
    if !target.is_callable() {
        return Err(JsError::invalid_operand("Function.prototype.apply", target));
    }

    let call_args = match array_like {
        JsValue::Undefined | JsValue::Null => Vec::new(),
        JsValue::Object(obj) => create_list_from_array_like(&*obj.borrow())?,
        _ => {
            return Err(JsError::type_error(
                "CreateListFromArrayLike called on non-object",
            ));
        }
    };

    realm.call_function(target, this_arg, &call_args)
}

/// Invoke `target` with the arguments held by a Rust-side array-like
pub fn apply_array_like<A: ArrayLike + ?Sized>(
    realm: &mut Realm,
    target: &JsValue,
    this_arg: JsValue,
    array_like: &A,
) -> Result<JsValue, JsError> {
    if !target.is_callable() {
        return Err(JsError::invalid_operand("Function.prototype.apply", target));
    }
    let call_args = create_list_from_array_like(array_like)?;
    realm.call_function(target, this_arg, &call_args)
}
