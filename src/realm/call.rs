//! Invocation protocol: plain calls, constructor calls and `instanceof`.
//!
//! Bound functions only override the receiver on the plain-call path. On the
//! construct path they forward to their target, redirecting `new_target` to
//! the target when it was the bound function itself, so the fresh object
//! inherits from the original function's `prototype`.

use super::{Realm, StackFrame};
use crate::error::JsError;
use crate::prelude::*;
use crate::value::{
    CheapClone, JsFunction, JsObject, JsObjectRef, JsString, JsValue, PropertyKey, ThisMode,
};

impl Realm {
    /// Invoke `callee` with the given receiver and arguments ([[Call]]).
    ///
    /// Errors raised inside the callee propagate unchanged.
    pub fn call_function(
        &mut self,
        callee: &JsValue,
        this_value: JsValue,
        args: &[JsValue],
    ) -> Result<JsValue, JsError> {
        let JsValue::Object(obj) = callee else {
            return Err(JsError::type_error(format!(
                "{} is not a function",
                callee.to_js_string()
            )));
        };

        let func = {
            let obj_ref = obj.borrow();
            match obj_ref.as_function() {
                // JsFunction clone is cheap: Rc closure or boxed bound data
                Some(f) => f.clone(),
                None => return Err(JsError::type_error("object is not a function")),
            }
        };

        match func {
            JsFunction::Native(native) => {
                let this_value = match native.this_mode {
                    ThisMode::Sloppy if this_value.is_null_or_undefined() => {
                        JsValue::Object(self.global.cheap_clone())
                    }
                    _ => this_value,
                };
                self.enter_frame(native.name.cheap_clone(), false)?;
                let result = (native.func)(self, this_value, args);
                self.call_stack.pop();
                result
            }

            JsFunction::Bound(bound_data) => {
                // The bound receiver replaces whatever the caller supplied;
                // bound arguments go in front of the call-time ones.
                let mut full_args = Vec::with_capacity(bound_data.bound_args.len() + args.len());
                full_args.extend_from_slice(&bound_data.bound_args);
                full_args.extend_from_slice(args);

                self.enter_frame(bound_frame_name(obj), false)?;
                let result = self.call_function(
                    &JsValue::Object(bound_data.target.cheap_clone()),
                    bound_data.this_arg.clone(),
                    &full_args,
                );
                self.call_stack.pop();
                result
            }
        }
    }

    /// Invoke `callee` as a constructor ([[Construct]]).
    ///
    /// `new_target` defaults to `callee`; the fresh receiver inherits from
    /// `new_target.prototype` (Object.prototype when that is not an object).
    /// An object returned by the constructor body replaces the fresh receiver.
    pub fn construct(
        &mut self,
        callee: &JsValue,
        args: &[JsValue],
        new_target: Option<&JsValue>,
    ) -> Result<JsValue, JsError> {
        let Some(obj) = callee.as_object().filter(|o| o.borrow().is_constructor()) else {
            return Err(JsError::type_error(format!(
                "{} is not a constructor",
                describe_callee(callee)
            )));
        };
        let new_target = new_target.unwrap_or(callee);

        let func = match obj.borrow().as_function() {
            Some(f) => f.clone(),
            None => return Err(JsError::internal_error("constructor without a function slot")),
        };

        match func {
            JsFunction::Native(native) => {
                let prototype = self.prototype_from_constructor(new_target);
                let receiver = JsObjectRef::new(JsObject::with_prototype(prototype));

                self.enter_frame(native.name.cheap_clone(), true)?;
                let result = (native.func)(self, JsValue::Object(receiver.cheap_clone()), args);
                self.call_stack.pop();

                match result? {
                    returned @ JsValue::Object(_) => Ok(returned),
                    _ => Ok(JsValue::Object(receiver)),
                }
            }

            JsFunction::Bound(bound_data) => {
                let mut full_args = Vec::with_capacity(bound_data.bound_args.len() + args.len());
                full_args.extend_from_slice(&bound_data.bound_args);
                full_args.extend_from_slice(args);

                let target = JsValue::Object(bound_data.target.cheap_clone());
                let new_target = match new_target {
                    JsValue::Object(nt) if JsObjectRef::ptr_eq(nt, obj) => target.clone(),
                    other => other.clone(),
                };

                self.enter_frame(bound_frame_name(obj), true)?;
                let result = self.construct(&target, &full_args, Some(&new_target));
                self.call_stack.pop();
                result
            }
        }
    }

    /// Check whether a value has a [[Construct]] internal method
    pub fn is_constructor(&self, value: &JsValue) -> bool {
        value
            .as_object()
            .is_some_and(|obj| obj.borrow().is_constructor())
    }

    /// `value instanceof constructor`
    pub fn instance_of(&mut self, value: &JsValue, constructor: &JsValue) -> Result<bool, JsError> {
        if !constructor.is_object() {
            return Err(JsError::type_error(
                "Right-hand side of 'instanceof' is not an object",
            ));
        }
        if !constructor.is_callable() {
            return Err(JsError::type_error(
                "Right-hand side of 'instanceof' is not callable",
            ));
        }
        self.ordinary_has_instance(constructor, value)
    }

    /// OrdinaryHasInstance: bound functions defer to their target, everything
    /// else walks the prototype chain of `value` looking for
    /// `constructor.prototype`.
    fn ordinary_has_instance(
        &mut self,
        constructor: &JsValue,
        value: &JsValue,
    ) -> Result<bool, JsError> {
        let Some(mut ctor) = constructor.as_callable().cloned() else {
            return Ok(false);
        };

        // Bound chains can be arbitrarily deep; unwrap them iteratively
        loop {
            let target = match ctor.borrow().as_function() {
                Some(JsFunction::Bound(bound)) => bound.target.cheap_clone(),
                _ => break,
            };
            ctor = target;
        }

        let JsValue::Object(instance) = value else {
            return Ok(false);
        };

        let proto_key = self.key("prototype");
        let proto_val = ctor.borrow().get_property(&proto_key);
        let Some(JsValue::Object(ctor_proto)) = proto_val else {
            return Err(JsError::type_error(
                "Function has non-object prototype in instanceof check",
            ));
        };

        // Walk the prototype chain of the instance
        let mut current = instance.borrow().prototype.clone();
        while let Some(proto) = current {
            if JsObjectRef::ptr_eq(&proto, &ctor_proto) {
                return Ok(true);
            }
            current = proto.borrow().prototype.clone();
        }
        Ok(false)
    }

    /// GetPrototypeFromConstructor with Object.prototype as the fallback
    fn prototype_from_constructor(&mut self, constructor: &JsValue) -> JsObjectRef {
        let proto_key = self.key("prototype");
        match self.get_property(constructor, &proto_key) {
            JsValue::Object(proto) => proto,
            _ => self.object_prototype.cheap_clone(),
        }
    }

    fn enter_frame(&mut self, function_name: JsString, construct: bool) -> Result<(), JsError> {
        if self.call_stack.len() >= self.max_call_depth {
            return Err(JsError::range_error("Maximum call stack size exceeded"));
        }
        self.call_stack.push(StackFrame {
            function_name,
            construct,
        });
        Ok(())
    }
}

/// The `name` property of a function object, when it is a string
fn function_name(func: &JsObjectRef) -> Option<JsString> {
    match func.borrow().get_property(&PropertyKey::from("name")) {
        Some(JsValue::String(name)) => Some(name),
        _ => None,
    }
}

/// Frame name of a bound function: its `name` property ("bound f")
fn bound_frame_name(func: &JsObjectRef) -> JsString {
    function_name(func).unwrap_or_else(|| JsString::from("bound"))
}

fn describe_callee(callee: &JsValue) -> String {
    match callee {
        JsValue::Object(obj) if obj.borrow().is_callable() => match function_name(obj) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "anonymous function".to_string(),
        },
        JsValue::Object(_) => "object".to_string(),
        other => other.to_js_string().to_string(),
    }
}
