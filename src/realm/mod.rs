//! The host realm: intrinsic objects, object/function creation and the
//! invocation protocol bound functions and `apply` are defined against.

// Builtin function implementations (split into separate files)
pub mod builtins;

// Plain call, constructor call and instanceof
mod call;

use crate::error::JsError;
use crate::platform::{ConsoleProvider, NoOpConsoleProvider};
use crate::prelude::*;
use crate::string_dict::StringDict;
use crate::value::{
    CheapClone, ExoticObject, JsFunction, JsObject, JsObjectRef, JsString, JsValue,
    NativeFunction, Property, PropertyKey,
};

/// Default limit on nested invocations (plain and constructor calls).
///
/// Host functions are Rust closures, so every nested invocation consumes
/// native stack; the limit keeps runaway recursion a RangeError.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// A stack frame for tracking the call stack
#[derive(Debug, Clone)]
pub struct StackFrame {
    /// Function name ("" for anonymous functions)
    pub function_name: JsString,
    /// Whether the frame was entered through `new`
    pub construct: bool,
}

/// The realm state
pub struct Realm {
    /// Global object; the default receiver of sloppy functions
    pub global: JsObjectRef,
    /// Object.prototype for all objects
    pub object_prototype: JsObjectRef,
    /// Function.prototype for function methods (call, apply, bind)
    pub function_prototype: JsObjectRef,
    /// Array.prototype for array instances
    pub array_prototype: JsObjectRef,
    /// String dictionary for deduplicating property names
    pub string_dict: StringDict,
    /// Call stack, innermost frame last
    pub call_stack: Vec<StackFrame>,
    max_call_depth: usize,
    console: Box<dyn ConsoleProvider>,
}

impl Realm {
    /// Create a realm with all built-ins installed
    pub fn new() -> Self {
        let object_prototype = JsObjectRef::new(JsObject::new());

        // Function.prototype is itself a function that accepts anything and
        // returns undefined.
        let mut function_proto_obj = JsObject::with_prototype(object_prototype.cheap_clone());
        function_proto_obj.exotic = ExoticObject::Function(JsFunction::Native(
            NativeFunction::new("", 0, |_, _, _| Ok(JsValue::Undefined)),
        ));
        let function_prototype = JsObjectRef::new(function_proto_obj);

        let array_prototype = JsObjectRef::new(JsObject::array(
            object_prototype.cheap_clone(),
            Vec::new(),
        ));
        let global = JsObjectRef::new(JsObject::with_prototype(object_prototype.cheap_clone()));

        let mut realm = Self {
            global,
            object_prototype,
            function_prototype,
            array_prototype,
            string_dict: StringDict::with_common_strings(),
            call_stack: Vec::new(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            console: default_console_provider(),
        };

        let proto = realm.function_prototype.cheap_clone();
        realm.define_function_metadata(&proto, JsString::from(""), 0.0);

        builtins::init_builtins(&mut realm);
        realm
    }

    /// Create a realm that writes console output to `provider`
    pub fn with_console_provider(provider: Box<dyn ConsoleProvider>) -> Self {
        let mut realm = Self::new();
        realm.set_console_provider(provider);
        realm
    }

    /// Create a realm whose console output is discarded
    pub fn silent() -> Self {
        Self::with_console_provider(Box::new(NoOpConsoleProvider))
    }

    /// Replace the console provider
    pub fn set_console_provider(&mut self, provider: Box<dyn ConsoleProvider>) {
        self.console = provider;
    }

    /// The console provider in use
    pub fn console(&self) -> &dyn ConsoleProvider {
        self.console.as_ref()
    }

    /// Set the maximum nesting of invocations.
    ///
    /// Default is [`DEFAULT_MAX_CALL_DEPTH`].
    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    /// Get the current maximum nesting of invocations
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Intern a string using the string dictionary
    pub fn intern(&mut self, s: &str) -> JsString {
        self.string_dict.get_or_insert(s)
    }

    /// Create a PropertyKey from a string, using interning
    pub fn key(&mut self, s: &str) -> PropertyKey {
        PropertyKey::from(self.intern(s))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Object creation
    // ═══════════════════════════════════════════════════════════════════════════

    /// Create an ordinary object inheriting from Object.prototype
    pub fn create_object(&mut self) -> JsObjectRef {
        JsObjectRef::new(JsObject::with_prototype(self.object_prototype.cheap_clone()))
    }

    /// Create an ordinary object with an explicit prototype (`None` for a
    /// null-prototype object)
    pub fn create_object_with_prototype(&mut self, prototype: Option<JsObjectRef>) -> JsObjectRef {
        JsObjectRef::new(JsObject {
            prototype,
            ..JsObject::new()
        })
    }

    /// Create an array object
    pub fn create_array(&mut self, elements: Vec<JsValue>) -> JsObjectRef {
        JsObjectRef::new(JsObject::array(self.array_prototype.cheap_clone(), elements))
    }

    /// Create an `arguments` object: indexed properties plus a non-enumerable
    /// `length`, inheriting from Object.prototype. Array-like, not an array.
    pub fn create_arguments_object(&mut self, args: &[JsValue]) -> JsObjectRef {
        let length_key = self.key("length");
        let mut obj = JsObject::with_prototype(self.object_prototype.cheap_clone());
        obj.properties = index_map_with_capacity(args.len() + 1);
        for (i, arg) in args.iter().enumerate() {
            obj.define_property(PropertyKey::from_index(i), Property::data(arg.clone()));
        }
        obj.define_property(length_key, Property::hidden(JsValue::from(args.len())));
        JsObjectRef::new(obj)
    }

    /// Create a function object around `func` with the given `name` and
    /// `length` metadata, inheriting from Function.prototype
    pub fn create_function_object(
        &mut self,
        func: JsFunction,
        name: JsString,
        length: f64,
    ) -> JsObjectRef {
        let mut obj = JsObject::with_prototype(self.function_prototype.cheap_clone());
        obj.exotic = ExoticObject::Function(func);
        let obj = JsObjectRef::new(obj);
        self.define_function_metadata(&obj, name, length);
        obj
    }

    /// Define the `length` and `name` own properties of a function object.
    /// Both are non-writable, non-enumerable and configurable.
    fn define_function_metadata(&mut self, func: &JsObjectRef, name: JsString, length: f64) {
        let length_key = self.key("length");
        let name_key = self.key("name");
        let mut f = func.borrow_mut();
        f.define_property(
            length_key,
            Property::with_attributes(JsValue::Number(length), false, false, true),
        );
        f.define_property(
            name_key,
            Property::with_attributes(JsValue::String(name), false, false, true),
        );
    }

    /// Create a function object from a native function description.
    ///
    /// Constructors get a fresh `prototype` object whose `constructor`
    /// property points back at the function.
    pub fn create_function(&mut self, native: NativeFunction) -> JsObjectRef {
        let name = native.name.cheap_clone();
        let arity = native.arity;
        let constructor = native.constructor;
        let func = self.create_function_object(JsFunction::Native(native), name, arity as f64);

        if constructor {
            let proto = self.create_object();
            let ctor_key = self.key("constructor");
            proto
                .borrow_mut()
                .define_property(ctor_key, Property::hidden(JsValue::Object(func.cheap_clone())));
            let proto_key = self.key("prototype");
            func.borrow_mut().define_property(
                proto_key,
                Property::with_attributes(JsValue::Object(proto), true, false, false),
            );
        }
        func
    }

    /// Create a strict, non-constructor native function
    pub fn create_native_function<F>(&mut self, name: &str, func: F, arity: usize) -> JsObjectRef
    where
        F: Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError> + 'static,
    {
        let name = self.intern(name);
        self.create_function(NativeFunction::new(name, arity, func))
    }

    /// Register a native method on a prototype object.
    ///
    /// Methods are non-enumerable, like the built-in methods of a host engine.
    pub fn register_method<F>(&mut self, obj: &JsObjectRef, name: &str, func: F, arity: usize)
    where
        F: Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError> + 'static,
    {
        let f = self.create_native_function(name, func, arity);
        let key = self.key(name);
        obj.borrow_mut()
            .define_property(key, Property::hidden(JsValue::Object(f)));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Property access
    // ═══════════════════════════════════════════════════════════════════════════

    /// Read a property by name, searching the prototype chain.
    ///
    /// Primitives have no properties here except a string's `length`.
    pub fn get(&mut self, target: &JsValue, name: &str) -> JsValue {
        let key = self.key(name);
        self.get_property(target, &key)
    }

    /// Read a property by key, searching the prototype chain
    pub fn get_property(&self, target: &JsValue, key: &PropertyKey) -> JsValue {
        match target {
            JsValue::Object(obj) => obj.borrow().get_property(key).unwrap_or_default(),
            JsValue::String(s) if key.eq_str("length") => {
                JsValue::from(s.as_str().encode_utf16().count())
            }
            _ => JsValue::Undefined,
        }
    }

    /// Write a property on an object
    pub fn set(&mut self, target: &JsObjectRef, name: &str, value: JsValue) {
        let key = self.key(name);
        target.borrow_mut().set_property(key, value);
    }

    /// Define a global binding (a property of the global object)
    pub fn set_global(&mut self, name: &str, value: JsValue) {
        let key = self.key(name);
        self.global
            .borrow_mut()
            .define_property(key, Property::hidden(value));
    }

    /// Read a global binding
    pub fn get_global(&mut self, name: &str) -> JsValue {
        let global = JsValue::Object(self.global.cheap_clone());
        self.get(&global, name)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Function.prototype operations
    // ═══════════════════════════════════════════════════════════════════════════

    /// `target.bind(this_arg, ...bound_args)`
    pub fn bind(
        &mut self,
        target: &JsValue,
        this_arg: JsValue,
        bound_args: &[JsValue],
    ) -> Result<JsValue, JsError> {
        builtins::function::bind_function(self, target, this_arg, bound_args).map(JsValue::Object)
    }

    /// `target.apply(this_arg, args)` for any Rust-side array-like
    pub fn apply<A: crate::array_like::ArrayLike + ?Sized>(
        &mut self,
        target: &JsValue,
        this_arg: JsValue,
        args: &A,
    ) -> Result<JsValue, JsError> {
        builtins::function::apply_array_like(self, target, this_arg, args)
    }

    /// `target.apply(this_arg, array_like)` for an array-like value; `undefined`
    /// and `null` mean no arguments
    pub fn apply_value(
        &mut self,
        target: &JsValue,
        this_arg: JsValue,
        array_like: &JsValue,
    ) -> Result<JsValue, JsError> {
        builtins::function::apply_function(self, target, this_arg, array_like)
    }

    /// `target.call(this_arg, ...args)`
    pub fn call(
        &mut self,
        target: &JsValue,
        this_arg: JsValue,
        args: &[JsValue],
    ) -> Result<JsValue, JsError> {
        if !target.is_callable() {
            return Err(JsError::invalid_operand("Function.prototype.call", target));
        }
        self.call_function(target, this_arg, args)
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
fn default_console_provider() -> Box<dyn ConsoleProvider> {
    Box::new(crate::platform::StdConsoleProvider::new())
}

#[cfg(not(feature = "std"))]
fn default_console_provider() -> Box<dyn ConsoleProvider> {
    Box::new(NoOpConsoleProvider)
}
