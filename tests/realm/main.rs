//! Integration tests for the realm, organized by feature
//!
//! Host functions are Rust closures; helpers here build the handful of
//! function shapes the tests need and capture what a callee observed.

mod bind;
mod builtins;

use std::cell::RefCell;
use std::rc::Rc;

use fnbind::platform::{ConsoleLevel, ConsoleProvider};
use fnbind::{JsError, JsValue, NativeFunction, Realm, api};

/// Create a realm whose console output is discarded
pub fn create_test_realm() -> Realm {
    Realm::silent()
}

/// Create a strict function that may also be used with `new`, like a plain
/// `function` declaration
pub fn function<F>(realm: &mut Realm, name: &str, arity: usize, f: F) -> JsValue
where
    F: Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError> + 'static,
{
    let name = realm.intern(name);
    JsValue::Object(realm.create_function(NativeFunction::new(name, arity, f).constructor()))
}

/// What a callee saw on its most recent invocation
#[derive(Default)]
pub struct Observed {
    pub this: Option<JsValue>,
    pub args: Vec<JsValue>,
    pub calls: usize,
}

pub type Recorder = Rc<RefCell<Observed>>;

/// A constructor-capable function that records its receiver and arguments
/// and returns `returns`
pub fn recording_function(
    realm: &mut Realm,
    name: &str,
    arity: usize,
    returns: JsValue,
) -> (JsValue, Recorder) {
    let recorder: Recorder = Rc::default();
    let seen = recorder.clone();
    let f = function(realm, name, arity, move |_realm, this, args| {
        let mut seen = seen.borrow_mut();
        seen.this = Some(this);
        seen.args = args.to_vec();
        seen.calls += 1;
        Ok(returns.clone())
    });
    (f, recorder)
}

/// A function returning its receiver (`function () { return this; }`)
pub fn this_getter(realm: &mut Realm) -> JsValue {
    function(realm, "", 0, |_realm, this, _args| Ok(this))
}

/// A function returning its arguments as an array
pub fn args_collector(realm: &mut Realm, arity: usize) -> JsValue {
    function(realm, "collect", arity, |realm, _this, args| {
        Ok(api::create_array(realm, args.to_vec()))
    })
}

/// Look up a method on a built-in prototype, e.g. `("Array", "slice")`
pub fn builtin_method(realm: &mut Realm, constructor: &str, method: &str) -> JsValue {
    let ctor = realm.get_global(constructor);
    let proto = realm.get(&ctor, "prototype");
    realm.get(&proto, method)
}

pub fn elements(value: &JsValue) -> Vec<JsValue> {
    api::get_elements(value).unwrap()
}

pub fn numbers(values: &[f64]) -> Vec<JsValue> {
    values.iter().copied().map(JsValue::from).collect()
}

/// Console provider that keeps every line it is given
#[derive(Clone, Default)]
pub struct RecordingConsole {
    pub lines: Rc<RefCell<Vec<(ConsoleLevel, String)>>>,
}

impl ConsoleProvider for RecordingConsole {
    fn write(&self, level: ConsoleLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
