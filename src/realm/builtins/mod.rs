//! Built-in objects installed into every realm

pub mod array;
#[cfg(feature = "console")]
pub mod console;
pub mod function;
pub mod object;

use super::Realm;
use crate::value::{CheapClone, JsValue};

/// Install the built-in prototype methods and global bindings
pub fn init_builtins(realm: &mut Realm) {
    object::init_object_prototype(realm);
    function::init_function_prototype(realm);
    array::init_array_prototype(realm);

    let object_ctor = object::create_object_constructor(realm);
    realm.set_global("Object", JsValue::Object(object_ctor));

    let function_ctor = function::create_function_constructor(realm);
    realm.set_global("Function", JsValue::Object(function_ctor));

    let array_ctor = array::create_array_constructor(realm);
    realm.set_global("Array", JsValue::Object(array_ctor));

    #[cfg(feature = "console")]
    {
        let console = console::create_console_object(realm);
        realm.set_global("console", JsValue::Object(console));
    }

    let global = realm.global.cheap_clone();
    realm.set_global("globalThis", JsValue::Object(global));
}
