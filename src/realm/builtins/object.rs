//! Object constructor and Object.prototype methods

use crate::error::JsError;
use crate::realm::Realm;
use crate::value::{CheapClone, JsObjectRef, JsValue, NativeFunction, Property, PropertyKey};

/// Initialize Object.prototype with hasOwnProperty.
/// The prototype object must already exist in `realm.object_prototype`.
pub fn init_object_prototype(realm: &mut Realm) {
    let proto = realm.object_prototype.cheap_clone();

    realm.register_method(&proto, "hasOwnProperty", object_has_own_property, 1);
}

/// Create the global Object constructor around the existing Object.prototype
pub fn create_object_constructor(realm: &mut Realm) -> JsObjectRef {
    let name = realm.intern("Object");
    let constructor =
        realm.create_function(NativeFunction::new(name, 1, object_constructor).constructor());

    let proto_key = realm.key("prototype");
    constructor.borrow_mut().define_property(
        proto_key,
        Property::with_attributes(
            JsValue::Object(realm.object_prototype.cheap_clone()),
            false,
            false,
            false,
        ),
    );

    let ctor_key = realm.key("constructor");
    realm
        .object_prototype
        .borrow_mut()
        .define_property(ctor_key, Property::hidden(JsValue::Object(constructor.cheap_clone())));

    constructor
}

/// `Object(value)`: objects pass through, anything else gets a fresh object
fn object_constructor(
    realm: &mut Realm,
    _this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    match args.first() {
        Some(obj @ JsValue::Object(_)) => Ok(obj.clone()),
        _ => Ok(JsValue::Object(realm.create_object())),
    }
}

pub fn object_has_own_property(
    _realm: &mut Realm,
    this: JsValue,
    args: &[JsValue],
) -> Result<JsValue, JsError> {
    let key = PropertyKey::from_value(&args.first().cloned().unwrap_or_default());

    let has = match &this {
        JsValue::Object(obj) => obj.borrow().has_own_property(&key),
        JsValue::Undefined | JsValue::Null => {
            return Err(JsError::type_error(
                "Cannot convert undefined or null to object",
            ));
        }
        // A string's own properties are its indices and `length`
        JsValue::String(s) => match key {
            PropertyKey::Index(idx) => (idx as usize) < s.as_str().encode_utf16().count(),
            PropertyKey::String(name) => name.as_str() == "length",
        },
        _ => false,
    };
    Ok(JsValue::Boolean(has))
}
