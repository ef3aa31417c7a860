//! Tests for the built-ins the core is driven through

use super::*;
use fnbind::NativeFunction;
use serde_json::json;

#[test]
fn test_call_passes_receiver_and_arguments() {
    let mut realm = create_test_realm();
    let (f, seen) = recording_function(&mut realm, "f", 2, JsValue::from(9));
    let context = api::create_object(&mut realm);

    let result = api::call_method(
        &mut realm,
        &f,
        "call",
        &[context.clone(), JsValue::from(1), JsValue::from(2)],
    )
    .unwrap();

    assert_eq!(result, JsValue::from(9));
    assert_eq!(seen.borrow().this, Some(context));
    assert_eq!(seen.borrow().args, numbers(&[1.0, 2.0]));
}

#[test]
fn test_default_receiver_follows_this_mode() {
    let mut realm = create_test_realm();
    let strict = this_getter(&mut realm);
    let sloppy = JsValue::Object(
        realm.create_function(NativeFunction::new("sloppy", 0, |_, this, _| Ok(this)).sloppy()),
    );
    let global = realm.get_global("globalThis");

    assert_eq!(api::call_method(&mut realm, &strict, "call", &[]).unwrap(), JsValue::Undefined);
    assert_eq!(api::call_method(&mut realm, &sloppy, "call", &[]).unwrap(), global);
    assert_eq!(
        api::call_method(&mut realm, &sloppy, "call", &[JsValue::Null]).unwrap(),
        global
    );
    // Primitives are passed through as-is
    assert_eq!(
        api::call_method(&mut realm, &sloppy, "call", &[JsValue::from(1)]).unwrap(),
        JsValue::from(1)
    );
}

#[test]
fn test_slice_over_array_likes() {
    let mut realm = create_test_realm();
    let slice = builtin_method(&mut realm, "Array", "slice");
    let array_like = api::create_from_json(&mut realm, &json!({"length": 3, "0": "a", "2": "c"})).unwrap();

    let all = realm.call(&slice, array_like.clone(), &[]).unwrap();
    assert_eq!(
        elements(&all),
        vec![JsValue::from("a"), JsValue::Undefined, JsValue::from("c")]
    );
    assert!(api::is_array(&all));

    let tail = realm.call(&slice, array_like, &[JsValue::from(-1)]).unwrap();
    assert_eq!(elements(&tail), vec![JsValue::from("c")]);

    let err = realm.call(&slice, JsValue::Undefined, &[]).unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_for_each_skips_missing_indices() {
    let mut realm = create_test_realm();
    let for_each = builtin_method(&mut realm, "Array", "forEach");
    let array_like = api::create_from_json(&mut realm, &json!({"length": 4, "0": 1, "3": 4})).unwrap();
    let (callback, seen) = recording_function(&mut realm, "cb", 3, JsValue::Undefined);
    let context = api::create_object(&mut realm);

    realm
        .call(&for_each, array_like.clone(), &[callback, context.clone()])
        .unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.calls, 2);
    assert_eq!(seen.this, Some(context));
    assert_eq!(seen.args, vec![JsValue::from(4), JsValue::from(3), array_like]);
}

#[test]
fn test_for_each_visits_only_the_initial_length() {
    let mut realm = create_test_realm();
    let for_each = builtin_method(&mut realm, "Array", "forEach");
    let arr = api::create_array(&mut realm, numbers(&[1.0, 2.0]));
    let visited: Rc<RefCell<Vec<JsValue>>> = Rc::default();
    let log = visited.clone();
    let callback = function(&mut realm, "cb", 3, move |realm, _this, args| {
        let value = args.first().cloned().unwrap_or_default();
        log.borrow_mut().push(value.clone());
        let array = args.get(2).cloned().unwrap_or_default();
        api::call_method(realm, &array, "push", &[value])?;
        Ok(JsValue::Undefined)
    });

    realm.call(&for_each, arr.clone(), &[callback]).unwrap();

    assert_eq!(*visited.borrow(), numbers(&[1.0, 2.0]));
    assert_eq!(elements(&arr), numbers(&[1.0, 2.0, 1.0, 2.0]));
}

#[test]
fn test_for_each_rejects_a_cyclic_array_callback() {
    let mut realm = create_test_realm();
    let for_each = builtin_method(&mut realm, "Array", "forEach");
    let receiver = api::create_array(&mut realm, vec![]);
    let cyclic = api::create_array(&mut realm, vec![JsValue::from(1)]);
    api::push(&cyclic, cyclic.clone()).unwrap();

    let err = realm.call(&for_each, receiver, &[cyclic]).unwrap_err();

    assert_eq!(err.to_string(), "TypeError: 1, is not a function");
}

#[test]
fn test_push_on_arrays_and_array_likes() {
    let mut realm = create_test_realm();
    let push = builtin_method(&mut realm, "Array", "push");

    let arr = api::create_array(&mut realm, vec![]);
    let len = realm.call(&push, arr.clone(), &numbers(&[1.0, 2.0])).unwrap();
    assert_eq!(len, JsValue::from(2));
    assert_eq!(elements(&arr), numbers(&[1.0, 2.0]));

    let obj = api::create_object(&mut realm);
    let len = realm.call(&push, obj.clone(), &[JsValue::from("x")]).unwrap();
    assert_eq!(len, JsValue::from(1));
    assert_eq!(api::to_json(&obj).unwrap(), json!({"0": "x", "length": 1}));
}

#[test]
fn test_has_own_property_via_call() {
    let mut realm = create_test_realm();
    let has_own = builtin_method(&mut realm, "Object", "hasOwnProperty");
    let obj = api::create_from_json(&mut realm, &json!({"name": "x"})).unwrap();

    let yes = realm.call(&has_own, obj.clone(), &[JsValue::from("name")]).unwrap();
    let no = realm.call(&has_own, obj, &[JsValue::from("toString")]).unwrap();
    assert_eq!(yes, JsValue::Boolean(true));
    assert_eq!(no, JsValue::Boolean(false));

    let f = this_getter(&mut realm);
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    let own_proto = realm.call(&has_own, bound, &[JsValue::from("prototype")]).unwrap();
    assert_eq!(own_proto, JsValue::Boolean(false));
    let own_proto = realm.call(&has_own, f, &[JsValue::from("prototype")]).unwrap();
    assert_eq!(own_proto, JsValue::Boolean(true));
}

#[test]
fn test_arguments_object_is_array_like_not_array() {
    let mut realm = create_test_realm();
    let arguments = api::create_arguments(&mut realm, &numbers(&[1.0, 2.0]));
    let array_ctor = realm.get_global("Array");

    assert!(!api::is_array(&arguments));
    let is_array = api::call_method(&mut realm, &array_ctor, "isArray", &[arguments.clone()]).unwrap();
    assert_eq!(is_array, JsValue::Boolean(false));
    assert_eq!(api::get_property(&arguments, "length").unwrap(), JsValue::from(2));
    assert_eq!(api::keys(&arguments), vec!["0".to_string(), "1".to_string()]);
}

#[test]
fn test_array_and_object_constructors() {
    let mut realm = create_test_realm();
    let array_ctor = realm.get_global("Array");
    let object_ctor = realm.get_global("Object");

    let arr = api::construct(&mut realm, &array_ctor, &numbers(&[1.0, 2.0])).unwrap();
    assert_eq!(elements(&arr), numbers(&[1.0, 2.0]));
    let sized = api::construct(&mut realm, &array_ctor, &numbers(&[3.0])).unwrap();
    assert_eq!(api::len(&sized), Some(3));
    let err = api::construct(&mut realm, &array_ctor, &numbers(&[-1.0])).unwrap_err();
    assert_eq!(err.to_string(), "RangeError: Invalid array length");

    let obj = api::construct(&mut realm, &object_ctor, &[]).unwrap();
    assert!(realm.instance_of(&obj, &object_ctor).unwrap());
    assert_eq!(api::call_function(&mut realm, &object_ctor, None, &[arr.clone()]).unwrap(), arr);
}

#[cfg(feature = "console")]
#[test]
fn test_console_writes_through_provider() {
    use fnbind::ConsoleLevel;

    let console = RecordingConsole::default();
    let mut realm = Realm::with_console_provider(Box::new(console.clone()));
    let console_obj = realm.get_global("console");
    let f = args_collector(&mut realm, 0);
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();

    api::call_method(&mut realm, &console_obj, "log", &[JsValue::from("value"), JsValue::from(1)]).unwrap();
    api::call_method(&mut realm, &console_obj, "warn", &[bound]).unwrap();
    let error = realm.get(&console_obj, "error");
    let bound_error = realm.bind(&error, JsValue::Undefined, &[JsValue::from("prefix")]).unwrap();
    realm.call(&bound_error, JsValue::Undefined, &[JsValue::Null]).unwrap();

    assert_eq!(
        *console.lines.borrow(),
        vec![
            (ConsoleLevel::Log, "value 1".to_string()),
            (ConsoleLevel::Warn, "[Function: bound collect]".to_string()),
            (ConsoleLevel::Error, "prefix null".to_string()),
        ]
    );
}
