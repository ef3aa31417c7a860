//! Tests for Function.prototype.bind

use super::*;
use fnbind::{CheapClone, JsObjectRef, Property, PropertyKey};

/// `function func() { Array.prototype.forEach.call(arguments, function (a) { this.push(a); }, this); return this; }`
fn push_all_into_this(realm: &mut Realm) -> JsValue {
    function(realm, "func", 0, |realm, this, args| {
        let arguments = api::create_arguments(realm, args);
        let for_each = builtin_method(realm, "Array", "forEach");
        let push_one = function(realm, "", 1, |realm, this, args| {
            api::call_method(realm, &this, "push", args.get(..1).unwrap_or_default())
        });
        realm.call(&for_each, arguments, &[push_one, this.clone()])?;
        Ok(this)
    })
}

/// `{ a: [] }` with the bound function installed as `func`
fn subject_with(realm: &mut Realm, func: JsValue) -> JsValue {
    let subject = api::create_object(realm);
    let a = api::create_array(realm, vec![]);
    api::set_property(&subject, "a", a).unwrap();
    api::set_property(&subject, "func", func).unwrap();
    subject
}

#[test]
fn test_binds_without_a_context() {
    let mut realm = create_test_realm();
    let (f, seen) = recording_function(&mut realm, "f", 0, JsValue::Undefined);
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    let subject = subject_with(&mut realm, bound);

    api::call_method(&mut realm, &subject, "func", &[]).unwrap();

    let getter = this_getter(&mut realm);
    let default_this = realm.call(&getter, JsValue::Undefined, &[]).unwrap();
    assert_eq!(seen.borrow().this, Some(default_this));
    assert_eq!(seen.borrow().this, Some(JsValue::Undefined));
}

#[test]
fn test_binds_without_a_context_and_supplies_bound_arguments() {
    let mut realm = create_test_realm();
    let (f, seen) = recording_function(&mut realm, "f", 0, JsValue::Undefined);
    let bound = realm.bind(&f, JsValue::Undefined, &numbers(&[1.0, 2.0, 3.0])).unwrap();
    let subject = subject_with(&mut realm, bound);

    api::call_method(&mut realm, &subject, "func", &numbers(&[1.0, 2.0, 3.0])).unwrap();

    assert_eq!(seen.borrow().args, numbers(&[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]));
    assert_eq!(seen.borrow().this, Some(JsValue::Undefined));
}

#[test]
fn test_sloppy_target_without_context_sees_global() {
    let mut realm = create_test_realm();
    let getter = realm.create_function(NativeFunction::new("f", 0, |_, this, _| Ok(this)).sloppy());
    let bound = realm.bind(&JsValue::Object(getter), JsValue::Undefined, &[]).unwrap();

    let result = realm.call(&bound, JsValue::from(7), &[]).unwrap();
    assert_eq!(result, JsValue::Object(realm.global.cheap_clone()));
}

#[test]
fn test_binds_a_context() {
    let mut realm = create_test_realm();
    let func = push_all_into_this(&mut realm);
    let actual = api::create_array(&mut realm, vec![]);
    let bound = realm.bind(&func, actual.clone(), &[]).unwrap();
    let subject = subject_with(&mut realm, bound);

    api::call_method(&mut realm, &subject, "func", &numbers(&[1.0, 2.0, 3.0])).unwrap();

    assert_eq!(elements(&actual), numbers(&[1.0, 2.0, 3.0]));
    let a = api::get_property(&subject, "a").unwrap();
    assert!(elements(&a).is_empty());
}

#[test]
fn test_binds_a_context_and_supplies_bound_arguments() {
    let mut realm = create_test_realm();
    let func = push_all_into_this(&mut realm);
    let actual = api::create_array(&mut realm, vec![]);
    let bound = realm.bind(&func, actual.clone(), &numbers(&[1.0, 2.0, 3.0])).unwrap();
    let subject = subject_with(&mut realm, bound);

    api::call_method(&mut realm, &subject, "func", &numbers(&[4.0, 5.0, 6.0])).unwrap();

    assert_eq!(elements(&actual), numbers(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    let a = api::get_property(&subject, "a").unwrap();
    assert!(elements(&a).is_empty());
}

#[test]
fn test_returns_properly_without_binding_a_context() {
    let mut realm = create_test_realm();
    let getter = this_getter(&mut realm);
    let bound = realm.bind(&getter, JsValue::Undefined, &[]).unwrap();
    let subject = subject_with(&mut realm, bound);

    let context = api::call_method(&mut realm, &subject, "func", &[]).unwrap();
    assert_eq!(context, JsValue::Undefined);
}

#[test]
fn test_returns_bound_arguments_without_a_context() {
    let mut realm = create_test_realm();
    let slice = builtin_method(&mut realm, "Array", "slice");
    let seen: Recorder = Rc::default();
    let observed = seen.clone();
    let f = function(&mut realm, "f", 0, move |realm, this, args| {
        observed.borrow_mut().this = Some(this);
        let arguments = api::create_arguments(realm, args);
        realm.call(&slice, arguments, &[])
    });
    let bound = realm.bind(&f, JsValue::Undefined, &numbers(&[1.0, 2.0, 3.0])).unwrap();
    let subject = subject_with(&mut realm, bound);

    let actual = api::call_method(&mut realm, &subject, "func", &numbers(&[1.0, 2.0, 3.0])).unwrap();

    assert_eq!(seen.borrow().this, Some(JsValue::Undefined));
    assert_eq!(elements(&actual), numbers(&[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]));
}

#[test]
fn test_returns_the_bound_context() {
    let mut realm = create_test_realm();
    let func = push_all_into_this(&mut realm);
    let actual = api::create_array(&mut realm, vec![]);

    for prefix in [vec![], numbers(&[1.0, 2.0, 3.0])] {
        let bound = realm.bind(&func, actual.clone(), &prefix).unwrap();
        let subject = subject_with(&mut realm, bound);
        let ret = api::call_method(&mut realm, &subject, "func", &numbers(&[4.0, 5.0, 6.0])).unwrap();
        assert_eq!(ret, actual);
        assert_ne!(ret, subject);
    }
}

#[test]
fn test_bound_length() {
    let mut realm = create_test_realm();
    let f = args_collector(&mut realm, 3);
    let context = api::create_object(&mut realm);

    let cases: [(JsValue, Vec<JsValue>, f64); 5] = [
        (JsValue::Undefined, vec![], 3.0),
        (context.clone(), vec![], 3.0),
        (context, numbers(&[1.0]), 2.0),
        (JsValue::Undefined, numbers(&[1.0]), 2.0),
        (JsValue::Undefined, numbers(&[1.0, 2.0, 3.0, 4.0]), 0.0),
    ];
    for (this_arg, prefix, expected) in cases {
        let bound = realm.bind(&f, this_arg, &prefix).unwrap();
        assert_eq!(
            realm.get(&bound, "length"),
            JsValue::Number(expected),
            "{} bound arguments",
            prefix.len()
        );
    }
    // The original is untouched
    assert_eq!(realm.get(&f, "length"), JsValue::from(3));
}

#[test]
fn test_length_is_metadata_only() {
    let mut realm = create_test_realm();
    let f = args_collector(&mut realm, 1);
    let bound = realm.bind(&f, JsValue::Undefined, &numbers(&[1.0, 2.0])).unwrap();
    assert_eq!(realm.get(&bound, "length"), JsValue::from(0));

    let result = realm.call(&bound, JsValue::Undefined, &numbers(&[3.0, 4.0])).unwrap();
    assert_eq!(elements(&result), numbers(&[1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn test_length_from_unusual_target_length() {
    let mut realm = create_test_realm();
    let f = args_collector(&mut realm, 3);
    let target = api::object_ref(&f).unwrap();
    let length_key = realm.key("length");

    let redefine = |value: JsValue| {
        target
            .borrow_mut()
            .define_property(length_key.clone(), Property::with_attributes(value, false, false, true));
    };

    redefine(JsValue::from("3"));
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&bound, "length"), JsValue::from(0));

    redefine(JsValue::Number(f64::INFINITY));
    let bound = realm.bind(&f, JsValue::Undefined, &numbers(&[1.0])).unwrap();
    assert_eq!(realm.get(&bound, "length"), JsValue::Number(f64::INFINITY));

    redefine(JsValue::Number(2.5));
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&bound, "length"), JsValue::from(2));

    target.borrow_mut().properties.shift_remove(&PropertyKey::from("length"));
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&bound, "length"), JsValue::from(0));
}

#[test]
fn test_bound_name() {
    let mut realm = create_test_realm();
    let f = args_collector(&mut realm, 0);
    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&bound, "name"), JsValue::from("bound collect"));

    let twice = realm.bind(&bound, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&twice, "name"), JsValue::from("bound bound collect"));

    let anonymous = this_getter(&mut realm);
    let bound = realm.bind(&anonymous, JsValue::Undefined, &[]).unwrap();
    assert_eq!(realm.get(&bound, "name"), JsValue::from("bound "));
}

#[test]
fn test_bound_function_metadata() {
    let mut realm = create_test_realm();
    let f = args_collector(&mut realm, 2);
    let custom_proto = api::create_object(&mut realm);
    let target = api::object_ref(&f).unwrap();
    target.borrow_mut().prototype = api::object_ref(&custom_proto);

    let bound = realm.bind(&f, JsValue::Undefined, &[]).unwrap();
    let bound_obj: JsObjectRef = api::object_ref(&bound).unwrap();

    assert_ne!(bound, f);
    assert!(
        bound_obj
            .borrow()
            .prototype
            .as_ref()
            .is_some_and(|p| JsObjectRef::ptr_eq(p, api::object_ref(&custom_proto).as_ref().unwrap()))
    );
    assert!(!bound_obj.borrow().has_own_property(&PropertyKey::from("prototype")));
    let length = bound_obj.borrow().get_own_property(&PropertyKey::from("length")).cloned().unwrap();
    assert!(!length.writable && !length.enumerable && length.configurable);
    assert_eq!(bound.type_of(), "function");
}

#[test]
fn test_bind_composes() {
    let mut realm = create_test_realm();
    let (f, seen) = recording_function(&mut realm, "f", 4, JsValue::Undefined);
    let inner_this = api::create_object(&mut realm);
    let outer_this = api::create_object(&mut realm);

    let once = realm.bind(&f, inner_this.clone(), &numbers(&[1.0])).unwrap();
    let twice = realm.bind(&once, outer_this, &numbers(&[2.0])).unwrap();
    assert_eq!(realm.get(&twice, "length"), JsValue::from(2));

    realm.call(&twice, JsValue::Null, &numbers(&[3.0])).unwrap();
    assert_eq!(seen.borrow().args, numbers(&[1.0, 2.0, 3.0]));
    assert_eq!(seen.borrow().this, Some(inner_this));
}

#[test]
fn test_bind_through_function_prototype() {
    let mut realm = create_test_realm();
    let (f, seen) = recording_function(&mut realm, "f", 2, JsValue::from("done"));
    let context = api::create_object(&mut realm);

    let bound = api::call_method(&mut realm, &f, "bind", &[context.clone(), JsValue::from("x")]).unwrap();
    let result = api::call_method(&mut realm, &bound, "call", &[JsValue::Null, JsValue::from("y")]).unwrap();

    assert_eq!(result, JsValue::from("done"));
    assert_eq!(seen.borrow().this, Some(context));
    assert_eq!(seen.borrow().args, vec![JsValue::from("x"), JsValue::from("y")]);
}

#[test]
fn test_bind_on_non_callable() {
    let mut realm = create_test_realm();
    let bind = builtin_method(&mut realm, "Function", "bind");

    let err = realm.call(&bind, JsValue::from(42), &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "TypeError: Function.prototype.bind called on non-callable number"
    );

    let plain = api::create_object(&mut realm);
    let err = realm.bind(&plain, JsValue::Undefined, &[]).unwrap_err();
    assert!(matches!(err, JsError::InvalidOperand { found: "object", .. }));
}

#[test]
fn test_errors_propagate_unchanged() {
    let mut realm = create_test_realm();
    let thrower = function(&mut realm, "thrower", 0, |_, _, args| {
        Err(JsError::thrown(args.first().cloned().unwrap_or_default()))
    });
    let bound = realm.bind(&thrower, JsValue::Undefined, &[JsValue::from("boom")]).unwrap();

    let err = realm.call(&bound, JsValue::Undefined, &[]).unwrap_err();
    assert!(matches!(&err, JsError::ThrownValue { value } if *value == JsValue::from("boom")));
    assert!(realm.call_stack.is_empty());
}
