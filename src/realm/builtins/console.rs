//! Console built-in methods.
//!
//! Output goes through the realm's [`ConsoleProvider`](crate::platform::ConsoleProvider),
//! never straight to stdout.

use crate::error::JsError;
use crate::platform::ConsoleLevel;
use crate::prelude::*;
use crate::realm::Realm;
use crate::value::{JsObjectRef, JsValue};

/// Create console object with log, error, warn, info, debug methods
pub fn create_console_object(realm: &mut Realm) -> JsObjectRef {
    let console = realm.create_object();

    realm.register_method(&console, "log", console_log, 0);
    realm.register_method(&console, "info", console_info, 0);
    realm.register_method(&console, "debug", console_debug, 0);
    realm.register_method(&console, "warn", console_warn, 0);
    realm.register_method(&console, "error", console_error, 0);

    console
}

/// Join arguments with spaces: strings print raw, everything else in
/// inspection form
pub fn format_console_args(args: &[JsValue]) -> String {
    args.iter()
        .map(|v| match v {
            JsValue::String(s) => s.to_string(),
            other => format!("{:?}", other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write(realm: &mut Realm, level: ConsoleLevel, args: &[JsValue]) -> Result<JsValue, JsError> {
    let message = format_console_args(args);
    realm.console().write(level, &message);
    Ok(JsValue::Undefined)
}

pub fn console_log(realm: &mut Realm, _this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    write(realm, ConsoleLevel::Log, args)
}

pub fn console_info(realm: &mut Realm, _this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    write(realm, ConsoleLevel::Info, args)
}

pub fn console_debug(realm: &mut Realm, _this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    write(realm, ConsoleLevel::Debug, args)
}

pub fn console_warn(realm: &mut Realm, _this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    write(realm, ConsoleLevel::Warn, args)
}

pub fn console_error(realm: &mut Realm, _this: JsValue, args: &[JsValue]) -> Result<JsValue, JsError> {
    write(realm, ConsoleLevel::Error, args)
}
