//! Conformant `Function.prototype.bind` and `apply` over an embeddable
//! callable object model.
//!
//! Functions are Rust closures living in a [`Realm`]. Binding fixes a receiver
//! and a prefix of arguments; applying expands any array-like (an object with
//! a `length` and indexed properties, or a Rust slice) into an argument list.
//! Bound functions keep working under `new`, where the bound receiver is
//! ignored and `instanceof` holds against both the original and the bound
//! function.
//!
//! # Example
//!
//! ```
//! use fnbind::{Realm, JsValue};
//!
//! let mut realm = Realm::silent();
//! let greet = realm.create_native_function(
//!     "greet",
//!     |_realm, this, args| {
//!         let who = args.first().cloned().unwrap_or_default();
//!         Ok(JsValue::from(format!("{} {}", this.to_js_string(), who.to_js_string())))
//!     },
//!     1,
//! );
//!
//! let hello = realm
//!     .bind(&JsValue::Object(greet), JsValue::from("hello"), &[])
//!     .unwrap();
//! let result = realm
//!     .apply(&hello, JsValue::Undefined, &[JsValue::from("world")][..])
//!     .unwrap();
//! assert_eq!(result, JsValue::from("hello world"));
//! assert_eq!(realm.get(&hello, "length"), JsValue::from(1));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod prelude;

pub mod api;
pub mod arity;
pub mod array_like;
pub mod error;
pub mod platform;
pub mod realm;
pub mod string_dict;
pub mod value;

pub use array_like::{ArrayLike, MAX_ARGUMENTS, create_list_from_array_like, to_length};
pub use arity::{bound_function_length, compute_length};
pub use error::JsError;
pub use platform::{ConsoleLevel, ConsoleProvider, NoOpConsoleProvider};
#[cfg(feature = "std")]
pub use platform::StdConsoleProvider;
pub use realm::{DEFAULT_MAX_CALL_DEPTH, Realm};
pub use value::CheapClone;
pub use value::JsObject;
pub use value::JsObjectRef;
pub use value::JsString;
pub use value::JsValue;
pub use value::NativeFunction;
pub use value::Property;
pub use value::PropertyKey;
