//! JavaScript value representation
//!
//! The core JsValue type and the object model that bound functions and
//! `apply` operate on: ordinary objects, arrays and function objects.

use crate::error::JsError;
use crate::prelude::*;
use crate::realm::Realm;

/// Trait for types that have cheap (O(1), reference-counted) clones.
///
/// This trait makes it explicit when a clone is cheap (just incrementing a reference count)
/// vs when it might be expensive (copying data).
///
/// # Examples
/// - `JsObjectRef` (Rc<RefCell<JsObject>>) - cheap clone
/// - `JsString` (Rc<str>) - cheap clone
pub trait CheapClone: Clone {
    /// Create a cheap (reference-counted) clone of this value.
    fn cheap_clone(&self) -> Self {
        self.clone()
    }
}

// Implement CheapClone for Rc-based types (Rc<[JsValue]> is covered by this)
impl<T: ?Sized> CheapClone for Rc<T> {}

/// Largest integer a Number can represent exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// How far a single write may extend an array's dense storage
pub const MAX_DENSE_GROWTH: usize = 1 << 16;

/// A JavaScript value
#[derive(Clone, Default)]
pub enum JsValue {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Object(JsObjectRef),
}

impl JsValue {
    /// Check if this value is null or undefined
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, JsValue::Null | JsValue::Undefined)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    /// Check if this value is callable (a function)
    pub fn is_callable(&self) -> bool {
        match self {
            JsValue::Object(obj) => obj.borrow().is_callable(),
            _ => false,
        }
    }

    /// Borrow the object reference if this is an object
    pub fn as_object(&self) -> Option<&JsObjectRef> {
        match self {
            JsValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the object reference if this is a callable object
    pub fn as_callable(&self) -> Option<&JsObjectRef> {
        self.as_object().filter(|obj| obj.borrow().is_callable())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            JsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the typeof result for this value
    pub fn type_of(&self) -> &'static str {
        match self {
            JsValue::Undefined => "undefined",
            JsValue::Null => "object", // Historical quirk
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::Object(obj) => {
                if obj.borrow().is_callable() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    /// Convert to boolean (ToBoolean)
    pub fn to_boolean(&self) -> bool {
        match self {
            JsValue::Undefined | JsValue::Null => false,
            JsValue::Boolean(b) => *b,
            JsValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JsValue::String(s) => !s.is_empty(),
            JsValue::Object(_) => true,
        }
    }

    /// Convert to number (ToNumber)
    pub fn to_number(&self) -> f64 {
        match self {
            JsValue::Undefined => f64::NAN,
            JsValue::Null => 0.0,
            JsValue::Boolean(true) => 1.0,
            JsValue::Boolean(false) => 0.0,
            JsValue::Number(n) => *n,
            JsValue::String(s) => string_to_number(s.as_str()),
            JsValue::Object(_) => {
                // Would need ToPrimitive then ToNumber
                f64::NAN
            }
        }
    }

    /// Convert to string (ToString)
    ///
    /// Arrays join their elements with `,`; an array already being joined
    /// further up (a cycle) contributes an empty string.
    pub fn to_js_string(&self) -> JsString {
        self.to_js_string_guarded(&mut FxHashSet::default())
    }

    fn to_js_string_guarded(&self, joining: &mut FxHashSet<usize>) -> JsString {
        match self {
            JsValue::Undefined => JsString::from("undefined"),
            JsValue::Null => JsString::from("null"),
            JsValue::Boolean(true) => JsString::from("true"),
            JsValue::Boolean(false) => JsString::from("false"),
            JsValue::Number(n) => number_to_js_string(*n),
            JsValue::String(s) => s.cheap_clone(),
            JsValue::Object(obj) => {
                let id = obj.id();
                let obj = obj.borrow();
                match &obj.exotic {
                    ExoticObject::Array { elements } => {
                        if !joining.insert(id) {
                            return JsString::from("");
                        }
                        let parts: Vec<String> = elements
                            .iter()
                            .map(|e| {
                                if e.is_null_or_undefined() {
                                    String::new()
                                } else {
                                    e.to_js_string_guarded(joining).to_string()
                                }
                            })
                            .collect();
                        joining.remove(&id);
                        JsString::from(parts.join(","))
                    }
                    ExoticObject::Function(_) => JsString::from(format!(
                        "function {}() {{ [native code] }}",
                        obj.function_name().unwrap_or_else(|| JsString::from(""))
                    )),
                    ExoticObject::Ordinary => JsString::from("[object Object]"),
                }
            }
        }
    }

    /// Strict equality (===)
    pub fn strict_equals(&self, other: &JsValue) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            // NaN !== NaN falls out of f64 comparison
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => JsObjectRef::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn number_to_js_string(n: f64) -> JsString {
    if n.is_nan() {
        JsString::from("NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            JsString::from("Infinity")
        } else {
            JsString::from("-Infinity")
        }
    } else if n == 0.0 {
        // Covers -0 as well
        JsString::from("0")
    } else {
        JsString::from(n.to_string())
    }
}

/// StringToNumber: whitespace is trimmed, the empty string is 0, and only the
/// JavaScript spellings of Infinity are accepted (Rust's "inf"/"nan" are not).
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return trimmed
            .get(2..)
            .and_then(|digits| radix_digits_to_number(digits, radix))
            .unwrap_or(f64::NAN);
    }
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Digits of a `0x`/`0o`/`0b` literal, accumulated in f64 so values past
/// `u64::MAX` stay finite
fn radix_digits_to_number(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// ToIntegerOrInfinity applied to an already-converted number.
///
/// NaN becomes 0, infinities are kept, everything else truncates toward zero.
pub fn to_integer_or_infinity(n: f64) -> f64 {
    if n.is_nan() {
        return 0.0;
    }
    if n.is_infinite() {
        return n;
    }
    let int = math::trunc(n);
    // Normalize -0 to +0
    if int == 0.0 { 0.0 } else { int }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Null => write!(f, "null"),
            JsValue::Boolean(b) => write!(f, "{}", b),
            JsValue::Number(n) => write!(f, "{}", n),
            JsValue::String(s) => write!(f, "\"{}\"", s.as_str()),
            JsValue::Object(obj) => {
                let obj = obj.borrow();
                match &obj.exotic {
                    ExoticObject::Ordinary => write!(f, "{{...}}"),
                    ExoticObject::Array { elements } => write!(f, "Array({})", elements.len()),
                    ExoticObject::Function(_) => {
                        let name = obj.function_name().unwrap_or_else(|| JsString::from(""));
                        if name.is_empty() {
                            write!(f, "[Function (anonymous)]")
                        } else {
                            write!(f, "[Function: {}]", name)
                        }
                    }
                }
            }
        }
    }
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

// Conversions from Rust types

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<i32> for JsValue {
    fn from(n: i32) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<u32> for JsValue {
    fn from(n: u32) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<usize> for JsValue {
    fn from(n: usize) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::String(JsString::from(s))
    }
}

impl From<String> for JsValue {
    fn from(s: String) -> Self {
        JsValue::String(JsString::from(s))
    }
}

impl From<JsString> for JsValue {
    fn from(s: JsString) -> Self {
        JsValue::String(s)
    }
}

impl From<JsObjectRef> for JsValue {
    fn from(obj: JsObjectRef) -> Self {
        JsValue::Object(obj)
    }
}

impl From<()> for JsValue {
    fn from(_: ()) -> Self {
        JsValue::Undefined
    }
}

/// Reference-counted string for efficient string handling
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JsString(Rc<str>);

// JsString wraps Rc<str>, so clone is cheap (just reference count increment)
impl CheapClone for JsString {}

impl JsString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for JsString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for JsString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        JsString(s.into())
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString(s.into())
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::ops::Add<&str> for JsString {
    type Output = JsString;

    fn add(self, other: &str) -> JsString {
        let mut s = String::from(&*self.0);
        s.push_str(other);
        JsString::from(s)
    }
}

impl core::ops::Add<&JsString> for JsString {
    type Output = JsString;

    fn add(self, other: &JsString) -> JsString {
        let mut s = String::from(&*self.0);
        s.push_str(&other.0);
        JsString::from(s)
    }
}

/// Shared, mutable handle to a heap object.
///
/// Identity is pointer identity: two handles are the same object iff
/// [`JsObjectRef::ptr_eq`] holds. Prototype/constructor cycles are kept alive
/// for the lifetime of the realm.
#[derive(Clone)]
pub struct JsObjectRef(Rc<RefCell<JsObject>>);

impl CheapClone for JsObjectRef {}

impl JsObjectRef {
    pub fn new(object: JsObject) -> Self {
        JsObjectRef(Rc::new(RefCell::new(object)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, JsObject> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, JsObject> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn ptr_eq(a: &JsObjectRef, b: &JsObjectRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Stable address of the object, usable as an identity key
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// Never recurse into the object here: constructor.prototype.constructor is a cycle.
impl fmt::Debug for JsObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsObjectRef({:#x})", self.id())
    }
}

/// A JavaScript object
#[derive(Debug)]
pub struct JsObject {
    /// Prototype link
    pub prototype: Option<JsObjectRef>,
    /// Whether the object can have properties added
    pub extensible: bool,
    /// Object properties, in insertion order
    pub properties: IndexMap<PropertyKey, Property>,
    /// Exotic object behavior
    pub exotic: ExoticObject,
}

impl JsObject {
    /// Create a new ordinary object
    pub fn new() -> Self {
        Self {
            prototype: None,
            extensible: true,
            properties: index_map_new(),
            exotic: ExoticObject::Ordinary,
        }
    }

    /// Create a new ordinary object with a prototype
    pub fn with_prototype(prototype: JsObjectRef) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::new()
        }
    }

    /// Create an array exotic object holding `elements`
    pub fn array(prototype: JsObjectRef, elements: Vec<JsValue>) -> Self {
        Self {
            prototype: Some(prototype),
            exotic: ExoticObject::Array { elements },
            ..Self::new()
        }
    }

    /// Check if this object is callable
    pub fn is_callable(&self) -> bool {
        matches!(self.exotic, ExoticObject::Function(_))
    }

    /// Check if this object has a [[Construct]] internal method.
    ///
    /// A bound function is a constructor exactly when its target is.
    pub fn is_constructor(&self) -> bool {
        match &self.exotic {
            ExoticObject::Function(JsFunction::Native(native)) => native.constructor,
            ExoticObject::Function(JsFunction::Bound(bound)) => {
                bound.target.borrow().is_constructor()
            }
            _ => false,
        }
    }

    pub fn as_function(&self) -> Option<&JsFunction> {
        match &self.exotic {
            ExoticObject::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.exotic, ExoticObject::Array { .. })
    }

    pub fn array_elements(&self) -> Option<&[JsValue]> {
        match &self.exotic {
            ExoticObject::Array { elements } => Some(elements),
            _ => None,
        }
    }

    pub fn array_elements_mut(&mut self) -> Option<&mut Vec<JsValue>> {
        match &mut self.exotic {
            ExoticObject::Array { elements } => Some(elements),
            _ => None,
        }
    }

    /// Get the value of an own property
    pub fn get_own(&self, key: &PropertyKey) -> Option<JsValue> {
        if let ExoticObject::Array { elements } = &self.exotic {
            match key {
                PropertyKey::Index(idx) => {
                    if let Some(value) = elements.get(*idx as usize) {
                        return Some(value.clone());
                    }
                }
                PropertyKey::String(s) if s.as_str() == "length" => {
                    return Some(JsValue::Number(elements.len() as f64));
                }
                PropertyKey::String(_) => {}
            }
        }
        self.properties.get(key).map(|prop| prop.value.clone())
    }

    /// Display name of a function object: its own `name` property when that
    /// is a string, otherwise the name it was created with
    pub fn function_name(&self) -> Option<JsString> {
        let ExoticObject::Function(func) = &self.exotic else {
            return None;
        };
        match self.get_own(&PropertyKey::from("name")) {
            Some(JsValue::String(name)) => Some(name),
            _ => Some(JsString::from(func.name())),
        }
    }

    /// Get an own property descriptor from the property table
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Get a property, searching the prototype chain
    pub fn get_property(&self, key: &PropertyKey) -> Option<JsValue> {
        if let Some(value) = self.get_own(key) {
            return Some(value);
        }

        if let Some(ref proto) = self.prototype {
            return proto.borrow().get_property(key);
        }

        None
    }

    /// Check if object has own property
    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        if let ExoticObject::Array { elements } = &self.exotic {
            match key {
                PropertyKey::Index(idx) if (*idx as usize) < elements.len() => return true,
                PropertyKey::String(s) if s.as_str() == "length" => return true,
                _ => {}
            }
        }
        self.properties.contains_key(key)
    }

    /// Check for a property anywhere on the prototype chain
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        if self.has_own_property(key) {
            return true;
        }
        match &self.prototype {
            Some(proto) => proto.borrow().has_property(key),
            None => false,
        }
    }

    /// Set a property.
    ///
    /// Writing an index past the end of an array grows it, filling the gap
    /// with `undefined`; writing `length` truncates or grows it. Growth is
    /// limited to [`MAX_DENSE_GROWTH`] slots per write: farther indices land in
    /// the property table and larger lengths are ignored.
    pub fn set_property(&mut self, key: PropertyKey, value: JsValue) {
        if let ExoticObject::Array { elements } = &mut self.exotic {
            match &key {
                PropertyKey::Index(idx)
                    if (*idx as usize) < elements.len().saturating_add(MAX_DENSE_GROWTH) =>
                {
                    let idx = *idx as usize;
                    if idx >= elements.len() {
                        elements.resize(idx + 1, JsValue::Undefined);
                    }
                    if let Some(slot) = elements.get_mut(idx) {
                        *slot = value;
                    }
                    return;
                }
                PropertyKey::String(s) if s.as_str() == "length" => {
                    let len = crate::array_like::to_length(&value);
                    if len <= elements.len().saturating_add(MAX_DENSE_GROWTH) {
                        elements.resize(len, JsValue::Undefined);
                    }
                    return;
                }
                _ => {}
            }
        }
        if let Some(prop) = self.properties.get_mut(&key) {
            // Only set if writable
            if prop.writable {
                prop.value = value;
            }
        } else if self.extensible {
            self.properties.insert(key, Property::data(value));
        }
    }

    /// Define a property with attributes
    pub fn define_property(&mut self, key: PropertyKey, prop: Property) {
        self.properties.insert(key, prop);
    }

    /// Get own property keys: array indices first, then the property table in
    /// insertion order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let mut keys = Vec::new();
        if let ExoticObject::Array { elements } = &self.exotic {
            keys.extend((0..elements.len()).map(|i| PropertyKey::Index(i as u32)));
        }
        keys.extend(self.properties.keys().cloned());
        keys
    }
}

impl Default for JsObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Property key (string or array index)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(JsString),
    Index(u32),
}

impl PropertyKey {
    pub fn from_value(value: &JsValue) -> Self {
        match value {
            JsValue::Number(n) => {
                let idx = *n as u32;
                if idx as f64 == *n && *n >= 0.0 {
                    PropertyKey::Index(idx)
                } else {
                    PropertyKey::String(value.to_js_string())
                }
            }
            JsValue::String(s) => PropertyKey::from(s.cheap_clone()),
            _ => PropertyKey::String(value.to_js_string()),
        }
    }

    /// Key for an argument-list position
    pub fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(idx) => PropertyKey::Index(idx),
            Err(_) => PropertyKey::String(JsString::from(index.to_string())),
        }
    }

    /// Check if this key equals a string literal (avoids allocation)
    #[inline]
    pub fn eq_str(&self, s: &str) -> bool {
        match self {
            PropertyKey::String(js_str) => js_str.as_str() == s,
            PropertyKey::Index(_) => false,
        }
    }
}

fn canonical_index(s: &str) -> Option<u32> {
    // Fast path: check first char is a digit before parsing
    let first = s.bytes().next()?;
    if !first.is_ascii_digit() {
        return None;
    }
    let idx = s.parse::<u32>().ok()?;
    // Verify it's canonical (no leading zeros except "0")
    (idx.to_string() == s).then_some(idx)
}

impl From<&str> for PropertyKey {
    #[inline]
    fn from(s: &str) -> Self {
        match canonical_index(s) {
            Some(idx) => PropertyKey::Index(idx),
            None => PropertyKey::String(JsString::from(s)),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::from(s.as_str())
    }
}

impl From<JsString> for PropertyKey {
    #[inline]
    fn from(s: JsString) -> Self {
        match canonical_index(s.as_str()) {
            Some(idx) => PropertyKey::Index(idx),
            None => PropertyKey::String(s),
        }
    }
}

impl From<u32> for PropertyKey {
    fn from(idx: u32) -> Self {
        PropertyKey::Index(idx)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Object property descriptor
#[derive(Debug, Clone)]
pub struct Property {
    pub value: JsValue,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    pub fn data(value: JsValue) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable, configurable, but skipped by enumeration (methods, `length` of arguments)
    pub fn hidden(value: JsValue) -> Self {
        Self {
            value,
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Create a property with custom attributes
    pub fn with_attributes(
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        Self {
            value,
            writable,
            enumerable,
            configurable,
        }
    }
}

/// Exotic object behavior
#[derive(Debug)]
pub enum ExoticObject {
    /// Ordinary object
    Ordinary,
    /// Array exotic object; `length` is the element count
    Array { elements: Vec<JsValue> },
    /// Function exotic object
    Function(JsFunction),
}

/// Function representation
#[derive(Debug, Clone)]
pub enum JsFunction {
    /// Host function implemented in Rust
    Native(NativeFunction),
    /// Bound function (created by Function.prototype.bind)
    Bound(Box<BoundFunctionData>),
}

impl JsFunction {
    pub fn name(&self) -> &str {
        match self {
            JsFunction::Native(f) => f.name.as_str(),
            JsFunction::Bound(_) => "bound",
        }
    }
}

/// Data for a bound function.
///
/// Fixed at bind time and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BoundFunctionData {
    /// The target function to call
    pub target: JsObjectRef,
    /// The bound this value
    pub this_arg: JsValue,
    /// Pre-filled arguments
    pub bound_args: Rc<[JsValue]>,
}

/// How a host function receives an absent receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThisMode {
    /// The receiver is passed through unchanged (`undefined` stays `undefined`)
    #[default]
    Strict,
    /// An `undefined` or `null` receiver is replaced by the global object
    Sloppy,
}

/// Native function signature
pub type NativeFn = Rc<dyn Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError>>;

/// Native function wrapper
#[derive(Clone)]
pub struct NativeFunction {
    pub name: JsString,
    pub func: NativeFn,
    /// Declared parameter count, reported as `length`
    pub arity: usize,
    /// Whether `new` may be applied to this function
    pub constructor: bool,
    pub this_mode: ThisMode,
}

impl NativeFunction {
    /// A strict-mode, non-constructor function
    pub fn new<F>(name: impl Into<JsString>, arity: usize, func: F) -> Self
    where
        F: Fn(&mut Realm, JsValue, &[JsValue]) -> Result<JsValue, JsError> + 'static,
    {
        Self {
            name: name.into(),
            func: Rc::new(func),
            arity,
            constructor: false,
            this_mode: ThisMode::Strict,
        }
    }

    /// Allow `new` on this function; it gets a fresh `prototype` object
    pub fn constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    /// Use the global object when called without a receiver
    pub fn sloppy(mut self) -> Self {
        self.this_mode = ThisMode::Sloppy;
        self
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("constructor", &self.constructor)
            .field("this_mode", &self.this_mode)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Serialization
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum object nesting followed when serializing; deeper graphs (including
/// cycles) fail instead of overflowing the stack.
const MAX_SERIALIZE_DEPTH: usize = 64;

impl serde::Serialize for JsValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Nested {
            value: self,
            depth: 0,
        }
        .serialize(serializer)
    }
}

struct Nested<'a> {
    value: &'a JsValue,
    depth: usize,
}

impl serde::Serialize for Nested<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error, SerializeMap, SerializeSeq};

        match self.value {
            JsValue::Undefined | JsValue::Null => serializer.serialize_unit(),
            JsValue::Boolean(b) => serializer.serialize_bool(*b),
            JsValue::Number(n) => {
                if math::fract(*n) == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            JsValue::String(s) => serializer.serialize_str(s.as_str()),
            JsValue::Object(obj) => {
                if self.depth >= MAX_SERIALIZE_DEPTH {
                    return Err(S::Error::custom("value is cyclic or nested too deeply"));
                }
                let depth = self.depth + 1;
                let obj = obj.borrow();
                match &obj.exotic {
                    ExoticObject::Function(_) => serializer.serialize_unit(),
                    ExoticObject::Array { elements } => {
                        let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                        for value in elements {
                            seq.serialize_element(&Nested { value, depth })?;
                        }
                        seq.end()
                    }
                    ExoticObject::Ordinary => {
                        let entries: Vec<_> = obj
                            .properties
                            .iter()
                            .filter(|(_, prop)| prop.enumerable)
                            .collect();
                        let mut map = serializer.serialize_map(Some(entries.len()))?;
                        for (key, prop) in entries {
                            map.serialize_entry(
                                &key.to_string(),
                                &Nested {
                                    value: &prop.value,
                                    depth,
                                },
                            )?;
                        }
                        map.end()
                    }
                }
            }
        }
    }
}
