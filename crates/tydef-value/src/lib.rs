//! The dynamic values checked by the signature engine.
//!
//! A [`Value`] is deliberately opaque to the engine: everything it learns about
//! a value comes from descriptor predicates, container decomposition and the
//! structural [type tag](Value::type_tag).

use derive_more::From;
use enum_as_inner::EnumAsInner;
use std::fmt;

mod function;
mod json;
mod list;
mod object;
mod show;

pub use function::Function;
pub use list::List;
pub use object::Object;
pub use show::{quote, strip_namespace};

/// Milliseconds since the unix epoch, `NaN` for an invalid date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Date(pub f64);

impl Date {
    #[inline]
    pub fn new(millis: f64) -> Self {
        Self(millis)
    }

    #[inline]
    pub fn invalid() -> Self {
        Self(f64::NAN)
    }

    #[inline]
    pub fn millis(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.0.is_nan()
    }
}

/// A regular expression literal, kept as source text and flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegExp {
    pub source: String,
    pub flags: String,
}

impl RegExp {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

/// Values a checked function may receive or return
#[derive(Debug, EnumAsInner, From, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value
    #[from(skip)]
    Undefined,
    /// An explicit null
    #[from(skip)]
    Null,
    /// A boolean value
    Bool(bool),
    /// A numeric value (floating point)
    Num(f64),
    /// A string value
    Str(String),
    /// A point in time
    Date(Date),
    /// An error carrying its message
    #[from(skip)]
    Error(String),
    /// A regular expression
    RegExp(RegExp),
    /// A callable value
    Function(Function),
    /// An ordered sequence of values
    List(List),
    /// A map of field names to values, optionally tagged with a custom type
    Object(Object),
}

/// Structural type tags of values that are not objects with a custom tag.
pub mod tag {
    pub const UNDEFINED: &str = "Undefined";
    pub const NULL: &str = "Null";
    pub const BOOLEAN: &str = "Boolean";
    pub const NUMBER: &str = "Number";
    pub const STRING: &str = "String";
    pub const DATE: &str = "Date";
    pub const ERROR: &str = "Error";
    pub const REGEXP: &str = "RegExp";
    pub const FUNCTION: &str = "Function";
    pub const ARRAY: &str = "Array";
    pub const OBJECT: &str = "Object";
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Value::List(values.into_iter().collect())
    }

    /// The structural type tag of the value.
    ///
    /// Objects carrying a custom tag report that tag, which is how values of
    /// user defined types identify themselves.
    pub fn type_tag(&self) -> &str {
        match self {
            Value::Undefined => tag::UNDEFINED,
            Value::Null => tag::NULL,
            Value::Bool(_) => tag::BOOLEAN,
            Value::Num(_) => tag::NUMBER,
            Value::Str(_) => tag::STRING,
            Value::Date(_) => tag::DATE,
            Value::Error(_) => tag::ERROR,
            Value::RegExp(_) => tag::REGEXP,
            Value::Function(_) => tag::FUNCTION,
            Value::List(_) => tag::ARRAY,
            Value::Object(object) => object.tag().unwrap_or(tag::OBJECT),
        }
    }

    /// Whether the value is `null` or `undefined`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        show::fmt_value(self, f)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(List::from(values))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
