//! The built-in descriptor catalogue.

use tydef_value::{tag, List, Value};

use crate::{
    env::EnvEntry,
    types::{Type, UnaryTypeDef},
};

pub const NULLABLE: &str = "tydef/Nullable";

/// Largest magnitude at which every integer is exactly representable.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn type0(name: &'static str) -> Type {
    Type::nullary(name, move |value| value.type_tag() == name)
}

fn refinement<F>(name: &str, test: F) -> Type
where
    F: Fn(f64) -> bool + 'static,
{
    Type::nullary(format!("tydef/{name}"), move |value| value.as_num().is_some_and(|n| test(*n)))
}

pub fn any() -> Type {
    Type::Any
}

pub fn array() -> UnaryTypeDef {
    UnaryTypeDef::new(
        tag::ARRAY,
        |value| value.as_list().is_some(),
        |value| value.as_list().map(List::to_vec).unwrap_or_default(),
    )
}

/// `null` or a member of the parameter.
pub fn nullable() -> UnaryTypeDef {
    UnaryTypeDef::new(
        NULLABLE,
        |_| true,
        |value| match value {
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        },
    )
}

pub fn boolean() -> Type {
    type0(tag::BOOLEAN)
}

pub fn date() -> Type {
    type0(tag::DATE)
}

pub fn error() -> Type {
    type0(tag::ERROR)
}

pub fn function() -> Type {
    type0(tag::FUNCTION)
}

pub fn null() -> Type {
    type0(tag::NULL)
}

pub fn number() -> Type {
    type0(tag::NUMBER)
}

pub fn object() -> Type {
    type0(tag::OBJECT)
}

pub fn regexp() -> Type {
    type0(tag::REGEXP)
}

pub fn string() -> Type {
    type0(tag::STRING)
}

pub fn undefined() -> Type {
    type0(tag::UNDEFINED)
}

pub fn valid_date() -> Type {
    Type::nullary("tydef/ValidDate", |value| value.as_date().is_some_and(|date| date.is_valid()))
}

fn is_valid(n: f64) -> bool {
    !n.is_nan()
}

fn is_integer(n: f64) -> bool {
    n.is_finite() && n.floor() == n && n.abs() <= MAX_SAFE_INTEGER
}

pub fn positive_number() -> Type {
    refinement("PositiveNumber", |n| n > 0.0)
}

pub fn negative_number() -> Type {
    refinement("NegativeNumber", |n| n < 0.0)
}

pub fn valid_number() -> Type {
    refinement("ValidNumber", is_valid)
}

pub fn non_zero_valid_number() -> Type {
    refinement("NonZeroValidNumber", |n| is_valid(n) && n != 0.0)
}

pub fn finite_number() -> Type {
    refinement("FiniteNumber", f64::is_finite)
}

pub fn positive_finite_number() -> Type {
    refinement("PositiveFiniteNumber", |n| n.is_finite() && n > 0.0)
}

pub fn negative_finite_number() -> Type {
    refinement("NegativeFiniteNumber", |n| n.is_finite() && n < 0.0)
}

pub fn non_zero_finite_number() -> Type {
    refinement("NonZeroFiniteNumber", |n| n.is_finite() && n != 0.0)
}

pub fn integer() -> Type {
    refinement("Integer", is_integer)
}

pub fn positive_integer() -> Type {
    refinement("PositiveInteger", |n| is_integer(n) && n > 0.0)
}

pub fn negative_integer() -> Type {
    refinement("NegativeInteger", |n| is_integer(n) && n < 0.0)
}

pub fn non_zero_integer() -> Type {
    refinement("NonZeroInteger", |n| is_integer(n) && n != 0.0)
}

pub fn regex_flags() -> Type {
    Type::enumeration(
        ["", "g", "i", "m", "gi", "gm", "im", "gim"]
            .into_iter()
            .map(Value::from),
    )
}

/// The default environment.
pub fn env() -> Vec<EnvEntry> {
    vec![
        any().into(),
        array().into(),
        boolean().into(),
        date().into(),
        error().into(),
        function().into(),
        null().into(),
        number().into(),
        object().into(),
        regexp().into(),
        string().into(),
        undefined().into(),
    ]
}
