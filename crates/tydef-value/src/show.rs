//! Diagnostic stringification of values.

use std::fmt::{self, Write};

use super::Value;

/// Drops a `namespace/` prefix, `tydef/Integer` becomes `Integer`.
pub fn strip_namespace(name: &str) -> &str {
    match name.find('/') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Double quotes a string, escaping control characters, backslashes and quotes.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            '\0' => quoted.push_str("\\0"),
            '"' => quoted.push_str("\\\""),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn fmt_num(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 && n.is_sign_negative() {
        f.write_str("-0")
    } else {
        write!(f, "{n}")
    }
}

fn fmt_seq<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let mut first = true;
    for value in values {
        if !first {
            f.write_str(", ")?;
        }
        fmt_value(value, f)?;
        first = false;
    }
    Ok(())
}

pub(crate) fn fmt_value(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Num(n) => fmt_num(*n, f),
        Value::Str(s) => f.write_str(&quote(s)),
        Value::Date(date) => {
            f.write_str("new Date(")?;
            fmt_num(date.millis(), f)?;
            f.write_char(')')
        }
        Value::Error(message) => write!(f, "new Error({})", quote(message)),
        Value::RegExp(regexp) => write!(f, "/{}/{}", regexp.source, regexp.flags),
        Value::Function(function) => match function.name() {
            Some(name) => write!(f, "function {name}"),
            None => f.write_str("function"),
        },
        Value::List(list) => {
            f.write_char('[')?;
            fmt_seq(list, f)?;
            f.write_char(']')
        }
        Value::Object(object) => {
            if let Some(tag) = object.tag() {
                write!(f, "{} ", strip_namespace(tag))?;
            }
            f.write_char('{')?;
            let mut first = true;
            for (key, value) in object.sorted() {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{}: ", quote(key))?;
                fmt_value(value, f)?;
                first = false;
            }
            f.write_char('}')
        }
    }
}
