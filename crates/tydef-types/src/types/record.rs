use std::{collections::BTreeMap, fmt, rc::Rc};
use tydef_value::Value;

use super::Type;

/// A structural record: any object carrying every listed field with a value
/// of the field's type. Extra fields are permitted.
#[derive(Debug, Clone)]
pub struct RecordType {
    fields: Rc<BTreeMap<String, Type>>,
}

impl RecordType {
    pub fn new<K>(fields: impl IntoIterator<Item = (K, Type)>) -> Self
    where
        K: Into<String>,
    {
        Self {
            fields: Rc::new(fields.into_iter().map(|(k, t)| (k.into(), t)).collect()),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.fields.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn test(&self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        self.fields
            .iter()
            .all(|(name, ty)| object.get(name).is_some_and(|v| ty.test(v)))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, (name, ty)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} :: {}", ty.show_bare())?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use tydef_value::Object;

    use super::*;
    use crate::builtin;

    #[test]
    fn fields_sorted_and_extra_fields_allowed() {
        let ty = RecordType::new([("y", builtin::number()), ("x", builtin::number())]);
        assert_eq!(ty.to_string(), "{ x :: Number, y :: Number }");

        let point = Object::new().with("x", 1).with("y", 2).with("z", "extra");
        assert!(ty.test(&point.into()));

        let partial = Object::new().with("x", 1);
        assert!(!ty.test(&partial.into()));
        assert!(!ty.test(&Value::Null));
    }

    #[test]
    fn empty_record() {
        let ty = RecordType::new::<String>([]);
        assert_eq!(ty.to_string(), "{}");
        assert!(ty.test(&Object::new().into()));
    }
}
