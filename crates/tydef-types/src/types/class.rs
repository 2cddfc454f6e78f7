use std::{fmt, rc::Rc};
use tydef_value::{strip_namespace, Value};

use super::Predicate;

/// A named predicate constraining the values a type variable may bind.
#[derive(Clone)]
pub struct TypeClass {
    name: Rc<str>,
    test: Predicate,
}

impl TypeClass {
    pub fn new<F>(name: impl AsRef<str>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Self {
            name: Rc::from(name.as_ref()),
            test: Rc::new(test),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(strip_namespace(&self.name))
    }
}

impl fmt::Debug for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeClass").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strips_namespace() {
        let semigroup = TypeClass::new("my-package/Semigroup", |v| {
            matches!(v, Value::Str(_) | Value::List(_))
        });
        assert_eq!(semigroup.to_string(), "Semigroup");
        assert_eq!(semigroup.name(), "my-package/Semigroup");
        assert!(semigroup.test(&Value::from("x")));
        assert!(!semigroup.test(&Value::from(1)));
    }
}
