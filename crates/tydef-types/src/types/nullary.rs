use std::{fmt, rc::Rc};
use tydef_value::{strip_namespace, Value};

use super::Predicate;

/// A type without parameters, defined by its name and membership test.
#[derive(Clone)]
pub struct NullaryType {
    name: Rc<str>,
    test: Predicate,
}

impl NullaryType {
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

impl fmt::Display for NullaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(strip_namespace(&self.name))
    }
}

impl fmt::Debug for NullaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NullaryType").field(&self.name).finish()
    }
}
