use std::{fmt, rc::Rc};
use tydef_value::{strip_namespace, Value};

use super::{Extract, Predicate, Type};

/// A type constructor of one parameter, e.g. `Array`.
///
/// Cloning is cheap, the test and extraction functions are shared.
#[derive(Clone)]
pub struct UnaryTypeDef {
    name: Rc<str>,
    test: Predicate,
    extract: Extract,
}

impl UnaryTypeDef {
    pub fn new<T, E>(name: impl AsRef<str>, test: T, extract: E) -> Self
    where
        T: Fn(&Value) -> bool + 'static,
        E: Fn(&Value) -> Vec<Value> + 'static,
    {
        Self {
            name: Rc::from(name.as_ref()),
            test: Rc::new(test),
            extract: Rc::new(extract),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, param: Type) -> Type {
        UnaryType {
            def: self.clone(),
            param,
        }
        .into()
    }
}

impl fmt::Debug for UnaryTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnaryTypeDef").field(&self.name).finish()
    }
}

/// A unary type constructor applied to its parameter.
#[derive(Clone)]
pub struct UnaryType {
    pub def: UnaryTypeDef,
    pub param: Type,
}

impl UnaryType {
    /// The values of the parameter contained in `value`.
    ///
    /// Only meaningful once `value` passed the constructor's own test.
    #[inline]
    pub fn children(&self, value: &Value) -> Vec<Value> {
        (self.def.extract)(value)
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.def.test)(value) && self.children(value).iter().all(|v| self.param.test(v))
    }
}

impl fmt::Display for UnaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", strip_namespace(self.def.name()), self.param)
    }
}
