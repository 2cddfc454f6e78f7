use std::{fmt, rc::Rc};
use tydef_value::{strip_namespace, Value};

use super::{Extract, Param, Predicate, Type};

/// A type constructor of two parameters, e.g. `Pair`.
#[derive(Clone)]
pub struct BinaryTypeDef {
    name: Rc<str>,
    test: Predicate,
    first: Extract,
    second: Extract,
}

impl BinaryTypeDef {
    pub fn new<T, E1, E2>(name: impl AsRef<str>, test: T, first: E1, second: E2) -> Self
    where
        T: Fn(&Value) -> bool + 'static,
        E1: Fn(&Value) -> Vec<Value> + 'static,
        E2: Fn(&Value) -> Vec<Value> + 'static,
    {
        Self {
            name: Rc::from(name.as_ref()),
            test: Rc::new(test),
            first: Rc::new(first),
            second: Rc::new(second),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, first: Type, second: Type) -> Type {
        BinaryType {
            def: self.clone(),
            first,
            second,
        }
        .into()
    }

    /// Applies the constructor to every pairing of `firsts` and `seconds`.
    pub fn xprod(&self, firsts: &[Type], seconds: &[Type]) -> Vec<Type> {
        firsts
            .iter()
            .flat_map(|first| {
                seconds
                    .iter()
                    .map(move |second| self.apply(first.clone(), second.clone()))
            })
            .collect()
    }
}

impl fmt::Debug for BinaryTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BinaryTypeDef").field(&self.name).finish()
    }
}

/// A binary type constructor applied to both parameters.
#[derive(Clone)]
pub struct BinaryType {
    pub def: BinaryTypeDef,
    pub first: Type,
    pub second: Type,
}

impl BinaryType {
    pub fn children(&self, param: Param, value: &Value) -> Vec<Value> {
        match param {
            Param::First => (self.def.first)(value),
            Param::Second => (self.def.second)(value),
        }
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.def.test)(value)
            && self
                .children(Param::First, value)
                .iter()
                .all(|v| self.first.test(v))
            && self
                .children(Param::Second, value)
                .iter()
                .all(|v| self.second.test(v))
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {} {})",
            strip_namespace(self.def.name()),
            self.first,
            self.second
        )
    }
}
