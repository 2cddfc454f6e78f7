use std::{fmt, rc::Rc};

use super::Value;

type Func = dyn Fn(&[Value]) -> Value;

/// A callable value. Two functions are equal only if they share the same closure.
#[derive(Clone)]
pub struct Function {
    name: Option<Rc<str>>,
    func: Rc<Func>,
}

impl Function {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: None,
            func: Rc::new(func),
        }
    }

    pub fn named<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: Some(Rc::from(name)),
            func: Rc::new(func),
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.func), Rc::as_ptr(&other.func))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Function({name})"),
            None => write!(f, "Function"),
        }
    }
}
