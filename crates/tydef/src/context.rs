use indexmap::IndexMap;
use tydef_types::{
    env::Env,
    infer::Mode,
    types::{Param, Type},
};
use tydef_value::Value;

use crate::signature::Position;

/// Where a type variable was bound and to what.
#[derive(Debug, Clone)]
pub struct Evidence {
    pub position: Position,
    /// Steps from the signature entry down to the variable occurrence.
    pub path: Vec<Param>,
    /// Each bound value with its loosely inferred types.
    pub pairs: Vec<(Value, Vec<Type>)>,
}

impl Evidence {
    pub fn new(env: &Env, position: Position, path: &[Param], values: &[Value]) -> Self {
        let pairs = values
            .iter()
            .map(|value| {
                let types = env.infer(std::slice::from_ref(value), Mode::Loose);
                (value.clone(), types)
            })
            .collect();

        Self {
            position,
            path: path.to_vec(),
            pairs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    /// Types of which every value bound so far is a member. Never empty.
    pub types: Vec<Type>,
    /// The most recent binding.
    pub evidence: Evidence,
}

/// Type variable bindings of one call chain.
///
/// Each call works on its own clone, so partial applications branching off
/// the same curried function never observe each other's bindings.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: IndexMap<String, Binding>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Option<&Binding> {
        self.bindings.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.bindings.contains_key(var)
    }

    pub fn bind(&mut self, var: impl Into<String>, binding: Binding) {
        self.bindings.insert(var.into(), binding);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, b)| (k.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
