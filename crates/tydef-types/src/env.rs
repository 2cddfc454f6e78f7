use log::debug;
use std::rc::Rc;

use crate::types::{BinaryTypeDef, Type, UnaryTypeDef};

/// An element of an environment listing.
///
/// Type constructors may be listed bare; they are applied to `Unknown`.
#[derive(Debug, Clone)]
pub enum EnvEntry {
    Type(Type),
    Unary(UnaryTypeDef),
    Binary(BinaryTypeDef),
}

impl EnvEntry {
    pub fn into_type(self) -> Type {
        match self {
            Self::Type(ty) => ty,
            Self::Unary(def) => def.apply(Type::Unknown),
            Self::Binary(def) => def.apply(Type::Unknown, Type::Unknown),
        }
    }
}

impl From<Type> for EnvEntry {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl From<UnaryTypeDef> for EnvEntry {
    fn from(def: UnaryTypeDef) -> Self {
        Self::Unary(def)
    }
}

impl From<BinaryTypeDef> for EnvEntry {
    fn from(def: BinaryTypeDef) -> Self {
        Self::Binary(def)
    }
}

/// The closed set of descriptors known to a definer.
///
/// Cheap to clone. Inference only ever produces members of the environment,
/// their parameterizations, or foreign types.
#[derive(Debug, Clone)]
pub struct Env {
    types: Rc<[Type]>,
    candidates: Rc<[Type]>,
}

impl Env {
    pub fn new<E>(entries: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<EnvEntry>,
    {
        let mut types: Vec<Type> = Vec::new();
        for ty in entries.into_iter().map(|e| e.into().into_type()) {
            let duplicate = ty
                .name()
                .is_some_and(|name| types.iter().any(|t| t.name() == Some(name)));
            if duplicate {
                debug!("Duplicate environment entry `{ty}` ignored");
                continue;
            }
            types.push(ty);
        }

        let candidates: Vec<Type> = types.iter().flat_map(Type::reject_any).collect();
        debug!(
            "Environment of {} types, {} inference candidates",
            types.len(),
            candidates.len()
        );

        Self {
            types: types.into(),
            candidates: candidates.into(),
        }
    }

    #[inline]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Members of the environment which inference may produce.
    #[inline]
    pub fn candidates(&self) -> &[Type] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether a named descriptor is a member.
    ///
    /// Unnamed descriptors (`Any`, enumerations, records) match any unnamed
    /// member.
    pub fn contains(&self, ty: &Type) -> bool {
        let name = ty.name();
        self.types.iter().any(|t| t.name() == name)
    }

    /// Finds the first descriptor in `types`, including nested parameters,
    /// which is absent from the environment. Type variables are exempt.
    pub fn missing_reference<'a>(&self, types: &'a [Type]) -> Option<&'a Type> {
        types.iter().find_map(|ty| self.missing_in(ty))
    }

    fn missing_in<'a>(&self, ty: &'a Type) -> Option<&'a Type> {
        match ty {
            Type::Var(_) => None,
            _ if !self.contains(ty) => Some(ty),
            Type::Unary(unary) => self.missing_in(&unary.param),
            Type::Binary(binary) => self
                .missing_in(&binary.first)
                .or_else(|| self.missing_in(&binary.second)),
            _ => None,
        }
    }
}

impl<E: Into<EnvEntry>> FromIterator<E> for Env {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    #[test]
    fn constructors_applied_to_unknown() {
        let env = Env::new(builtin::env());
        let array = env
            .types()
            .iter()
            .find(|t| t.name() == Some("Array"))
            .map(Type::to_string);
        assert_eq!(array.as_deref(), Some("(Array ???)"));
    }

    #[test]
    fn candidates_exclude_any() {
        let env = Env::new(builtin::env());
        assert!(env.types().iter().any(|t| matches!(t, Type::Any)));
        assert!(!env.candidates().iter().any(|t| matches!(t, Type::Any)));
        assert_eq!(env.candidates().len(), env.len() - 1);
    }

    #[test]
    fn duplicates_keep_first() {
        let env = Env::new([builtin::number(), builtin::string(), builtin::number()]);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn missing_reference_walks_parameters() {
        let env = Env::new::<EnvEntry>(vec![builtin::array().into(), builtin::string().into()]);
        let ok = [builtin::array().apply(builtin::string()), Type::var("a")];
        assert!(env.missing_reference(&ok).is_none());

        let bad = [builtin::array().apply(builtin::number())];
        let missing = env.missing_reference(&bad).map(Type::to_string);
        assert_eq!(missing.as_deref(), Some("Number"));

        let outer = [builtin::nullable().apply(builtin::string())];
        let missing = env.missing_reference(&outer).map(Type::to_string);
        assert_eq!(missing.as_deref(), Some("(Nullable String)"));
    }
}
