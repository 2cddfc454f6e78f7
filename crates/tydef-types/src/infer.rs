use indexmap::IndexMap;
use log::{debug, trace};
use tydef_value::Value;

use crate::{
    env::Env,
    types::{Param, Type},
};

/// How inference treats nested inconsistency.
///
/// `Strict` is used for unification. `Loose` tolerates containers whose
/// elements disagree and is used to describe values in diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Strict,
    Loose,
}

impl Env {
    /// The descriptors of which every one of `values` is a member.
    ///
    /// An empty slice yields `[Unknown]`. Values no candidate accepts but which
    /// share a type tag yield a synthesised foreign type. A top level
    /// `Inconsistent` is never returned.
    pub fn infer(&self, values: &[Value], mode: Mode) -> Vec<Type> {
        let mut types = self.infer_nested(values, mode);
        types.retain(|ty| !ty.is_inconsistent());
        trace!("Inferred {types:?} for {} values ({mode:?})", values.len());
        types
    }

    fn infer_nested(&self, values: &[Value], mode: Mode) -> Vec<Type> {
        let Some(first) = values.first() else {
            return vec![Type::Unknown];
        };

        let sets: Vec<Vec<Type>> = values.iter().map(|v| self.members_of(v, mode)).collect();
        let common = common_types(&sets, mode);
        if !common.is_empty() {
            return common;
        }

        let tag = first.type_tag();
        let accepted = self
            .candidates()
            .iter()
            .any(|ty| values.iter().all(|v| ty.test(v)));
        if !accepted && values.iter().all(|v| v.type_tag() == tag) {
            debug!("Synthesised foreign type `{tag}`");
            return vec![Type::foreign(tag)];
        }

        vec![Type::Inconsistent]
    }

    /// Every candidate accepting `value`, with the parameters of containers
    /// inferred from the contained values.
    fn members_of(&self, value: &Value, mode: Mode) -> Vec<Type> {
        let mut members = Vec::new();
        for ty in self.candidates() {
            if ty.is_nullable() || !ty.test(value) {
                continue;
            }
            match ty {
                Type::Unary(unary) => {
                    let params = self.infer_nested(&unary.children(value), mode);
                    members.extend(params.into_iter().map(|p| unary.def.apply(p)));
                }
                Type::Binary(binary) => {
                    let firsts = self.infer_nested(&binary.children(Param::First, value), mode);
                    let seconds = self.infer_nested(&binary.children(Param::Second, value), mode);
                    members.extend(binary.def.xprod(&firsts, &seconds));
                }
                _ => members.push(ty.clone()),
            }
        }
        members
    }
}

/// Descriptors common to all `sets`, with parameters of containers merged
/// across sets.
fn common_types(sets: &[Vec<Type>], mode: Mode) -> Vec<Type> {
    let all: Vec<&Type> = sets.iter().flatten().collect();
    let Some(first) = all.first() else {
        return Vec::new();
    };

    let candidates = match first {
        Type::Unary(unary) => {
            let params = merge(all.iter().filter_map(|t| t.as_unary()).map(|u| &u.param));
            params.into_iter().map(|p| unary.def.apply(p)).collect()
        }
        Type::Binary(binary) => {
            let binaries: Vec<_> = all.iter().filter_map(|t| t.as_binary()).collect();
            let firsts = merge(binaries.iter().map(|b| &b.first));
            let seconds = merge(binaries.iter().map(|b| &b.second));
            binary.def.xprod(&firsts, &seconds)
        }
        _ => {
            let mut unique: Vec<Type> = Vec::new();
            for ty in &all {
                if !unique.iter().any(|u| u.key() == ty.key()) {
                    unique.push((*ty).clone());
                }
            }
            unique
        }
    };

    candidates
        .into_iter()
        .filter(|c| sets.iter().all(|set| set.iter().any(|t| c.equal(t, mode))))
        .collect()
}

/// Parameter descriptors keyed by name, the last one seen per name winning.
/// Unnamed descriptors are keyed by their canonical text and `Unknown` is
/// dropped.
fn merge<'a>(params: impl Iterator<Item = &'a Type>) -> Vec<Type> {
    let mut merged: IndexMap<String, &Type> = IndexMap::new();
    for param in params.filter(|p| !p.is_unknown()) {
        let key = param.name().map_or_else(|| param.to_string(), str::to_owned);
        merged.insert(key, param);
    }

    if merged.is_empty() {
        vec![Type::Unknown]
    } else {
        merged.into_values().cloned().collect()
    }
}
