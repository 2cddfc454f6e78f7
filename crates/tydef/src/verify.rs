use log::trace;
use tydef_types::{
    env::Env,
    infer::Mode,
    types::{Param, Type, TypeVar},
};
use tydef_value::Value;

use crate::{
    context::{Binding, Context, Evidence},
    error::TypeError,
    report,
    signature::{Position, Signature},
};

/// Checks the values bound at one signature position, recording type
/// variable bindings in the context.
pub struct Verifier<'a> {
    sig: &'a Signature,
    env: &'a Env,
    ctx: &'a mut Context,
    position: Position,
}

impl<'a> Verifier<'a> {
    pub fn new(
        sig: &'a Signature,
        env: &'a Env,
        ctx: &'a mut Context,
        position: Position,
    ) -> Self {
        Self {
            sig,
            env,
            ctx,
            position,
        }
    }

    /// The types the values at `ty` may have. Empty when no consistent type
    /// exists for a position without variables.
    pub fn verify(
        &mut self,
        ty: &Type,
        values: &[Value],
        path: &[Param],
    ) -> Result<Vec<Type>, TypeError> {
        let types = match ty {
            Type::Var(var) => self.verify_var(var, values, path)?,
            Type::Unary(unary) => {
                let children: Vec<Value> = values.iter().flat_map(|v| unary.children(v)).collect();
                let params = self.verify_child(&unary.param, &children, path, Param::First)?;
                params.into_iter().map(|p| unary.def.apply(p)).collect()
            }
            Type::Binary(binary) => {
                let firsts: Vec<Value> = values
                    .iter()
                    .flat_map(|v| binary.children(Param::First, v))
                    .collect();
                let seconds: Vec<Value> = values
                    .iter()
                    .flat_map(|v| binary.children(Param::Second, v))
                    .collect();
                let firsts = self.verify_child(&binary.first, &firsts, path, Param::First)?;
                let seconds = self.verify_child(&binary.second, &seconds, path, Param::Second)?;
                binary.def.xprod(&firsts, &seconds)
            }
            _ => self.env.infer(values, Mode::Strict),
        };

        trace!("{} `{ty}` {values:?} => {types:?}", self.position);
        Ok(types)
    }

    /// Verifies a parameter, falling back to its declared type.
    fn verify_child(
        &mut self,
        ty: &Type,
        values: &[Value],
        path: &[Param],
        step: Param,
    ) -> Result<Vec<Type>, TypeError> {
        let path = [path, &[step]].concat();
        let types = self.verify(ty, values, &path)?;
        if types.is_empty() {
            Ok(vec![ty.clone()])
        } else {
            Ok(types)
        }
    }

    fn verify_var(
        &mut self,
        var: &TypeVar,
        values: &[Value],
        path: &[Param],
    ) -> Result<Vec<Type>, TypeError> {
        let name = var.name();
        let evidence = Evidence::new(self.env, self.position, path, values);

        // constraints of variables bound by arguments hold for the return value
        let bound = self.ctx.contains(name);
        if self.position != Position::Return || !bound {
            self.check_constraints(name, values, path)?;
        }

        let types = match self.ctx.get(name) {
            Some(binding) => {
                let types: Vec<Type> = binding
                    .types
                    .iter()
                    .filter(|t| values.iter().all(|v| t.test(v)))
                    .cloned()
                    .collect();
                if types.is_empty() {
                    let diag = report::conflict2(self.sig, &binding.evidence, &evidence);
                    return Err(TypeError::TypeVariableConflict(Box::new(diag)));
                }
                types
            }
            None => {
                let types = self.env.infer(values, Mode::Strict);
                if types.is_empty() {
                    let diag = report::conflict(self.sig, &evidence);
                    return Err(TypeError::TypeVariableConflict(Box::new(diag)));
                }
                types
            }
        };

        self.ctx.bind(
            name,
            Binding {
                types: types.clone(),
                evidence,
            },
        );
        Ok(types)
    }

    fn check_constraints(
        &self,
        var: &str,
        values: &[Value],
        path: &[Param],
    ) -> Result<(), TypeError> {
        let Some(classes) = self.sig.constraints.get(var) else {
            return Ok(());
        };

        for value in values {
            if let Some(class) = classes.iter().find(|class| !class.test(value)) {
                let value = std::slice::from_ref(value);
                let evidence = Evidence::new(self.env, self.position, path, value);
                let diag = report::constraint_violation(self.sig, &evidence, var, class);
                return Err(TypeError::ConstraintViolation(Box::new(diag)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tydef_types::{builtin, types::TypeClass};

    use super::*;
    use crate::{error::ErrorKind, signature::Constraints};

    fn sig(constraints: Constraints, args: Vec<Type>, ret: Type) -> Signature {
        Signature {
            name: "f".to_owned(),
            constraints,
            args,
            ret,
        }
    }

    fn shown(types: &[Type]) -> Vec<String> {
        types.iter().map(Type::to_string).collect()
    }

    #[test]
    fn variable_binding_narrows() {
        let env = Env::new(builtin::env());
        let a = Type::var("a");
        let sig = sig(Constraints::new(), vec![a.clone(), a.clone()], a.clone());
        let mut ctx = Context::new();

        let types = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&a, &[1.into()], &[])
            .unwrap();
        assert_eq!(shown(&types), ["Number"]);
        assert_eq!(shown(&ctx.get("a").unwrap().types), ["Number"]);

        let err = Verifier::new(&sig, &env, &mut ctx, Position::Arg(1))
            .verify(&a, &["x".into()], &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeVariableConflict);
    }

    #[test]
    fn containers_specialise_over_children() {
        let env = Env::new(builtin::env());
        let ty = builtin::array().apply(Type::var("a"));
        let sig = sig(Constraints::new(), vec![ty.clone()], Type::var("a"));
        let mut ctx = Context::new();

        let types = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&ty, &[json!([1, 2]).into()], &[])
            .unwrap();
        assert_eq!(shown(&types), ["(Array Number)"]);

        let evidence = &ctx.get("a").unwrap().evidence;
        assert_eq!(evidence.path, [Param::First]);
        assert_eq!(evidence.pairs.len(), 2);
    }

    #[test]
    fn empty_container_binds_unknown() {
        let env = Env::new(builtin::env());
        let ty = builtin::array().apply(Type::var("a"));
        let sig = sig(Constraints::new(), vec![ty.clone()], Type::var("a"));
        let mut ctx = Context::new();

        let types = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&ty, &[json!([]).into()], &[])
            .unwrap();
        assert_eq!(shown(&types), ["(Array ???)"]);
        assert!(ctx.get("a").unwrap().types[0].is_unknown());
    }

    #[test]
    fn heterogeneous_children_conflict() {
        let env = Env::new(builtin::env());
        let ty = builtin::array().apply(Type::var("a"));
        let sig = sig(Constraints::new(), vec![ty.clone()], Type::var("a"));
        let mut ctx = Context::new();

        let err = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&ty, &[json!([1, "x"]).into()], &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeVariableConflict);
        assert!(ctx.is_empty());
    }

    #[test]
    fn constraints_checked_before_binding() {
        let env = Env::new(builtin::env());
        let a = Type::var("a");
        let semigroup = TypeClass::new("my-package/Semigroup", |v| v.as_str().is_some());
        let constraints = Constraints::from([("a".to_owned(), vec![semigroup])]);
        let sig = sig(constraints, vec![a.clone()], a.clone());
        let mut ctx = Context::new();

        let err = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&a, &[1.into()], &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert!(!ctx.contains("a"));

        Verifier::new(&sig, &env, &mut ctx, Position::Arg(0))
            .verify(&a, &["x".into()], &[])
            .unwrap();
        assert!(ctx.contains("a"));
    }

    #[test]
    fn plain_positions_infer_strictly() {
        let env = Env::new(builtin::env());
        let sig = sig(Constraints::new(), vec![Type::Any], builtin::number());
        let mut ctx = Context::new();
        let mut verifier = Verifier::new(&sig, &env, &mut ctx, Position::Arg(0));

        assert_eq!(shown(&verifier.verify(&Type::Any, &[1.into()], &[]).unwrap()), ["Number"]);
        assert!(verifier
            .verify(&Type::Any, &[json!([1, "x"]).into()], &[])
            .unwrap()
            .is_empty());
    }
}
