use log::debug;
use std::rc::Rc;
use tydef_types::{
    env::{Env, EnvEntry},
    types::Type,
};
use tydef_value::Value;

use crate::{
    curry::{Curried, Definition},
    error::{DefinitionError, TypeError},
    options::DefOptions,
    signature::{Constraints, Signature},
};

/// Defines checked, curried functions over one environment.
#[derive(Debug, Clone)]
pub struct Definer {
    env: Env,
    options: DefOptions,
}

/// Creates a definer over `entries`.
pub fn create<E>(check_types: bool, entries: impl IntoIterator<Item = E>) -> Definer
where
    E: Into<EnvEntry>,
{
    Definer::with_options(DefOptions::default().check_types(check_types), entries)
}

impl Definer {
    pub fn new<E>(entries: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<EnvEntry>,
    {
        Self::with_options(DefOptions::default(), entries)
    }

    pub fn with_options<E>(options: DefOptions, entries: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<EnvEntry>,
    {
        Self {
            env: Env::new(entries),
            options,
        }
    }

    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    #[inline]
    pub fn options(&self) -> &DefOptions {
        &self.options
    }

    /// Defines `name` with argument types followed by the return type.
    pub fn def<F>(
        &self,
        name: impl Into<String>,
        constraints: Constraints,
        types: Vec<Type>,
        implementation: F,
    ) -> Result<Curried, TypeError>
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let name = name.into();
        let mut args = types;
        let Some(ret) = args.pop() else {
            return Err(DefinitionError::MissingReturnType { name }.into());
        };

        if args.len() > self.options.max_arity {
            return Err(DefinitionError::ArityTooLarge {
                max: self.options.max_arity,
            }
            .into());
        }

        let signature = Signature {
            name,
            constraints,
            args,
            ret,
        };

        if self.options.check_types {
            let types: Vec<Type> = signature.types().cloned().collect();
            if let Some(missing) = self.env.missing_reference(&types) {
                return Err(self.not_in_environment(&signature.name, missing).into());
            }
        }

        let checking = if self.options.check_types { "on" } else { "off" };
        debug!(
            "Defined `{}` of arity {} (type checking {checking})",
            signature.name,
            signature.arity()
        );

        Ok(Curried::new(Rc::new(Definition {
            signature,
            env: self.env.clone(),
            check_types: self.options.check_types,
            implementation: Rc::new(implementation),
        })))
    }

    fn not_in_environment(&self, name: &str, missing: &Type) -> DefinitionError {
        let env: Vec<String> = self
            .env
            .candidates()
            .iter()
            .map(|t| format!("  - {t}"))
            .collect();

        DefinitionError::NotInEnvironment {
            name: name.to_owned(),
            missing: missing.name().map_or_else(|| missing.to_string(), str::to_owned),
            env: env.join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tydef_types::builtin;

    use super::*;
    use crate::error::ErrorKind;

    fn id(args: &[Value]) -> Value {
        args[0].clone()
    }

    #[test]
    fn arity_ceiling_holds_without_checking() {
        let definer = create(false, builtin::env());
        let types = vec![builtin::number(); 11];
        let err = definer.def("f", Constraints::new(), types, id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Definition);
        assert_eq!(
            err.to_string(),
            "‘def’ cannot define a function with arity greater than nine"
        );

        let types = vec![builtin::number(); 10];
        assert!(definer.def("g", Constraints::new(), types, id).is_ok());
    }

    #[test]
    fn missing_return_type() {
        let definer = create(true, builtin::env());
        let err = definer.def("f", Constraints::new(), Vec::new(), id).unwrap_err();
        assert!(matches!(
            err,
            TypeError::Definition(DefinitionError::MissingReturnType { .. })
        ));
    }

    #[test]
    fn references_must_be_in_environment() {
        let definer = create(true, [builtin::string(), builtin::number()]);
        let types = vec![builtin::array().apply(builtin::number()), builtin::number()];
        let err = definer.def("sum", Constraints::new(), types, id).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Definition of ‘sum’ references Array which is not in the environment:\n\n  - String\n  - Number"
        );
    }

    #[test]
    fn nested_references_are_checked() {
        let definer = create(true, builtin::env());
        let types = vec![builtin::array().apply(builtin::integer()), builtin::number()];
        let err = definer.def("sum", Constraints::new(), types, id).unwrap_err();
        match err {
            TypeError::Definition(DefinitionError::NotInEnvironment { missing, .. }) => {
                assert_eq!(missing, "tydef/Integer")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unchecked_definitions_skip_references() {
        let definer = create(false, [builtin::string()]);
        let types = vec![builtin::integer(), builtin::integer()];
        assert!(definer.def("f", Constraints::new(), types, id).is_ok());
    }

    #[test]
    fn variables_are_exempt() {
        let definer = create(true, Vec::<EnvEntry>::new());
        let types = vec![Type::var("a"), Type::var("a")];
        let f = definer.def("id", Constraints::new(), types, id).unwrap();
        assert_eq!(f.arity(), 1);
        assert_eq!(f.name(), "id");
    }
}
