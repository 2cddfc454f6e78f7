//! Diagnostics for value level failures.

use std::ops::Range;
use tydef_diag::{text::width, Callout, Diagnostic, Mark};
use tydef_types::{
    env::Env,
    types::{Param, Type, TypeClass},
};
use tydef_value::{strip_namespace, Value};

use crate::{
    context::Evidence,
    signature::{Position, Signature},
};

const CONFLICT: &str = "Since there is no type of which all the above values are members, \
                        the type-variable constraint has been violated.";

/// The signature header with the char spans of its parts.
struct Header {
    text: String,
    /// `(variable, class name, span)` of each rendered constraint.
    constraints: Vec<(String, String, Range<usize>)>,
    slots: Vec<Range<usize>>,
}

impl Header {
    fn new(sig: &Signature) -> Self {
        let mut text = format!("{} :: ", sig.name);
        let mut constraints = Vec::new();

        let reprs: Vec<(&str, &TypeClass)> = sig
            .constraints
            .iter()
            .flat_map(|(var, classes)| classes.iter().map(move |class| (var.as_str(), class)))
            .collect();
        if !reprs.is_empty() {
            let wrap = reprs.len() > 1;
            if wrap {
                text.push('(');
            }
            for (i, (var, class)) in reprs.into_iter().enumerate() {
                if i > 0 {
                    text.push_str(", ");
                }
                let repr = format!("{class} {var}");
                let start = width(&text);
                constraints.push((
                    var.to_owned(),
                    class.name().to_owned(),
                    start..start + width(&repr),
                ));
                text.push_str(&repr);
            }
            if wrap {
                text.push(')');
            }
            text.push_str(" => ");
        }

        let mut slots = Vec::new();
        for (i, ty) in sig.types().enumerate() {
            if i > 0 {
                text.push_str(" -> ");
            }
            let bare = ty.show_bare();
            let start = width(&text);
            slots.push(start..start + width(&bare));
            text.push_str(&bare);
        }

        Self {
            text,
            constraints,
            slots,
        }
    }

    fn mark(&self, sig: &Signature, position: Position, path: &[Param], label: &str) -> Mark {
        let slot = &self.slots[sig.index(position)];
        let local = locate(sig.at(position), path);
        Mark::labelled(slot.start + local.start..slot.start + local.end, label)
    }

    fn constraint(&self, var: &str, class: &TypeClass) -> Option<Mark> {
        self.constraints
            .iter()
            .find(|(v, c, _)| v == var && c == class.name())
            .map(|(_, _, span)| Mark::new(span.clone()))
    }
}

/// Span of the sub-type addressed by `path` within the bare text of `ty`.
fn locate(ty: &Type, path: &[Param]) -> Range<usize> {
    if path.is_empty() {
        return 0..width(&ty.show_bare());
    }

    let mut offset = 0;
    let mut current = ty;
    for &step in path {
        let Some(child) = current.param(step) else {
            break;
        };
        let name = current.name().map_or(0, |n| width(strip_namespace(n)));
        offset += match (current, step) {
            (Type::Binary(binary), Param::Second) => name + width(&binary.first.to_string()) + 3,
            _ => name + 2,
        };
        current = child;
    }

    // the outer parentheses are not part of the bare text
    let start = offset.saturating_sub(1);
    start..start + width(&current.to_string())
}

fn pair_line((value, types): &(Value, Vec<Type>)) -> String {
    let types: Vec<String> = types.iter().map(Type::show_bare).collect();
    format!("{value} :: {}", types.join(", "))
}

fn callout(number: usize, evidence: &Evidence) -> Callout {
    Callout::new(number, evidence.pairs.iter().map(pair_line))
}

pub fn invalid_value(sig: &Signature, env: &Env, position: Position, value: &Value) -> Diagnostic {
    let header = Header::new(sig);
    let evidence = Evidence::new(env, position, &[], std::slice::from_ref(value));

    Diagnostic::new("Invalid value", header.text.clone())
        .with_mark(header.mark(sig, position, &[], "1"))
        .with_callout(callout(1, &evidence))
        .with_message(format!(
            "The value at position 1 is not a member of ‘{}’.",
            sig.at(position).show_bare()
        ))
}

pub fn constraint_violation(
    sig: &Signature,
    evidence: &Evidence,
    var: &str,
    class: &TypeClass,
) -> Diagnostic {
    let header = Header::new(sig);
    let mut diag = Diagnostic::new("Type-class constraint violation", header.text.clone())
        .with_mark(header.mark(sig, evidence.position, &evidence.path, "1"))
        .with_callout(callout(1, evidence))
        .with_message(format!(
            "‘{}’ requires ‘{var}’ to satisfy the {class} type-class constraint; \
             the value at position 1 does not.",
            sig.name
        ));
    if let Some(mark) = header.constraint(var, class) {
        diag = diag.with_mark(mark);
    }
    diag
}

/// A variable whose values, bound at one occurrence, share no type.
pub fn conflict(sig: &Signature, evidence: &Evidence) -> Diagnostic {
    let header = Header::new(sig);

    Diagnostic::new("Type-variable constraint violation", header.text.clone())
        .with_mark(header.mark(sig, evidence.position, &evidence.path, "1"))
        .with_callout(callout(1, evidence))
        .with_message(CONFLICT)
}

/// A variable whose new values share no type with its earlier binding.
pub fn conflict2(sig: &Signature, prior: &Evidence, current: &Evidence) -> Diagnostic {
    let header = Header::new(sig);
    let mark = |evidence: &Evidence, label| {
        header.mark(sig, evidence.position, &evidence.path, label)
    };

    let (fst, snd) = if mark(current, "").span.start < mark(prior, "").span.start {
        (current, prior)
    } else {
        (prior, current)
    };

    Diagnostic::new("Type-variable constraint violation", header.text.clone())
        .with_mark(mark(fst, "1"))
        .with_mark(mark(snd, "2"))
        .with_callout(callout(1, fst))
        .with_callout(callout(2, snd))
        .with_message(CONFLICT)
}

#[cfg(test)]
mod tests {
    use tydef_types::builtin;

    use super::*;
    use crate::signature::Constraints;

    fn sig(name: &str, constraints: Constraints, types: Vec<Type>) -> Signature {
        let mut args = types;
        let ret = args.pop().unwrap();
        Signature {
            name: name.to_owned(),
            constraints,
            args,
            ret,
        }
    }

    fn env() -> Env {
        Env::new(builtin::env())
    }

    fn semigroup() -> TypeClass {
        TypeClass::new("my-package/Semigroup", |v| matches!(v, Value::Str(_) | Value::List(_)))
    }

    #[test]
    fn invalid_value_layout() {
        let n = builtin::number;
        let sig = sig("add", Constraints::new(), vec![n(), n(), n()]);
        let diag = invalid_value(&sig, &env(), Position::Arg(0), &"x".into());

        let expected = "\
Invalid value

add :: Number -> Number -> Number
       ^^^^^^
         1

1)  \"x\" :: String

The value at position 1 is not a member of ‘Number’.";
        assert_eq!(diag.to_string(), expected);
    }

    #[test]
    fn return_slot_is_last() {
        let sig = sig("len", Constraints::new(), vec![builtin::string(), builtin::number()]);
        let diag = invalid_value(&sig, &env(), Position::Return, &"x".into());
        assert_eq!(diag.header, "len :: String -> Number");
        assert_eq!(diag.carets(), "                 ^^^^^^");
    }

    #[test]
    fn nested_occurrence_is_underlined() {
        let a = || Type::var("a");
        let sig = sig("g", Constraints::new(), vec![builtin::array().apply(a()), a()]);
        let values = [Value::from(1), Value::from("x")];
        let evidence = Evidence::new(&env(), Position::Arg(0), &[Param::First], &values);
        let diag = conflict(&sig, &evidence);

        let expected = "\
Type-variable constraint violation

g :: Array a -> a
           ^
           1

1)  1 :: Number
    \"x\" :: String

Since there is no type of which all the above values are members, the type-variable constraint has been violated.";
        assert_eq!(diag.to_string(), expected);
    }

    #[test]
    fn locate_through_binary_params() {
        let pair = tydef_types::types::BinaryTypeDef::new(
            "my-package/Pair",
            |_| true,
            |_| Vec::new(),
            |_| Vec::new(),
        );
        let ty = pair.apply(builtin::number(), builtin::array().apply(Type::var("b")));
        assert_eq!(ty.show_bare(), "Pair Number (Array b)");
        assert_eq!(locate(&ty, &[Param::First]), 5..11);
        assert_eq!(locate(&ty, &[Param::Second]), 12..21);
        assert_eq!(locate(&ty, &[Param::Second, Param::First]), 19..20);
    }

    #[test]
    fn dual_conflict_layout() {
        let a = || Type::var("a");
        let sig = sig("f", Constraints::new(), vec![a(), a(), a(), a()]);
        let env = env();
        let prior = Evidence::new(&env, Position::Arg(1), &[], &[2.into()]);
        let current = Evidence::new(&env, Position::Arg(2), &[], &["x".into()]);
        let diag = conflict2(&sig, &prior, &current);

        let expected = "\
Type-variable constraint violation

f :: a -> a -> a -> a
          ^    ^
          1    2

1)  2 :: Number

2)  \"x\" :: String

Since there is no type of which all the above values are members, the type-variable constraint has been violated.";
        assert_eq!(diag.to_string(), expected);
    }

    #[test]
    fn constraint_violation_layout() {
        let a = || Type::var("a");
        let constraints = Constraints::from([("a".to_owned(), vec![semigroup()])]);
        let sig = sig("concat", constraints, vec![a(), a(), a()]);
        let env = env();
        let evidence = Evidence::new(&env, Position::Arg(0), &[], &[1.into()]);
        let diag = constraint_violation(&sig, &evidence, "a", &semigroup());

        assert_eq!(diag.header, "concat :: Semigroup a => a -> a -> a");
        assert_eq!(diag.carets(), "          ^^^^^^^^^^^    ^");
        assert_eq!(diag.labels(), "                         1");
        assert_eq!(
            diag.message,
            "‘concat’ requires ‘a’ to satisfy the Semigroup type-class constraint; \
             the value at position 1 does not."
        );
    }

    #[test]
    fn several_constraints_are_parenthesised() {
        let monoid = TypeClass::new("my-package/Monoid", |_| true);
        let constraints = Constraints::from([
            ("b".to_owned(), vec![monoid]),
            ("a".to_owned(), vec![semigroup()]),
        ]);
        let sig = sig("h", constraints, vec![Type::var("a"), Type::var("b")]);
        let header = Header::new(&sig);
        assert_eq!(header.text, "h :: (Semigroup a, Monoid b) => a -> b");
        assert_eq!(header.constraints[1].2, 19..27);
    }
}
