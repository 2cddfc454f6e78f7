use proptest::prelude::*;
use tydef::prelude::*;

fn env() -> Vec<EnvEntry> {
    vec![
        builtin::array().into(),
        builtin::number().into(),
        builtin::integer().into(),
        builtin::positive_integer().into(),
        builtin::negative_integer().into(),
        builtin::non_zero_integer().into(),
    ]
}

fn bound(curried: &Curried, var: &str) -> Vec<String> {
    curried
        .context()
        .get(var)
        .map(|b| b.types.iter().map(Type::to_string).collect())
        .unwrap_or_default()
}

fn list(xs: &[i32]) -> Value {
    Value::list(xs.iter().copied().map(Value::from))
}

proptest! {
    #[test]
    fn unification_is_order_independent(
        xs in prop::collection::vec(-1000i32..1000, 1..5),
        ys in prop::collection::vec(-1000i32..1000, 1..5),
    ) {
        let array = builtin::array();
        let a = || array.apply(Type::var("a"));
        let n = builtin::number;
        let definer = create(true, env());

        let twice = definer
            .def("twice", Constraints::new(), vec![a(), a(), n(), n()], |_| Value::from(0))
            .unwrap();
        let split = twice.apply([list(&xs), list(&ys)]).unwrap().into_curried().unwrap();

        let once = definer
            .def("once", Constraints::new(), vec![a(), n(), n()], |_| Value::from(0))
            .unwrap();
        let joined: Vec<i32> = xs.iter().chain(&ys).copied().collect();
        let whole = once.apply([list(&joined)]).unwrap().into_curried().unwrap();

        prop_assert_eq!(bound(&split, "a"), bound(&whole, "a"));
    }

    #[test]
    fn checked_values_pass_through(x in any::<i32>()) {
        let n = builtin::number;
        let id = create(true, env())
            .def("id", Constraints::new(), vec![n(), n()], |args| args[0].clone())
            .unwrap();
        prop_assert_eq!(id.call([x]).unwrap(), Value::from(x));
    }

    #[test]
    fn strings_never_bind_to_numbers(x in any::<i32>(), s in "[a-z]{0,8}") {
        let a = || Type::var("a");
        let f = create(true, builtin::env())
            .def("f", Constraints::new(), vec![a(), a(), a()], |args| args[0].clone())
            .unwrap();
        let err = f.call([Value::from(x), Value::from(s)]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::TypeVariableConflict);
    }
}
