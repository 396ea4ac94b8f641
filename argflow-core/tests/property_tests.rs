// argflow-core/tests/property_tests.rs

use argflow_core::args_processor::{apply_defaults, coerce_arrays, resolve_paths, resolve_positionals};
use argflow_core::{ArgsError, Argv, Param, ScalarType, Schema, process_args};
use proptest::prelude::*;
use serde_json::{Value, json};

fn leftover(tokens: &[String]) -> Argv {
    let mut argv = Argv::new();
    argv.rest = tokens.iter().cloned().map(Value::String).collect();
    argv
}

fn fixed_slots(count: usize) -> Vec<Param> {
    (0..count).map(|i| Param::string(format!("slot{i}")).positional()).collect()
}

proptest! {
    #[test]
    fn fixed_slots_take_one_token_each(
        count in 0usize..6,
        tokens in prop::collection::vec("[a-z]{1,8}", 0..12),
    ) {
        let schema = Schema::new(fixed_slots(count)).unwrap();
        let argv = resolve_positionals(&schema, leftover(&tokens)).unwrap();

        for i in 0..count {
            let name = format!("slot{}", i);
            let expected = tokens.get(i).map(|t| json!(t));
            prop_assert_eq!(argv.get(&name).cloned(), expected);
        }
        prop_assert_eq!(argv.rest.len(), tokens.len().saturating_sub(count));
    }

    #[test]
    fn variadic_slot_takes_the_remainder(
        count in 0usize..5,
        position in 0usize..6,
        extra in 1usize..6,
        seed in prop::collection::vec("[a-z]{1,8}", 12),
    ) {
        let mut params = fixed_slots(count);
        let position = position.min(count);
        params.insert(position, Param::array("rest", ScalarType::String).positional());
        let schema = Schema::new(params).unwrap();

        let tokens = &seed[..count + extra];
        let argv = resolve_positionals(&schema, leftover(tokens)).unwrap();

        let variadic = argv.get("rest").and_then(Value::as_array).unwrap();
        prop_assert_eq!(variadic.len(), extra);
        for i in 0..count {
            let name = format!("slot{}", i);
            prop_assert!(argv.get(&name).is_some_and(Value::is_string), "{} should hold one token", name);
        }
        prop_assert!(argv.rest.is_empty());
    }

    #[test]
    fn two_positional_arrays_always_fail(first in 0usize..4, second in 0usize..4) {
        let mut params = fixed_slots(3);
        params.insert(first.min(params.len()), Param::array("a", ScalarType::String).positional());
        params.insert(second.min(params.len()), Param::array("b", ScalarType::Path).positional());

        let result = Schema::new(params);
        prop_assert!(
            matches!(result, Err(ArgsError::MultipleVariadicPositionals { .. })),
            "expected a configuration error"
        );
    }

    #[test]
    fn defaults_are_idempotent(
        number in prop::option::of(-5i64..5),
        flag in prop::option::of(any::<bool>()),
        items in prop::option::of(prop::collection::vec("[a-z]{1,4}", 0..3)),
    ) {
        let schema = Schema::new(vec![
            Param::number("number").with_default(1),
            Param::boolean("flag"),
            Param::array("items", ScalarType::String).with_default("x"),
            Param::string("plain"),
        ])
        .unwrap();

        let mut argv = Argv::new();
        if let Some(number) = number {
            argv.set("number", json!(number));
        }
        if let Some(flag) = flag {
            argv.set("flag", json!(flag));
        }
        if let Some(items) = items {
            argv.set("items", json!(items));
        }

        let once = apply_defaults(&schema, argv);
        let twice = apply_defaults(&schema, once.clone());
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.get("flag").is_some_and(Value::is_boolean), "flag should default to a boolean");
        prop_assert!(
            once.get("items").and_then(Value::as_array).is_some_and(|items| !items.is_empty()),
            "items should hold at least the default"
        );
    }

    #[test]
    fn array_coercion_is_idempotent(values in prop::collection::vec("[a-z]{1,4}", 0..4), scalar in any::<bool>()) {
        let schema = Schema::new(vec![Param::array("items", ScalarType::String)]).unwrap();
        let mut argv = Argv::new();
        if scalar {
            argv.set("items", json!(values.first().cloned().unwrap_or_default()));
        } else {
            argv.set("items", json!(values));
        }

        let once = coerce_arrays(&schema, argv);
        let twice = coerce_arrays(&schema, once.clone());
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.get("items").is_some_and(Value::is_array), "items should be a sequence");
    }

    #[test]
    fn array_params_are_always_sequences(given in prop::option::of(prop::collection::vec("[a-z]{1,4}", 0..3))) {
        let schema = Schema::new(vec![Param::array("items", ScalarType::String)]).unwrap();
        let mut argv = Argv::new();
        if let Some(given) = given {
            argv.set("items", json!(given));
        }

        let argv = process_args(&schema, argv).unwrap();
        prop_assert!(argv.get("items").is_some_and(Value::is_array), "items should be a sequence");
    }

    #[test]
    fn absolute_paths_are_untouched(
        path in "(/[a-z][a-z.]{0,5}){1,4}",
        cwd in "(/[a-z]{1,6}){0,3}",
    ) {
        let schema = Schema::new(vec![Param::path("p")]).unwrap();
        let mut argv = Argv::new();
        argv.set("p", json!(path));

        let argv = resolve_paths(&schema, argv, &cwd).unwrap();
        prop_assert_eq!(argv.get("p"), Some(&json!(path)));
    }
}
