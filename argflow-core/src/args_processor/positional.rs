//! Assignment of leftover tokens to positional parameters.
//!
//! Positional parameters that were not given explicitly as flags each take
//! one leftover token, in declaration order. At most one of them may be an
//! array; it absorbs every token not reserved for the others (at least one
//! slot wide). Tokens beyond the planned width stay in the leftover list.

use serde_json::Value;
use tracing::debug;

use crate::argv::Argv;
use crate::error::{ArgsError, Result};
use crate::schema::{Param, Schema};

/// One positional parameter and how many tokens it takes
#[derive(Debug, Clone, Copy)]
enum Slot<'a> {
    /// Exactly one token
    Fixed(&'a Param),
    /// Whatever the fixed slots leave over
    Variadic(&'a Param),
}

impl<'a> Slot<'a> {
    fn param(&self) -> &'a Param {
        match *self {
            Slot::Fixed(param) | Slot::Variadic(param) => param,
        }
    }
}

/// Ordered positional slots to fill for one invocation
#[derive(Debug, Clone)]
pub struct PositionalPlan<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> PositionalPlan<'a> {
    /// Plan the positional parameters of `schema` that `argv` does not
    /// already hold as explicit flags.
    pub fn new(schema: &'a Schema, argv: &Argv) -> Result<Self> {
        Self::from_params(
            schema
                .iter()
                .filter(|param| param.positional && !argv.contains(&param.name)),
        )
    }

    /// Plan the given parameters in order, failing if more than one is an array.
    pub fn from_params(params: impl IntoIterator<Item = &'a Param>) -> Result<Self> {
        let mut slots = Vec::new();
        let mut variadic: Option<&Param> = None;

        for param in params {
            if param.kind.is_array() {
                if let Some(first) = variadic {
                    return Err(ArgsError::MultipleVariadicPositionals {
                        first: first.name.clone(),
                        second: param.name.clone(),
                    });
                }
                variadic = Some(param);
                slots.push(Slot::Variadic(param));
            } else {
                slots.push(Slot::Fixed(param));
            }
        }

        Ok(Self { slots })
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Token count for each slot given `available` leftover tokens
    pub fn widths(&self, available: usize) -> Vec<usize> {
        let fixed = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Fixed(_)))
            .count();
        let variadic = available.saturating_sub(fixed).max(1);

        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Fixed(_) => 1,
                Slot::Variadic(_) => variadic,
            })
            .collect()
    }

    /// Move leftover tokens into the planned slots.
    ///
    /// Slots whose range runs past the available tokens get an empty array
    /// (variadic) or stay absent (fixed).
    pub fn apply(&self, mut argv: Argv) -> Argv {
        let widths = self.widths(argv.rest.len());
        let total: usize = widths.iter().sum();
        let taken: Vec<Value> = argv.rest.drain(..total.min(argv.rest.len())).collect();

        let mut start = 0;
        for (slot, width) in self.slots.iter().zip(widths) {
            let end = start + width;
            let range = &taken[start.min(taken.len())..end.min(taken.len())];

            match slot {
                Slot::Variadic(param) => argv.set(param.name.clone(), Value::Array(range.to_vec())),
                Slot::Fixed(param) => {
                    if let Some(value) = range.first() {
                        argv.set(param.name.clone(), value.clone());
                    }
                }
            }
            start = end;
        }

        debug!(
            "Assigned {} positional tokens to [{}], {} left over",
            taken.len(),
            self.slots.iter().map(|slot| slot.param().name.as_str()).collect::<Vec<_>>().join(", "),
            argv.rest.len()
        );
        argv
    }
}

/// Fill positional parameters from the leftover tokens.
///
/// Parameters already present in `argv` (given as explicit flags) are skipped.
pub fn resolve_positionals(schema: &Schema, argv: Argv) -> Result<Argv> {
    let plan = PositionalPlan::new(schema, &argv)?;
    if plan.is_empty() {
        return Ok(argv);
    }
    Ok(plan.apply(argv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarType;
    use serde_json::json;

    fn rest(tokens: &[&str]) -> Argv {
        let mut argv = Argv::new();
        argv.rest = tokens.iter().map(|t| json!(t)).collect();
        argv
    }

    fn git_add() -> Schema {
        Schema::new(vec![
            Param::path("gitdir").positional().required(),
            Param::path("dir").positional().required(),
            Param::path("filepath").positional().required(),
        ])
        .unwrap()
    }

    #[test]
    fn test_fixed_slots_in_order() {
        let argv = resolve_positionals(&git_add(), rest(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(argv.get("gitdir"), Some(&json!("a")));
        assert_eq!(argv.get("dir"), Some(&json!("b")));
        assert_eq!(argv.get("filepath"), Some(&json!("c")));
        assert_eq!(argv.rest, vec![json!("d")]);
    }

    #[test]
    fn test_explicit_flag_wins() {
        let mut argv = rest(&["etc", "etc/terminal/.bash_history"]);
        argv.set("gitdir", json!("."));
        let argv = resolve_positionals(&git_add(), argv).unwrap();
        assert_eq!(argv.get("gitdir"), Some(&json!(".")));
        assert_eq!(argv.get("dir"), Some(&json!("etc")));
        assert_eq!(argv.get("filepath"), Some(&json!("etc/terminal/.bash_history")));
        assert!(argv.rest.is_empty());
    }

    #[test]
    fn test_too_few_tokens_leaves_fixed_slots_absent() {
        let argv = resolve_positionals(&git_add(), rest(&["a"])).unwrap();
        assert_eq!(argv.get("gitdir"), Some(&json!("a")));
        assert!(!argv.contains("dir"));
        assert!(!argv.contains("filepath"));
    }

    #[test]
    fn test_variadic_takes_the_middle() {
        let schema = Schema::new(vec![
            Param::array("sources", ScalarType::Path).positional(),
            Param::path("target").positional(),
            Param::boolean("recursive").with_alias("r"),
        ])
        .unwrap();
        let argv = resolve_positionals(&schema, rest(&["a", "b", "c", "d", "e"])).unwrap();
        assert_eq!(argv.get("sources"), Some(&json!(["a", "b", "c", "d"])));
        assert_eq!(argv.get("target"), Some(&json!("e")));
        assert!(argv.rest.is_empty());
    }

    #[test]
    fn test_variadic_is_at_least_one_wide() {
        let schema = Schema::new(vec![
            Param::array("sources", ScalarType::Path).positional(),
            Param::path("target").positional(),
        ])
        .unwrap();
        let plan = PositionalPlan::new(&schema, &Argv::new()).unwrap();
        assert_eq!(plan.widths(0), vec![1, 1]);
        assert_eq!(plan.widths(1), vec![1, 1]);
        assert_eq!(plan.widths(5), vec![4, 1]);
    }

    #[test]
    fn test_variadic_with_no_tokens_is_empty_array() {
        let schema = Schema::new(vec![Param::array("x", ScalarType::String).positional()]).unwrap();
        let argv = resolve_positionals(&schema, Argv::new()).unwrap();
        assert_eq!(argv.get("x"), Some(&json!([])));
    }

    #[test]
    fn test_leading_variadic_starves_later_slots() {
        // With one token, the array is still one slot wide and takes it,
        // leaving nothing for `target` declared after it.
        let schema = Schema::new(vec![
            Param::array("sources", ScalarType::Path).positional(),
            Param::path("target").positional(),
        ])
        .unwrap();
        let argv = resolve_positionals(&schema, rest(&["a"])).unwrap();
        assert_eq!(argv.get("sources"), Some(&json!(["a"])));
        assert!(!argv.contains("target"));
    }

    #[test]
    fn test_from_params_rejects_two_variadics() {
        let a = Param::array("a", ScalarType::String).positional();
        let b = Param::array("b", ScalarType::String).positional();
        let err = PositionalPlan::from_params([&a, &b]).unwrap_err();
        assert!(matches!(err, ArgsError::MultipleVariadicPositionals { .. }));
    }

    #[test]
    fn test_non_positional_params_are_ignored() {
        let schema = Schema::new(vec![Param::string("name"), Param::string("root").positional()]).unwrap();
        let argv = resolve_positionals(&schema, rest(&["yo"])).unwrap();
        assert_eq!(argv.get("root"), Some(&json!("yo")));
        assert!(!argv.contains("name"));
    }
}
