//! Property tests on randomly generated expressions.

use proptest::prelude::*;

use mathexpr_eval::evaluate;
use mathexpr_parser::{parse_recursive, parse_table};

use crate::init_logging;

/// Generates syntactically valid expressions.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0_u32..1_000).prop_map(|value| value.to_string()),
        (0_u32..10).prop_map(|value| format!("pi({value})")),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!['+', '-', '*', '/']),
                inner.clone()
            )
                .prop_map(|(lhs, op, rhs)| format!("{lhs}{op}{rhs}")),
            inner.clone().prop_map(|expr| format!("-{expr}")),
            inner.clone().prop_map(|expr| format!("({expr})")),
            (inner.clone(), inner.clone()).prop_map(|(x, y)| format!("pow({x},{y})")),
            prop::collection::vec(inner, 4)
                .prop_map(|args| format!("vlength({})", args.join(","))),
        ]
    })
}

/// Generates a chain of numbers joined by operations of the same precedence.
fn chain(ops: [char; 2], min_value: u32) -> impl Strategy<Value = (u32, Vec<(char, u32)>)> {
    (
        0_u32..1_000,
        prop::collection::vec((prop::sample::select(ops.to_vec()), min_value..1_000), 0..10),
    )
}

fn chain_to_string(first: u32, rest: &[(char, u32)]) -> String {
    rest.iter().fold(first.to_string(), |mut acc, (op, value)| {
        acc.push(*op);
        acc.push_str(&value.to_string());
        acc
    })
}

fn fold_chain(first: u32, rest: &[(char, u32)]) -> f64 {
    rest.iter().fold(f64::from(first), |acc, &(op, value)| {
        let value = f64::from(value);
        match op {
            '+' => acc + value,
            '-' => acc - value,
            '*' => acc * value,
            '/' => acc / value,
            _ => unreachable!(),
        }
    })
}

proptest! {
    #[test]
    fn parsers_agree_on_random_expressions(expr in expression()) {
        init_logging();
        let recursive = parse_recursive(&expr).unwrap();
        let table = parse_table(&expr).unwrap();
        prop_assert_eq!(recursive.prefix_text(), expr.as_str());
        prop_assert_eq!(
            recursive.display_tree().to_string(),
            table.display_tree().to_string()
        );

        match (evaluate(&recursive), evaluate(&table)) {
            (Ok(x), Ok(y)) => prop_assert!(x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan())),
            (Err(x), Err(y)) => {
                prop_assert_eq!(x.kind(), y.kind());
                prop_assert_eq!(x.range(), y.range());
            }
            (x, y) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", x, y),
        }
    }

    #[test]
    fn parsers_agree_on_arbitrary_input(input in "[0-9a-z+\\-*/(),&]{0,12}") {
        init_logging();
        match (parse_recursive(&input), parse_table(&input)) {
            (Ok(recursive), Ok(table)) => prop_assert_eq!(
                recursive.display_tree().to_string(),
                table.display_tree().to_string()
            ),
            (Err(x), Err(y)) => {
                prop_assert_eq!(x.kind(), y.kind());
                prop_assert_eq!(x.span().location_offset(), y.span().location_offset());
            }
            (x, y) => prop_assert!(
                false,
                "outcomes differ on {:?}: {:?} vs {:?}",
                input,
                x.map(|tree| tree.prefix_text()),
                y.map(|tree| tree.prefix_text())
            ),
        }
    }

    #[test]
    fn additive_chains_are_left_associative((first, rest) in chain(['+', '-'], 0)) {
        let expr = chain_to_string(first, &rest);
        let tree = parse_table(&expr).unwrap();
        prop_assert_eq!(evaluate(&tree).unwrap(), fold_chain(first, &rest));
    }

    #[test]
    fn multiplicative_chains_are_left_associative((first, rest) in chain(['*', '/'], 1)) {
        let expr = chain_to_string(first, &rest);
        let tree = parse_recursive(&expr).unwrap();
        prop_assert_eq!(evaluate(&tree).unwrap(), fold_chain(first, &rest));
    }
}
