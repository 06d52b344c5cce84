use assert_matches::assert_matches;

use super::*;
use crate::{
    alloc::{String, ToString, Vec},
    grammar::{Nonterminal, Symbol, Terminal},
    Node,
};

fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn parse_both(text: &str) -> [Result<Tree<'_>, Error<'_>>; 2] {
    init_logger();
    Strategy::ALL.map(|strategy| strategy.parse(text))
}

fn assert_error(text: &str, expected_kind: ErrorKind, expected_offset: usize) {
    for (strategy, result) in Strategy::ALL.into_iter().zip(parse_both(text)) {
        let err = match result {
            Ok(tree) => panic!("{strategy} parser accepted {text:?}: {tree:?}"),
            Err(err) => err,
        };
        assert_eq!(*err.kind(), expected_kind, "{strategy} parser on {text:?}");
        assert_eq!(
            err.span().location_offset(),
            expected_offset,
            "{strategy} parser on {text:?}"
        );
    }
}

fn collect_symbols(tree: &Tree<'_>) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut pending = Vec::new();
    pending.push(tree);
    while let Some(node) = pending.pop() {
        symbols.push(node.symbol());
        pending.extend(node.children());
    }
    symbols
}

const SAMPLES: &[&str] = &[
    "0",
    "42",
    "1+2",
    "2-3-4",
    "8/4/2",
    "2*3+4*5",
    "-5",
    "--5",
    "-(1-2)*3",
    "((7))",
    "sin(0)",
    "pow(2,3)",
    "vlength(1,2,3,4)",
    "pow(pow(2,2),-sqrt(9))/3",
    "10-pi(1)*2",
];

#[test]
fn simple_expression_tree() {
    let expected = "\
<expression>
   <group>
      <factor>
         <number>
            <digit>
               1
   <etail>
      +
      <expression>
         <group>
            <factor>
               <number>
                  <digit>
                     2
";

    for tree in parse_both("1+2") {
        let tree = tree.unwrap();
        assert_eq!(tree.display_tree().to_string(), expected);
        assert_eq!(tree.node_count(), 14);
    }
}

#[test]
fn function_call_tree() {
    for tree in parse_both("pow(2,3)") {
        let tree = tree.unwrap();
        let group = tree.first_child().unwrap();
        assert!(group.next_sibling().is_none());
        let factor = group.first_child().unwrap();
        let function = factor.first_child().unwrap();
        assert_eq!(function.symbol(), Symbol::from(Nonterminal::Function));

        let name = function.first_child().unwrap();
        assert_eq!(name.symbol(), Symbol::from(Nonterminal::String));
        assert_eq!(name.prefix_text(), "pow");

        let params = name.next_sibling().unwrap();
        let param_symbols: Vec<_> = params.children().map(Node::symbol).collect();
        assert_eq!(
            param_symbols,
            [
                Symbol::Terminal(Terminal::LeftParen),
                Symbol::Nonterminal(Nonterminal::Expression),
                Symbol::Nonterminal(Nonterminal::PTail),
                Symbol::Terminal(Terminal::RightParen),
            ]
        );
        let ptail = params.child(2).unwrap();
        assert_eq!(ptail.children().count(), 2);
        assert_eq!(ptail.prefix_text(), ",3");
    }
}

#[test]
fn lexemes_carry_locations() {
    for tree in parse_both("12*(3)") {
        let tree = tree.unwrap();
        let mut terminals = Vec::new();
        let mut pending = Vec::new();
        pending.push(&tree);
        while let Some(node) = pending.pop() {
            if let Some(lexeme) = node.lexeme() {
                terminals.push((lexeme.extra, lexeme.location_offset()));
            }
            let start = pending.len();
            pending.extend(node.children());
            pending[start..].reverse();
        }
        assert_eq!(
            terminals,
            [('1', 0), ('2', 1), ('*', 2), ('(', 3), ('3', 4), (')', 5)]
        );
    }
}

#[test]
fn strategies_produce_identical_trees() {
    for &sample in SAMPLES {
        let [recursive, table] = parse_both(sample);
        let recursive = recursive.unwrap();
        let table = table.unwrap();
        assert_eq!(
            recursive.display_tree().to_string(),
            table.display_tree().to_string(),
            "{sample}"
        );
        assert_eq!(recursive.prefix_text(), sample);
        assert_eq!(table.prefix_text(), sample);
    }
}

#[test]
fn trees_contain_no_empty_derivations() {
    for &sample in SAMPLES {
        for tree in parse_both(sample) {
            let symbols = collect_symbols(&tree.unwrap());
            assert!(symbols.iter().all(|symbol| !symbol.is_empty()), "{sample}");
            assert_eq!(symbols[0], Symbol::from(Nonterminal::Expression));
        }
    }
}

#[test]
fn nullable_nodes_always_have_children() {
    for &sample in SAMPLES {
        for tree in parse_both(sample) {
            let tree = tree.unwrap();
            let mut pending = Vec::new();
            pending.push(&tree);
            while let Some(node) = pending.pop() {
                if node.nonterminal().map_or(false, Nonterminal::is_nullable) {
                    assert!(node.first_child().is_some(), "{sample}: {node:?}");
                }
                pending.extend(node.children());
            }
        }
    }
}

#[test]
fn destroying_parsed_trees() {
    for tree in parse_both("vlength(1,2,3,4)") {
        let tree = tree.unwrap();
        let count = tree.node_count();
        assert_eq!(tree.destroy(), count);
    }
}

#[test]
fn deeply_nested_input() {
    let mut text = String::new();
    for _ in 0..50 {
        text.push('(');
    }
    text.push('1');
    for _ in 0..50 {
        text.push(')');
    }
    let [recursive, table] = parse_both(&text);
    assert_eq!(recursive.unwrap().node_count(), table.unwrap().node_count());
}

#[test]
fn long_digit_sequence_is_handled_by_table_parser() {
    let text: String = "9".repeat(20_000);
    let tree = parse_table(&text).unwrap();
    assert_eq!(tree.prefix_text(), text);
}

#[test]
fn empty_input_is_rejected() {
    let expected = ErrorKind::UnexpectedTerm {
        context: Some(Nonterminal::Factor),
    };
    assert_error("", expected, 0);
}

#[test]
fn unfinished_inputs() {
    let unfinished_factor = ErrorKind::UnexpectedTerm {
        context: Some(Nonterminal::Factor),
    };
    assert_error("5+", unfinished_factor, 2);
    assert_error("2*-", unfinished_factor, 3);
    assert_error("(5", unfinished_factor, 2);

    let unfinished_params = ErrorKind::UnexpectedTerm {
        context: Some(Nonterminal::ParamList),
    };
    assert_error("sin", unfinished_params, 3);
    assert_error("pow(2,3", unfinished_params, 7);
}

#[test]
fn unexpected_chars() {
    let in_factor = ErrorKind::UnexpectedChar {
        context: Some(Nonterminal::Factor),
    };
    assert_error("2*+3", in_factor, 2);
    assert_error("Sin(1)", in_factor, 0);
    assert_error("()", in_factor, 1);

    let in_params = ErrorKind::UnexpectedChar {
        context: Some(Nonterminal::ParamList),
    };
    assert_error("sin5)", in_params, 3);
    assert_error("pow(2;3)", in_params, 5);
}

#[test]
fn leftover_chars() {
    assert_error("5&3", ErrorKind::Leftovers, 1);
    assert_error("5)", ErrorKind::Leftovers, 1);
    assert_error("1 + 2", ErrorKind::Leftovers, 1);
    assert_error("5x", ErrorKind::Leftovers, 1);
}

#[test]
fn non_ascii_input() {
    assert_error("2π", ErrorKind::NonAsciiInput, 1);
    let err = parse_recursive("2+π").unwrap_err();
    assert_eq!(*err.span().fragment(), "π");
}

#[test]
fn error_display() {
    for result in parse_both("5&3") {
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "1:2: Uninterpreted characters after parsing (found '&')"
        );
    }
}

#[test]
fn strategy_from_str() {
    assert_eq!("recursive".parse::<Strategy>(), Ok(Strategy::Recursive));
    assert_eq!("r".parse::<Strategy>(), Ok(Strategy::Recursive));
    assert_eq!("table".parse::<Strategy>(), Ok(Strategy::Table));
    assert_eq!("t".parse::<Strategy>(), Ok(Strategy::Table));
    assert_matches!("ll1".parse::<Strategy>(), Err(ParseStrategyError));
    assert_eq!(Strategy::default(), Strategy::Recursive);

    for strategy in Strategy::ALL {
        assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
    }
}
