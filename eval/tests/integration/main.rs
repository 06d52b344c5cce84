//! Integration tests for expression evaluation using both parsers.

use assert_matches::assert_matches;

use core::f64::consts::PI;

use mathexpr_eval::{evaluate, Error, ErrorKind};
use mathexpr_parser::Strategy;

mod random;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Evaluates `expr` with both parsers, checking that the outcomes agree.
fn try_evaluate(expr: &str) -> Result<f64, Error<'_>> {
    init_logging();
    let [recursive, table] = Strategy::ALL.map(|strategy| {
        let tree = strategy
            .parse(expr)
            .unwrap_or_else(|err| panic!("{strategy} parser failed on {expr:?}: {err}"));
        evaluate(&tree)
    });
    match (&recursive, &table) {
        (Ok(x), Ok(y)) => assert_eq!(x.to_bits(), y.to_bits(), "{expr}"),
        (Err(x), Err(y)) => {
            assert_eq!(x.kind(), y.kind(), "{expr}");
            assert_eq!(x.range(), y.range(), "{expr}");
        }
        _ => panic!("Parsers disagree on {expr:?}: {recursive:?} vs {table:?}"),
    }
    recursive
}

fn assert_value(expr: &str, expected: f64) {
    let value = try_evaluate(expr).unwrap_or_else(|err| panic!("{expr}: {err}"));
    assert!(
        (value - expected).abs() < 1e-9,
        "{expr}: actual = {value}, expected = {expected}"
    );
}

fn evaluation_error(expr: &str) -> Error<'_> {
    match try_evaluate(expr) {
        Ok(value) => panic!("Unexpected success for {expr:?}: {value}"),
        Err(err) => err,
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("0", 0.0);
    assert_value("42", 42.0);
    assert_value("007", 7.0);
    assert_value("1+2*3", 7.0);
    assert_value("(1+2)*3", 9.0);
    assert_value("10/4", 2.5);
    assert_value("1/3*3", 1.0);
    assert_value("2*(3+4)*5", 70.0);
}

#[test]
fn operations_are_left_associative() {
    assert_value("2-3-4", -5.0);
    assert_value("8/4/2", 1.0);
    assert_value("1-2+3", 2.0);
    assert_value("2*3/4", 1.5);
    assert_value("100/10/5*2", 4.0);
    assert_value("10-2*3-1", 3.0);
    assert_value("1-2-3-4-5-6-7-8-9", -43.0);
    assert_value("5-4+1", 2.0);
    assert_value("5/3/2", 5.0 / 6.0);
}

#[test]
fn unary_minus() {
    assert_value("-5", -5.0);
    assert_value("--5", 5.0);
    assert_value("---5", -5.0);
    assert_value("-5+3", -2.0);
    assert_value("2*-3", -6.0);
    assert_value("2--3", 5.0);
    assert_value("-(2-5)", 3.0);
    assert_value("-(12-2)/5", -2.0);
}

#[test]
fn function_calls() {
    assert_value("pow(2,10)-1", 1023.0);
    assert_value("pow(-2,2)", 4.0);
    assert_value("sqrt(16)+sqrt(0)", 4.0);
    assert_value("sqrt(pow(cosd(30),2)+pow(sind(30),2))", 1.0);
    assert_value("pi(1)", PI);
    assert_value("-pi(2)/2", -PI);
    assert_value("arctand(1)*4", 180.0);
    assert_value("vlength(0,0,3,4)", 5.0);
    assert_value("vlength(1,2,sqrt(4),-pi(1))", 1_f64.hypot(-PI - 2.0));
    assert_value("pow(pow(2,2),pow(2,1+1))", 256.0);
}

#[test]
fn large_numbers() {
    assert_value("1234567890123", 1_234_567_890_123.0);
    // Overflows `f64::MAX`.
    let value = try_evaluate(&"9".repeat(310)).unwrap();
    assert!(value.is_infinite());
}

#[test]
fn division_by_zero() {
    let err = evaluation_error("3/0");
    assert_eq!(*err.kind(), ErrorKind::DivisionByZero);
    assert_eq!(err.range(), Some(1..2));

    let err = evaluation_error("5+2/(3-3)");
    assert_eq!(*err.kind(), ErrorKind::DivisionByZero);
    assert_eq!(err.range(), Some(3..4));
    assert_eq!(err.to_string(), "1:4: Division by zero");

    // The first failing operation is reported.
    let err = evaluation_error("1/0/0");
    assert_eq!(err.range(), Some(1..2));
    let err = evaluation_error("sin(1/0)");
    assert_eq!(err.range(), Some(5..6));
}

#[test]
fn domain_errors() {
    let err = evaluation_error("sqrt(-4)");
    assert_matches!(err.kind(), ErrorKind::Domain { function: "sqrt", .. });
    assert_eq!(err.range(), Some(0..4));

    let err = evaluation_error("1+pow(-2,1/2)");
    assert_matches!(err.kind(), ErrorKind::Domain { function: "pow", .. });
    assert_eq!(err.range(), Some(2..5));
}

#[test]
fn unknown_function() {
    let err = evaluation_error("foo(1)");
    assert_matches!(err.kind(), ErrorKind::UnknownFunction(name) if name == "foo");
    assert_eq!(err.range(), Some(0..3));

    // Args of an unknown function are not evaluated.
    let err = evaluation_error("2*foo(1/0)");
    assert_matches!(err.kind(), ErrorKind::UnknownFunction(_));
    assert_eq!(err.range(), Some(2..5));
}

#[test]
fn args_len_mismatch() {
    let err = evaluation_error("pow(1)");
    assert_matches!(
        err.kind(),
        ErrorKind::ArgsLenMismatch { function: "pow", def: 2, call: 1 }
    );
    assert_eq!(err.range(), Some(0..3));

    let err = evaluation_error("sin(1,2)");
    assert_matches!(err.kind(), ErrorKind::ArgsLenMismatch { def: 1, call: 2, .. });

    // The number of args is checked before their evaluation.
    let err = evaluation_error("vlength(1/0)");
    assert_matches!(err.kind(), ErrorKind::ArgsLenMismatch { def: 4, call: 1, .. });
    assert_eq!(err.range(), Some(0..7));
}

#[test]
fn args_are_evaluated_left_to_right() {
    let err = evaluation_error("pow(sqrt(-1),1/0)");
    assert_matches!(err.kind(), ErrorKind::Domain { function: "sqrt", .. });
    assert_eq!(err.range(), Some(4..8));
}

#[test]
fn evaluating_subtrees() {
    init_logging();
    let tree = Strategy::Recursive.parse("2*(3+4)").unwrap();
    let group = tree.child(0).unwrap();
    assert_eq!(evaluate(group).unwrap(), 14.0);
    let factor = group.child(1).unwrap().child(1).unwrap().child(0).unwrap();
    assert_eq!(evaluate(factor).unwrap(), 7.0);
}

#[test]
fn malformed_trees_are_rejected() {
    use mathexpr_parser::{
        grammar::{Nonterminal, Symbol, Terminal},
        Node, Spanned,
    };

    let mut tree = Node::new(Nonterminal::Factor);
    let lexeme = Spanned::from_str("+", 0..1).copy_with_extra('+');
    tree.push_child(Node::terminal(Terminal::Plus, lexeme));
    let err = evaluate(&tree).unwrap_err();
    assert_eq!(
        *err.kind(),
        ErrorKind::MalformedTree {
            symbol: Symbol::from(Terminal::Plus)
        }
    );
    assert_eq!(err.range(), Some(0..1));

    let tree = Node::new(Nonterminal::ETail);
    let err = evaluate(&tree).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::MalformedTree { .. });
    assert_eq!(err.range(), None);
}
