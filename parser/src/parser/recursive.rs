//! Recursive-descent parser. Each nonterminal is parsed by a dedicated function that selects
//! the alternative by the lookahead char. Nullable nonterminals return `None` for their empty
//! derivation, so that no node is created for it.

use log::trace;
use nom::{character::complete::satisfy, Err as NomErr};

use crate::{
    grammar::{Nonterminal as N, Terminal as T},
    spans::{lookahead, with_span},
    Error, InputSpan, Node, NomResult,
};

type RuleResult<'a> = NomResult<'a, Node<'a>>;
type TailResult<'a> = NomResult<'a, Option<Node<'a>>>;

fn enter(nonterminal: N, input: InputSpan<'_>) {
    trace!(
        "entering {nonterminal} at {}:{} (lookahead: {:?})",
        input.location_line(),
        input.get_column(),
        lookahead(input)
    );
}

fn starts_with(input: InputSpan<'_>, terminal: T) -> bool {
    lookahead(input).map_or(false, |ch| terminal.matches(ch))
}

/// Matches a single terminal in the `context` of the specified nonterminal.
fn terminal<'a>(terminal: T, context: N) -> impl Fn(InputSpan<'a>) -> RuleResult<'a> {
    let matcher = with_span(satisfy(move |ch| terminal.matches(ch)));
    move |input| {
        let (rest, lexeme) =
            matcher(input).map_err(|err| err.map(|err| err.with_context(context)))?;
        Ok((rest, Node::terminal(terminal, lexeme)))
    }
}

/// `<expression> -> <group> <etail>`
pub(super) fn expression(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::Expression, input);
    let (input, group) = group(input)?;
    let (input, etail) = op_tail(input, N::ETail, [T::Plus, T::Minus], expression)?;

    let mut node = Node::new(N::Expression);
    node.push_child(group);
    node.push_optional_child(etail);
    Ok((input, node))
}

/// `<group> -> <factor> <gtail>`
fn group(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::Group, input);
    let (input, factor) = factor(input)?;
    let (input, gtail) = op_tail(input, N::GTail, [T::Star, T::Slash], group)?;

    let mut node = Node::new(N::Group);
    node.push_child(factor);
    node.push_optional_child(gtail);
    Ok((input, node))
}

/// `<etail>` and `<gtail>`: an operator followed by the right-hand operand, or ε.
fn op_tail<'a>(
    input: InputSpan<'a>,
    tail: N,
    ops: [T; 2],
    operand: fn(InputSpan<'a>) -> RuleResult<'a>,
) -> TailResult<'a> {
    enter(tail, input);
    let Some(op) = ops.into_iter().find(|&op| starts_with(input, op)) else {
        return Ok((input, None));
    };
    let (input, op) = terminal(op, tail)(input)?;
    let (input, operand) = operand(input)?;

    let mut node = Node::new(tail);
    node.push_child(op);
    node.push_child(operand);
    Ok((input, Some(node)))
}

/// `<factor> -> <number> | - <factor> | ( <expression> ) | <function>`
fn factor(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::Factor, input);
    let mut node = Node::new(N::Factor);

    let rest = if starts_with(input, T::Digit) {
        let (rest, number) = number(input)?;
        node.push_child(number);
        rest
    } else if starts_with(input, T::Minus) {
        let (rest, minus) = terminal(T::Minus, N::Factor)(input)?;
        let (rest, operand) = factor(rest)?;
        node.push_child(minus);
        node.push_child(operand);
        rest
    } else if starts_with(input, T::LeftParen) {
        let (rest, open) = terminal(T::LeftParen, N::Factor)(input)?;
        let (rest, inner) = expression(rest)?;
        let (rest, close) = terminal(T::RightParen, N::Factor)(rest)?;
        node.push_child(open);
        node.push_child(inner);
        node.push_child(close);
        rest
    } else if starts_with(input, T::Letter) {
        let (rest, function) = function(input)?;
        node.push_child(function);
        rest
    } else {
        return Err(NomErr::Error(Error::unexpected(input, N::Factor)));
    };
    Ok((rest, node))
}

/// `<number> -> <digit> <ntail>`
fn number(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::Number, input);
    let (input, digit) = single_char(input, N::Digit, T::Digit)?;
    let (input, ntail) = if starts_with(input, T::Digit) {
        let (rest, number) = number(input)?;
        let mut ntail = Node::new(N::NTail);
        ntail.push_child(number);
        (rest, Some(ntail))
    } else {
        (input, None)
    };

    let mut node = Node::new(N::Number);
    node.push_child(digit);
    node.push_optional_child(ntail);
    Ok((input, node))
}

/// `<digit> -> [0-9]` and `<char> -> [a-z]`
fn single_char(input: InputSpan<'_>, nonterminal: N, class: T) -> RuleResult<'_> {
    enter(nonterminal, input);
    let (input, ch) = terminal(class, nonterminal)(input)?;
    let mut node = Node::new(nonterminal);
    node.push_child(ch);
    Ok((input, node))
}

/// `<string> -> <char> <stail>`
fn string(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::String, input);
    let (input, ch) = single_char(input, N::Char, T::Letter)?;
    let (input, stail) = if starts_with(input, T::Letter) {
        let (rest, string) = string(input)?;
        let mut stail = Node::new(N::STail);
        stail.push_child(string);
        (rest, Some(stail))
    } else {
        (input, None)
    };

    let mut node = Node::new(N::String);
    node.push_child(ch);
    node.push_optional_child(stail);
    Ok((input, node))
}

/// `<function> -> <string> <paramlist>`
fn function(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::Function, input);
    let (input, name) = string(input)?;
    let (input, params) = param_list(input)?;

    let mut node = Node::new(N::Function);
    node.push_child(name);
    node.push_child(params);
    Ok((input, node))
}

/// `<paramlist> -> ( <expression> <ptail> )`
fn param_list(input: InputSpan<'_>) -> RuleResult<'_> {
    enter(N::ParamList, input);
    let (input, open) = terminal(T::LeftParen, N::ParamList)(input)?;
    let (input, first_arg) = expression(input)?;
    let (input, ptail) = param_tail(input)?;
    let (input, close) = terminal(T::RightParen, N::ParamList)(input)?;

    let mut node = Node::new(N::ParamList);
    node.push_child(open);
    node.push_child(first_arg);
    node.push_optional_child(ptail);
    node.push_child(close);
    Ok((input, node))
}

/// `<ptail> -> , <expression> <ptail> | ε`
fn param_tail(input: InputSpan<'_>) -> TailResult<'_> {
    enter(N::PTail, input);
    if !starts_with(input, T::Comma) {
        return Ok((input, None));
    }
    let (input, comma) = terminal(T::Comma, N::PTail)(input)?;
    let (input, arg) = expression(input)?;
    let (input, ptail) = param_tail(input)?;

    let mut node = Node::new(N::PTail);
    node.push_child(comma);
    node.push_child(arg);
    node.push_optional_child(ptail);
    Ok((input, Some(node)))
}
