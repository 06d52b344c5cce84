//! Tree-walking evaluator.
//!
//! The grammar is right-recursive, so a parse tree nests trailing operations to the right:
//! `2-3-4` is parsed as `2 (- (3 (- 4)))`. To evaluate operations left-to-right,
//! the evaluator does not recurse into `<etail>` / `<gtail>` chains; instead, it walks each chain
//! iteratively, applying operations to an accumulated value.

use log::debug;

use mathexpr_parser::{
    grammar::{Nonterminal as N, Symbol, Terminal as T},
    Node, Tree,
};

use crate::{
    error::{Error, ErrorKind},
    fns::FunctionLibrary,
};

type EvalResult<'a> = Result<f64, Error<'a>>;

/// Evaluates a parse tree produced by one of the parsers in `mathexpr_parser`.
///
/// The tree can be rooted at any `<expression>`, `<group>`, `<factor>`, `<number>`
/// or `<function>` node.
///
/// # Errors
///
/// Returns an error on division by zero, on calls of unknown functions or with a wrong number
/// of args, and if function args are outside the function domain. Errors are also returned
/// for manually built trees not conforming to the parse tree shape.
///
/// # Examples
///
/// ```
/// use mathexpr_eval::{evaluate, ErrorKind};
/// use mathexpr_parser::parse_recursive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = parse_recursive("8/4/2-pow(2,3)")?;
/// assert_eq!(evaluate(&tree)?, -7.0);
///
/// let tree = parse_recursive("sqrt(-4)")?;
/// let err = evaluate(&tree).unwrap_err();
/// assert!(matches!(err.kind(), ErrorKind::Domain { function: "sqrt", .. }));
/// assert_eq!(err.range(), Some(0..4));
/// # Ok(())
/// # }
/// ```
pub fn evaluate<'a>(tree: &Tree<'a>) -> EvalResult<'a> {
    let evaluator = Evaluator {
        library: FunctionLibrary::get(),
    };
    let result = evaluator.evaluate_node(tree);
    if let Err(err) = &result {
        debug!("evaluation failed: {err}");
    }
    result
}

fn malformed<'a>(node: &Node<'a>) -> Error<'a> {
    let err = Error::new(ErrorKind::MalformedTree {
        symbol: node.symbol(),
    });
    match node.lexeme() {
        Some(lexeme) => err.with_location(lexeme, 1),
        None => err,
    }
}

fn child<'r, 'a>(node: &'r Node<'a>, index: usize) -> Result<&'r Node<'a>, Error<'a>> {
    node.child(index).ok_or_else(|| malformed(node))
}

/// Returns the `index`th child of `node` checking that it has the `expected` symbol.
fn typed_child<'r, 'a>(
    node: &'r Node<'a>,
    index: usize,
    expected: impl Into<Symbol>,
) -> Result<&'r Node<'a>, Error<'a>> {
    let child = child(node, index)?;
    if child.symbol() == expected.into() {
        Ok(child)
    } else {
        Err(malformed(child))
    }
}

/// Same as `typed_child()`, but allows the child to be absent.
fn optional_child<'r, 'a>(
    node: &'r Node<'a>,
    index: usize,
    expected: N,
) -> Result<Option<&'r Node<'a>>, Error<'a>> {
    match node.child(index) {
        Some(child) if child.nonterminal() == Some(expected) => Ok(Some(child)),
        Some(child) => Err(malformed(child)),
        None => Ok(None),
    }
}

#[derive(Debug)]
struct Evaluator {
    library: &'static FunctionLibrary,
}

impl Evaluator {
    fn evaluate_node<'a>(&self, node: &Node<'a>) -> EvalResult<'a> {
        match node.nonterminal() {
            Some(N::Expression) => self.evaluate_chain(node, N::ETail),
            Some(N::Group) => self.evaluate_chain(node, N::GTail),
            Some(N::Factor) => self.evaluate_factor(node),
            Some(N::Number) => Self::evaluate_number(node),
            Some(N::Function) => self.evaluate_function(node),
            _ => Err(malformed(node)),
        }
    }

    /// Evaluates `<expression>` or `<group>` by folding its tail chain left-to-right.
    fn evaluate_chain<'a>(&self, node: &Node<'a>, tail_symbol: N) -> EvalResult<'a> {
        let operand_symbol = if tail_symbol == N::ETail {
            N::Group
        } else {
            N::Factor
        };
        let chain_symbol = node.symbol();

        let mut acc = self.evaluate_node(typed_child(node, 0, operand_symbol)?)?;
        let mut tail = optional_child(node, 1, tail_symbol)?;
        while let Some(tail_node) = tail {
            let op = child(tail_node, 0)?;
            let rhs = typed_child(tail_node, 1, chain_symbol)?;
            let operand = self.evaluate_node(typed_child(rhs, 0, operand_symbol)?)?;

            acc = match op.symbol() {
                Symbol::Terminal(T::Plus) => acc + operand,
                Symbol::Terminal(T::Minus) => acc - operand,
                Symbol::Terminal(T::Star) => acc * operand,
                Symbol::Terminal(T::Slash) if operand == 0.0 => {
                    let err = Error::new(ErrorKind::DivisionByZero);
                    return Err(match op.lexeme() {
                        Some(lexeme) => err.with_location(lexeme, 1),
                        None => err,
                    });
                }
                Symbol::Terminal(T::Slash) => acc / operand,
                _ => return Err(malformed(op)),
            };
            tail = optional_child(rhs, 1, tail_symbol)?;
        }
        Ok(acc)
    }

    fn evaluate_factor<'a>(&self, mut node: &Node<'a>) -> EvalResult<'a> {
        let mut negate = false;
        loop {
            let first_child = child(node, 0)?;
            let value = match first_child.symbol() {
                Symbol::Terminal(T::Minus) => {
                    negate = !negate;
                    node = typed_child(node, 1, N::Factor)?;
                    continue;
                }
                Symbol::Terminal(T::LeftParen) => {
                    self.evaluate_node(typed_child(node, 1, N::Expression)?)?
                }
                Symbol::Nonterminal(N::Number) => Self::evaluate_number(first_child)?,
                Symbol::Nonterminal(N::Function) => self.evaluate_function(first_child)?,
                _ => return Err(malformed(first_child)),
            };
            return Ok(if negate { -value } else { value });
        }
    }

    /// Folds the digit chain of a `<number>` into a base-10 value.
    fn evaluate_number<'a>(node: &Node<'a>) -> EvalResult<'a> {
        let mut value = 0.0;
        let mut number = Some(node);
        while let Some(current) = number {
            let digit = typed_child(current, 0, N::Digit)?;
            let digit = typed_child(digit, 0, T::Digit)?;
            let digit_value = digit
                .lexeme()
                .and_then(|lexeme| lexeme.extra.to_digit(10))
                .ok_or_else(|| malformed(digit))?;
            value = value * 10.0 + f64::from(digit_value);

            number = match optional_child(current, 1, N::NTail)? {
                Some(ntail) => Some(typed_child(ntail, 0, N::Number)?),
                None => None,
            };
        }
        Ok(value)
    }

    fn evaluate_function<'a>(&self, node: &Node<'a>) -> EvalResult<'a> {
        let name_node = typed_child(node, 0, N::String)?;
        let params = typed_child(node, 1, N::ParamList)?;

        let mut name = String::new();
        let mut name_start = None;
        let mut string = Some(name_node);
        while let Some(current) = string {
            let ch = typed_child(current, 0, N::Char)?;
            let letter = typed_child(ch, 0, T::Letter)?;
            let lexeme = letter.lexeme().ok_or_else(|| malformed(letter))?;
            name_start.get_or_insert(*lexeme);
            name.push(lexeme.extra);

            string = match optional_child(current, 1, N::STail)? {
                Some(stail) => Some(typed_child(stail, 0, N::String)?),
                None => None,
            };
        }
        let locate = |err: Error<'a>| match &name_start {
            Some(start) => err.with_location(start, name.len()),
            None => err,
        };

        let Some(function) = self.library.function(&name) else {
            return Err(locate(ErrorKind::UnknownFunction(name.clone()).into()));
        };
        let args = Self::collect_args(params)?;
        if args.len() != function.arity() {
            let err = ErrorKind::ArgsLenMismatch {
                function: function.name(),
                def: function.arity(),
                call: args.len(),
            };
            return Err(locate(err.into()));
        }

        let arg_values = args
            .into_iter()
            .map(|arg| self.evaluate_node(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.library
            .apply(function.name(), &arg_values)
            .map_err(|err| locate(err.into()))
    }

    /// Collects argument expressions from a `<paramlist>` and its `<ptail>` chain.
    fn collect_args<'r, 'a>(params: &'r Node<'a>) -> Result<Vec<&'r Node<'a>>, Error<'a>> {
        typed_child(params, 0, T::LeftParen)?;
        let mut args = vec![typed_child(params, 1, N::Expression)?];
        let mut tail = params
            .child(2)
            .filter(|child| child.nonterminal() == Some(N::PTail));
        let closing_index = if tail.is_some() { 3 } else { 2 };
        typed_child(params, closing_index, T::RightParen)?;

        while let Some(tail_node) = tail {
            typed_child(tail_node, 0, T::Comma)?;
            args.push(typed_child(tail_node, 1, N::Expression)?);
            tail = optional_child(tail_node, 2, N::PTail)?;
        }
        Ok(args)
    }
}
