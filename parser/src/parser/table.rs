//! Table-driven LL(1) parser.
//!
//! The parser keeps grammar symbols awaiting derivation on an explicit control stack.
//! Since the arity of a node is only known once its production is selected, the tree is first
//! built from variable-arity draft nodes stored in a flat arena, and is converted
//! to the left-child / right-sibling form once parsing succeeds.

use log::trace;
use nom::{character::complete::satisfy, Err as NomErr};

use core::fmt;

use crate::{
    alloc::Vec,
    grammar::{Nonterminal, ProductionTable, Symbol, Terminal},
    spans::{lookahead, with_span},
    Error, InputSpan, Node, NomResult, Spanned, Stack, Tree,
};

const ROOT: usize = 0;

/// Variable-arity tree node referring to its children by their arena indices.
#[derive(Debug)]
struct Draft<'a> {
    symbol: Symbol,
    lexeme: Option<Spanned<'a, char>>,
    children: Vec<usize>,
}

impl Draft<'_> {
    fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            lexeme: None,
            children: Vec::new(),
        }
    }
}

/// Control stack entry.
#[derive(Debug, Clone, Copy)]
struct Frame {
    symbol: Symbol,
    /// Arena index of the draft node for `symbol`.
    node: usize,
    /// Nonterminal whose production has pushed this frame.
    parent: Option<Nonterminal>,
}

struct DisplayStack<'s>(&'s Stack<Frame>);

impl fmt::Display for DisplayStack<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (i, frame) in self.0.iter().enumerate() {
            if i > 0 {
                formatter.write_str(" ")?;
            }
            write!(formatter, "{}", frame.symbol)?;
        }
        formatter.write_str("]")
    }
}

/// Parses an `<expression>` from the start of `input`.
pub(super) fn expression(mut input: InputSpan<'_>) -> NomResult<'_, Tree<'_>> {
    let table = ProductionTable::get();
    let root = Symbol::Nonterminal(Nonterminal::Expression);
    let mut drafts = Vec::new();
    drafts.push(Draft::new(root));
    let mut stack = Stack::new();
    stack.push(Frame {
        symbol: root,
        node: ROOT,
        parent: None,
    });

    while let Some(frame) = stack.pop() {
        let next = lookahead(input);
        trace!(
            "offset {}, lookahead {next:?}: popped {}, remaining stack {}",
            input.location_offset(),
            frame.symbol,
            DisplayStack(&stack)
        );

        match frame.symbol {
            Symbol::Terminal(Terminal::Empty) => {}

            Symbol::Terminal(terminal) => {
                let (rest, lexeme) = with_span(satisfy(|ch| terminal.matches(ch)))(input)
                    .map_err(|err| {
                        err.map(|err| match frame.parent {
                            Some(parent) => err.with_context(parent),
                            None => err,
                        })
                    })?;
                drafts[frame.node].lexeme = Some(lexeme);
                input = rest;
            }

            Symbol::Nonterminal(nonterminal) => {
                let Some(production) = table.lookup(nonterminal, next) else {
                    trace!("no production for {nonterminal} with lookahead {next:?}");
                    return Err(NomErr::Error(Error::unexpected(input, nonterminal)));
                };
                trace!("applying {production}");

                let rhs = production.rhs();
                let first_child = drafts.len();
                drafts.extend(rhs.iter().copied().map(Draft::new));
                let children = first_child..drafts.len();
                drafts[frame.node].children.extend(children.clone());

                // Push in reverse so that the leftmost symbol is derived first.
                for (node, &symbol) in children.zip(rhs).rev() {
                    stack.push(Frame {
                        symbol,
                        node,
                        parent: Some(nonterminal),
                    });
                }
            }
        }
    }

    Ok((input, assemble(drafts)))
}

/// Converts draft nodes into a tree, dropping empty derivations.
///
/// Draft children always have greater arena indices than their parent, so processing drafts
/// in reverse order guarantees that children are assembled before their parent.
fn assemble(drafts: Vec<Draft<'_>>) -> Tree<'_> {
    let mut nodes: Vec<Option<Node<'_>>> = Vec::new();
    nodes.resize_with(drafts.len(), || None);
    let mut root = Node::new(Nonterminal::Expression);

    for (index, draft) in drafts.into_iter().enumerate().rev() {
        let mut node = Node::new(draft.symbol);
        if let Some(lexeme) = draft.lexeme {
            node.set_lexeme(lexeme);
        }
        for child in draft.children {
            if let Some(child) = nodes[child].take() {
                if !child.is_empty_derivation() {
                    node.push_child(child);
                }
            }
        }

        if index == ROOT {
            root = node;
        } else {
            nodes[index] = Some(node);
        }
    }
    root
}
