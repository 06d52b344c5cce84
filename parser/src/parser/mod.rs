//! Parsers for the expression grammar.

use log::debug;
use nom::{Err as NomErr, Slice};

use core::{fmt, str::FromStr};

mod recursive;
mod table;
#[cfg(test)]
mod tests;

use crate::{error::leftovers, Error, ErrorKind, InputSpan, NomResult, Tree};

/// Parsing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Recursive-descent parser with one function per nonterminal.
    #[default]
    Recursive,
    /// Table-driven LL(1) parser with an explicit control stack.
    Table,
}

impl Strategy {
    /// All available strategies.
    pub const ALL: [Self; 2] = [Self::Recursive, Self::Table];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Recursive => "recursive",
            Self::Table => "table",
        }
    }

    /// Parses `text` into a tree using this strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a sentence of the grammar.
    pub fn parse(self, text: &str) -> Result<Tree<'_>, Error<'_>> {
        match self {
            Self::Recursive => parse_recursive(text),
            Self::Table => parse_table(text),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error parsing a [`Strategy`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseStrategyError;

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("unknown parsing strategy; expected `recursive` or `table`")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" | "r" => Ok(Self::Recursive),
            "table" | "t" => Ok(Self::Table),
            _ => Err(ParseStrategyError),
        }
    }
}

/// Parses `text` with the recursive-descent parser.
pub fn parse_recursive(text: &str) -> Result<Tree<'_>, Error<'_>> {
    let input = ascii_input(text)?;
    finish(Strategy::Recursive, input, recursive::expression(input))
}

/// Parses `text` with the table-driven parser.
pub fn parse_table(text: &str) -> Result<Tree<'_>, Error<'_>> {
    let input = ascii_input(text)?;
    finish(Strategy::Table, input, table::expression(input))
}

fn ascii_input(text: &str) -> Result<InputSpan<'_>, Error<'_>> {
    let input = InputSpan::new(text);
    match text.char_indices().find(|(_, ch)| !ch.is_ascii()) {
        Some((pos, ch)) => {
            let span = input.slice(pos..pos + ch.len_utf8());
            Err(Error::new(span, ErrorKind::NonAsciiInput))
        }
        None => Ok(input),
    }
}

fn finish<'a>(
    strategy: Strategy,
    input: InputSpan<'a>,
    result: NomResult<'a, Tree<'a>>,
) -> Result<Tree<'a>, Error<'a>> {
    let result = result
        .map_err(|err| match err {
            NomErr::Error(err) | NomErr::Failure(err) => err,
            // Both parsers operate on complete input.
            NomErr::Incomplete(_) => {
                let end = input.slice(input.fragment().len()..);
                Error::new(end, ErrorKind::UnexpectedTerm { context: None })
            }
        })
        .and_then(|(rest, tree)| {
            if rest.fragment().is_empty() {
                Ok(tree)
            } else {
                Err(leftovers(rest))
            }
        });

    match &result {
        Ok(tree) => debug!("{strategy} parser accepted input: {} nodes", tree.node_count()),
        Err(err) => debug!("{strategy} parser rejected input: {err}"),
    }
    result
}
