//! Error handling.

use nom::{
    error::{ErrorKind as NomErrorKind, ParseError},
    Slice,
};

use core::fmt;

use crate::{grammar::Nonterminal, spans::first_char, InputSpan, Spanned};

/// Parsing error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input is not in ASCII.
    NonAsciiInput,

    /// No rule was expecting this character.
    UnexpectedChar {
        /// Nonterminal being derived when the error occurred.
        context: Option<Nonterminal>,
    },

    /// Unexpected end of input.
    UnexpectedTerm {
        /// Nonterminal being derived when the error occurred.
        context: Option<Nonterminal>,
    },

    /// Leftover symbols after a complete expression was parsed.
    Leftovers,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonAsciiInput => formatter.write_str("Non-ASCII inputs are not supported"),
            Self::UnexpectedChar { context: Some(ctx) } => {
                write!(formatter, "Unexpected character in {ctx}")
            }
            Self::UnexpectedChar { .. } => formatter.write_str("Unexpected character"),
            Self::UnexpectedTerm { context: Some(ctx) } => write!(formatter, "Unfinished {ctx}"),
            Self::UnexpectedTerm { .. } => formatter.write_str("Unfinished expression"),
            Self::Leftovers => formatter.write_str("Uninterpreted characters after parsing"),
        }
    }
}

impl ErrorKind {
    /// Returns the nonterminal being derived when the error occurred, if known.
    pub fn context(&self) -> Option<Nonterminal> {
        match self {
            Self::UnexpectedChar { context } | Self::UnexpectedTerm { context } => *context,
            _ => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut Option<Nonterminal>> {
        match self {
            Self::UnexpectedChar { context } | Self::UnexpectedTerm { context } => Some(context),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

/// Parsing error with the associated code span.
///
/// The span covers the offending char, or is empty if the input ended unexpectedly.
#[derive(Debug, Clone, Copy)]
pub struct Error<'a> {
    inner: Spanned<'a, ErrorKind>,
}

impl<'a> Error<'a> {
    pub(crate) fn new(span: InputSpan<'a>, kind: ErrorKind) -> Self {
        Self {
            inner: Spanned::new(span, kind),
        }
    }

    /// Creates an error for the next char of `input` being rejected while deriving `context`.
    pub(crate) fn unexpected(input: InputSpan<'a>, context: Nonterminal) -> Self {
        let context = Some(context);
        let kind = if input.fragment().is_empty() {
            ErrorKind::UnexpectedTerm { context }
        } else {
            ErrorKind::UnexpectedChar { context }
        };
        Self::new(first_char(input), kind)
    }

    /// Sets the error context unless it is already set by a more specific rule.
    pub(crate) fn with_context(mut self, context: Nonterminal) -> Self {
        if let Some(slot) = self.inner.extra.context_mut() {
            slot.get_or_insert(context);
        }
        self
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.extra
    }

    /// Returns the span of this error.
    pub fn span(&self) -> Spanned<'a> {
        self.inner.with_no_extra()
    }

    /// Returns the char the error points to, or `None` if the input ended unexpectedly.
    pub fn offending_char(&self) -> Option<char> {
        self.inner.fragment().chars().next()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}:{}: {}",
            self.inner.location_line(),
            self.inner.get_column(),
            self.inner.extra
        )?;
        if let Some(ch) = self.offending_char() {
            write!(formatter, " (found {ch:?})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner.extra)
    }
}

impl<'a> ParseError<InputSpan<'a>> for Error<'a> {
    fn from_error_kind(input: InputSpan<'a>, _kind: NomErrorKind) -> Self {
        let kind = if input.fragment().is_empty() {
            ErrorKind::UnexpectedTerm { context: None }
        } else {
            ErrorKind::UnexpectedChar { context: None }
        };
        // Truncate the error span to the first ineligible char.
        Self::new(first_char(input), kind)
    }

    fn append(_: InputSpan<'a>, _: NomErrorKind, other: Self) -> Self {
        other
    }
}

/// Creates an error pointing at the first char left over after a successful parse.
pub(crate) fn leftovers(input: InputSpan<'_>) -> Error<'_> {
    Error::new(input.slice(..1), ErrorKind::Leftovers)
}
