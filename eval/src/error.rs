//! Evaluation errors.

use core::{fmt, ops::Range};

use mathexpr_parser::{grammar::Symbol, Spanned};

use crate::fns::{Function, FunctionLibrary};

/// Kinds of errors that can occur when evaluating a parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Right-hand side of a division evaluated to zero.
    DivisionByZero,

    /// Function argument is outside the function domain.
    Domain {
        /// Name of the function.
        function: &'static str,
        /// Human-readable description of the domain restriction.
        reason: &'static str,
    },

    /// Function with the enclosed name is not defined.
    UnknownFunction(String),

    /// Mismatch between the number of arguments in the function definition and its call.
    ArgsLenMismatch {
        /// Name of the function.
        function: &'static str,
        /// Number of args at the function definition.
        def: usize,
        /// Number of args at the function call.
        call: usize,
    },

    /// Tree does not conform to the shape produced by parsers. Only possible for trees
    /// built manually.
    MalformedTree {
        /// Symbol of the offending node.
        symbol: Symbol,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => formatter.write_str("Division by zero"),
            Self::Domain { function, reason } => {
                write!(formatter, "Argument out of domain of `{function}`: {reason}")
            }
            Self::UnknownFunction(name) => write!(formatter, "Function `{name}` is not defined"),
            Self::ArgsLenMismatch {
                function,
                def,
                call,
            } => write!(
                formatter,
                "Mismatch between the number of arguments in the definition of `{function}` \
                 and its call: definition requires {def} arg(s), call has {call}"
            ),
            Self::MalformedTree { symbol } => write!(formatter, "Malformed parse tree at {symbol}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

impl ErrorKind {
    pub(crate) fn domain(function: &'static str, reason: &'static str) -> Self {
        Self::Domain { function, reason }
    }

    /// Returns a short description of the spanned input responsible for the error.
    pub fn main_span_info(&self) -> String {
        match self {
            Self::DivisionByZero => "Zero divisor".to_owned(),
            Self::Domain { .. } => "Invalid argument".to_owned(),
            Self::UnknownFunction(_) => "Undefined function".to_owned(),
            Self::ArgsLenMismatch { call, .. } => format!("Called with {call} arg(s) here"),
            Self::MalformedTree { .. } => "Unexpected node".to_owned(),
        }
    }

    /// Returns information helping fix the error.
    pub fn help(&self) -> Option<String> {
        Some(match self {
            Self::DivisionByZero => {
                "The right-hand side of `/` must evaluate to a non-zero value".to_owned()
            }
            Self::Domain { function, .. } => {
                let function = FunctionLibrary::get().function(function)?;
                format!("{function}: {}", function.summary())
            }
            Self::UnknownFunction(_) => {
                let names: Vec<_> = FunctionLibrary::get().iter().map(Function::name).collect();
                format!("Available functions are: {}", names.join(", "))
            }
            Self::ArgsLenMismatch { function, def, .. } => {
                format!("`{function}` is defined with {def} arg(s)")
            }
            Self::MalformedTree { .. } => return None,
        })
    }
}

/// Evaluation error together with the location of the input responsible for it.
#[derive(Debug, Clone)]
pub struct Error<'a> {
    kind: ErrorKind,
    span: Option<Spanned<'a>>,
    span_len: usize,
}

impl<'a> Error<'a> {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            span_len: 0,
        }
    }

    /// Attaches a location to this error. The location starts at `start` and spans `len` bytes
    /// of the input.
    pub(crate) fn with_location<T>(mut self, start: &Spanned<'a, T>, len: usize) -> Self {
        self.span = Some(start.with_no_extra());
        self.span_len = len;
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the span of the first input char responsible for the error: the division operator
    /// for [`ErrorKind::DivisionByZero`], or the first char of the function name for errors
    /// related to function calls.
    pub fn span(&self) -> Option<Spanned<'a>> {
        self.span
    }

    /// Returns the byte range of the input responsible for the error (e.g., the whole function
    /// name).
    pub fn range(&self) -> Option<Range<usize>> {
        self.span.map(|span| {
            let start = span.location_offset();
            start..start + self.span_len
        })
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(
                formatter,
                "{}:{}: ",
                span.location_line(),
                span.get_column()
            )?;
        }
        fmt::Display::fmt(&self.kind, formatter)
    }
}

impl std::error::Error for Error<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ErrorKind> for Error<'_> {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
