//! Grammar symbols shared by both parsers and the evaluator.
//!
//! The grammar is LL(1) and right-recursive:
//!
//! ```text
//! <expression> -> <group> <etail>
//! <etail>      -> + <expression> | - <expression> | ε
//! <group>      -> <factor> <gtail>
//! <gtail>      -> * <group> | / <group> | ε
//! <factor>     -> <number> | - <factor> | ( <expression> ) | <function>
//! <number>     -> <digit> <ntail>
//! <ntail>      -> <number> | ε
//! <digit>      -> [0-9]
//! <string>     -> <char> <stail>
//! <stail>      -> <string> | ε
//! <char>       -> [a-z]
//! <function>   -> <string> <paramlist>
//! <paramlist>  -> ( <expression> <ptail> )
//! <ptail>      -> , <expression> <ptail> | ε
//! ```

use core::fmt;

mod productions;

pub use self::productions::{LookaheadClass, Production, ProductionTable};

/// Nonterminal grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    /// `<expression>`: a sum or difference of groups.
    Expression,
    /// `<etail>`: trailing `+` / `-` operation of an expression.
    ETail,
    /// `<group>`: a product or quotient of factors.
    Group,
    /// `<gtail>`: trailing `*` / `/` operation of a group.
    GTail,
    /// `<factor>`: number, negation, parenthesized expression or function call.
    Factor,
    /// `<number>`: non-empty sequence of digits.
    Number,
    /// `<ntail>`: remaining digits of a number.
    NTail,
    /// `<digit>`: single decimal digit.
    Digit,
    /// `<char>`: single lowercase ASCII letter.
    Char,
    /// `<string>`: non-empty sequence of letters (a function name).
    String,
    /// `<stail>`: remaining letters of a string.
    STail,
    /// `<function>`: function call, e.g. `pow(2,3)`.
    Function,
    /// `<paramlist>`: parenthesized, comma-separated function arguments.
    ParamList,
    /// `<ptail>`: remaining arguments of a parameter list.
    PTail,
}

impl Nonterminal {
    /// Number of nonterminals in the grammar.
    pub const COUNT: usize = 14;

    /// All nonterminals in the declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Expression,
        Self::ETail,
        Self::Group,
        Self::GTail,
        Self::Factor,
        Self::Number,
        Self::NTail,
        Self::Digit,
        Self::Char,
        Self::String,
        Self::STail,
        Self::Function,
        Self::ParamList,
        Self::PTail,
    ];

    /// Returns the name of this nonterminal without angle brackets.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::ETail => "etail",
            Self::Group => "group",
            Self::GTail => "gtail",
            Self::Factor => "factor",
            Self::Number => "number",
            Self::NTail => "ntail",
            Self::Digit => "digit",
            Self::Char => "char",
            Self::String => "string",
            Self::STail => "stail",
            Self::Function => "function",
            Self::ParamList => "paramlist",
            Self::PTail => "ptail",
        }
    }

    /// Checks whether this nonterminal has an empty production.
    pub const fn is_nullable(self) -> bool {
        matches!(
            self,
            Self::ETail | Self::GTail | Self::NTail | Self::STail | Self::PTail
        )
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<{}>", self.name())
    }
}

/// Terminal grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// `+`
    Plus,
    /// `-`, both binary and unary.
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// Any decimal digit.
    Digit,
    /// Any lowercase ASCII letter.
    Letter,
    /// Synthetic terminal of empty productions. It matches without consuming input.
    Empty,
}

impl Terminal {
    /// Checks whether `ch` matches this terminal. [`Self::Empty`] matches no char.
    pub fn matches(self, ch: char) -> bool {
        match self {
            Self::Plus => ch == '+',
            Self::Minus => ch == '-',
            Self::Star => ch == '*',
            Self::Slash => ch == '/',
            Self::LeftParen => ch == '(',
            Self::RightParen => ch == ')',
            Self::Comma => ch == ',',
            Self::Digit => ch.is_ascii_digit(),
            Self::Letter => ch.is_ascii_lowercase(),
            Self::Empty => false,
        }
    }

    /// Returns the literal char for single-char terminals, or `None` for char classes
    /// and [`Self::Empty`].
    pub const fn literal(self) -> Option<char> {
        Some(match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Star => '*',
            Self::Slash => '/',
            Self::LeftParen => '(',
            Self::RightParen => ')',
            Self::Comma => ',',
            Self::Digit | Self::Letter | Self::Empty => return None,
        })
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit => formatter.write_str("[0-9]"),
            Self::Letter => formatter.write_str("[a-z]"),
            Self::Empty => formatter.write_str("ε"),
            _ => {
                let ch = self.literal().unwrap_or_default();
                write!(formatter, "{ch}")
            }
        }
    }
}

/// Grammar symbol: either a nonterminal or a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Nonterminal symbol.
    Nonterminal(Nonterminal),
    /// Terminal symbol.
    Terminal(Terminal),
}

impl Symbol {
    /// Returns the nonterminal if this symbol is one.
    pub fn as_nonterminal(self) -> Option<Nonterminal> {
        match self {
            Self::Nonterminal(nonterminal) => Some(nonterminal),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the terminal if this symbol is one.
    pub fn as_terminal(self) -> Option<Terminal> {
        match self {
            Self::Terminal(terminal) => Some(terminal),
            Self::Nonterminal(_) => None,
        }
    }

    /// Checks whether this is the synthetic empty terminal.
    pub fn is_empty(self) -> bool {
        self == Self::Terminal(Terminal::Empty)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(value: Nonterminal) -> Self {
        Self::Nonterminal(value)
    }
}

impl From<Terminal> for Symbol {
    fn from(value: Terminal) -> Self {
        Self::Terminal(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonterminal(nonterminal) => fmt::Display::fmt(nonterminal, formatter),
            Self::Terminal(terminal) => fmt::Display::fmt(terminal, formatter),
        }
    }
}
