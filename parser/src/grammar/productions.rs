//! Productions of the grammar and the LL(1) production table.

use core::fmt;

use super::{Nonterminal as N, Symbol, Terminal as T};

/// Single production of the grammar. Productions are numbered by tens per nonterminal;
/// the units digit distinguishes alternatives of the same nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// `0`: `<expression> -> <group> <etail>`
    Expression,
    /// `10`: `<etail> -> + <expression>`
    ETailAdd,
    /// `11`: `<etail> -> ε`
    ETailEmpty,
    /// `12`: `<etail> -> - <expression>`
    ETailSub,
    /// `20`: `<group> -> <factor> <gtail>`
    Group,
    /// `30`: `<gtail> -> * <group>`
    GTailMul,
    /// `31`: `<gtail> -> ε`
    GTailEmpty,
    /// `32`: `<gtail> -> / <group>`
    GTailDiv,
    /// `40`: `<factor> -> <number>`
    FactorNumber,
    /// `41`: `<factor> -> - <factor>`
    FactorNeg,
    /// `42`: `<factor> -> ( <expression> )`
    FactorParens,
    /// `43`: `<factor> -> <function>`
    FactorFunction,
    /// `50`: `<number> -> <digit> <ntail>`
    Number,
    /// `60`: `<ntail> -> <number>`
    NTailNumber,
    /// `61`: `<ntail> -> ε`
    NTailEmpty,
    /// `70`: `<digit> -> [0-9]`
    Digit,
    /// `80`: `<string> -> <char> <stail>`
    String,
    /// `90`: `<stail> -> <string>`
    STailString,
    /// `91`: `<stail> -> ε`
    STailEmpty,
    /// `100`: `<char> -> [a-z]`
    Char,
    /// `110`: `<function> -> <string> <paramlist>`
    Function,
    /// `120`: `<paramlist> -> ( <expression> <ptail> )`
    ParamList,
    /// `130`: `<ptail> -> , <expression> <ptail>`
    PTailNext,
    /// `131`: `<ptail> -> ε`
    PTailEmpty,
}

impl Production {
    /// Returns the rule number of this production.
    pub const fn number(self) -> u32 {
        match self {
            Self::Expression => 0,
            Self::ETailAdd => 10,
            Self::ETailEmpty => 11,
            Self::ETailSub => 12,
            Self::Group => 20,
            Self::GTailMul => 30,
            Self::GTailEmpty => 31,
            Self::GTailDiv => 32,
            Self::FactorNumber => 40,
            Self::FactorNeg => 41,
            Self::FactorParens => 42,
            Self::FactorFunction => 43,
            Self::Number => 50,
            Self::NTailNumber => 60,
            Self::NTailEmpty => 61,
            Self::Digit => 70,
            Self::String => 80,
            Self::STailString => 90,
            Self::STailEmpty => 91,
            Self::Char => 100,
            Self::Function => 110,
            Self::ParamList => 120,
            Self::PTailNext => 130,
            Self::PTailEmpty => 131,
        }
    }

    /// Returns the left-hand side of this production.
    pub const fn lhs(self) -> N {
        match self {
            Self::Expression => N::Expression,
            Self::ETailAdd | Self::ETailEmpty | Self::ETailSub => N::ETail,
            Self::Group => N::Group,
            Self::GTailMul | Self::GTailEmpty | Self::GTailDiv => N::GTail,
            Self::FactorNumber | Self::FactorNeg | Self::FactorParens | Self::FactorFunction => {
                N::Factor
            }
            Self::Number => N::Number,
            Self::NTailNumber | Self::NTailEmpty => N::NTail,
            Self::Digit => N::Digit,
            Self::String => N::String,
            Self::STailString | Self::STailEmpty => N::STail,
            Self::Char => N::Char,
            Self::Function => N::Function,
            Self::ParamList => N::ParamList,
            Self::PTailNext | Self::PTailEmpty => N::PTail,
        }
    }

    /// Returns the right-hand side of this production. Empty productions have
    /// a single [`Terminal::Empty`](super::Terminal::Empty) symbol.
    pub const fn rhs(self) -> &'static [Symbol] {
        use Symbol::{Nonterminal as Nt, Terminal as Tm};

        match self {
            Self::Expression => &[Nt(N::Group), Nt(N::ETail)],
            Self::ETailAdd => &[Tm(T::Plus), Nt(N::Expression)],
            Self::ETailSub => &[Tm(T::Minus), Nt(N::Expression)],
            Self::Group => &[Nt(N::Factor), Nt(N::GTail)],
            Self::GTailMul => &[Tm(T::Star), Nt(N::Group)],
            Self::GTailDiv => &[Tm(T::Slash), Nt(N::Group)],
            Self::FactorNumber => &[Nt(N::Number)],
            Self::FactorNeg => &[Tm(T::Minus), Nt(N::Factor)],
            Self::FactorParens => &[Tm(T::LeftParen), Nt(N::Expression), Tm(T::RightParen)],
            Self::FactorFunction => &[Nt(N::Function)],
            Self::Number => &[Nt(N::Digit), Nt(N::NTail)],
            Self::NTailNumber => &[Nt(N::Number)],
            Self::Digit => &[Tm(T::Digit)],
            Self::String => &[Nt(N::Char), Nt(N::STail)],
            Self::STailString => &[Nt(N::String)],
            Self::Char => &[Tm(T::Letter)],
            Self::Function => &[Nt(N::String), Nt(N::ParamList)],
            Self::ParamList => &[
                Tm(T::LeftParen),
                Nt(N::Expression),
                Nt(N::PTail),
                Tm(T::RightParen),
            ],
            Self::PTailNext => &[Tm(T::Comma), Nt(N::Expression), Nt(N::PTail)],
            Self::ETailEmpty
            | Self::GTailEmpty
            | Self::NTailEmpty
            | Self::STailEmpty
            | Self::PTailEmpty => &[Tm(T::Empty)],
        }
    }

    /// Checks whether this is an empty production.
    pub const fn is_empty(self) -> bool {
        matches!(
            self,
            Self::ETailEmpty
                | Self::GTailEmpty
                | Self::NTailEmpty
                | Self::STailEmpty
                | Self::PTailEmpty
        )
    }
}

impl fmt::Display for Production {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:>3}: {} ->", self.number(), self.lhs())?;
        for symbol in self.rhs() {
            write!(formatter, " {symbol}")?;
        }
        Ok(())
    }
}

/// Class of the lookahead char used as the column key of the [`ProductionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookaheadClass {
    /// Decimal digit.
    Digit,
    /// Lowercase ASCII letter.
    Letter,
    /// `+`
    Plus,
    /// `-`
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
    /// Any other char; such a char is never consumed by the grammar.
    Other,
    /// End of input.
    End,
}

impl LookaheadClass {
    /// Number of lookahead classes.
    pub const COUNT: usize = 11;

    /// Classifies the lookahead char.
    pub fn of(lookahead: Option<char>) -> Self {
        match lookahead {
            None => Self::End,
            Some('+') => Self::Plus,
            Some('-') => Self::Minus,
            Some('*') => Self::Star,
            Some('/') => Self::Slash,
            Some('(') => Self::LeftParen,
            Some(')') => Self::RightParen,
            Some(',') => Self::Comma,
            Some(ch) if ch.is_ascii_digit() => Self::Digit,
            Some(ch) if ch.is_ascii_lowercase() => Self::Letter,
            Some(_) => Self::Other,
        }
    }
}

type Row = [Option<Production>; LookaheadClass::COUNT];

/// LL(1) production table mapping `(nonterminal, lookahead class)` pairs to productions.
///
/// Empty productions are selected for every lookahead outside the FIRST set of
/// the non-empty alternatives, including the end of input; a misplaced char is then
/// reported by whichever symbol has to match it next.
#[derive(Debug, Clone)]
pub struct ProductionTable {
    rows: [Row; N::COUNT],
}

static TABLE: ProductionTable = ProductionTable::new();

impl ProductionTable {
    const fn new() -> Self {
        use LookaheadClass as L;

        let mut rows: [Row; N::COUNT] = [[None; LookaheadClass::COUNT]; N::COUNT];

        rows[N::Expression as usize] = [Some(Production::Expression); LookaheadClass::COUNT];
        rows[N::ETail as usize] = [Some(Production::ETailEmpty); LookaheadClass::COUNT];
        rows[N::ETail as usize][L::Plus as usize] = Some(Production::ETailAdd);
        rows[N::ETail as usize][L::Minus as usize] = Some(Production::ETailSub);

        rows[N::Group as usize] = [Some(Production::Group); LookaheadClass::COUNT];
        rows[N::GTail as usize] = [Some(Production::GTailEmpty); LookaheadClass::COUNT];
        rows[N::GTail as usize][L::Star as usize] = Some(Production::GTailMul);
        rows[N::GTail as usize][L::Slash as usize] = Some(Production::GTailDiv);

        rows[N::Factor as usize][L::Digit as usize] = Some(Production::FactorNumber);
        rows[N::Factor as usize][L::Minus as usize] = Some(Production::FactorNeg);
        rows[N::Factor as usize][L::LeftParen as usize] = Some(Production::FactorParens);
        rows[N::Factor as usize][L::Letter as usize] = Some(Production::FactorFunction);

        rows[N::Number as usize] = [Some(Production::Number); LookaheadClass::COUNT];
        rows[N::NTail as usize] = [Some(Production::NTailEmpty); LookaheadClass::COUNT];
        rows[N::NTail as usize][L::Digit as usize] = Some(Production::NTailNumber);
        rows[N::Digit as usize][L::Digit as usize] = Some(Production::Digit);

        rows[N::String as usize] = [Some(Production::String); LookaheadClass::COUNT];
        rows[N::STail as usize] = [Some(Production::STailEmpty); LookaheadClass::COUNT];
        rows[N::STail as usize][L::Letter as usize] = Some(Production::STailString);
        rows[N::Char as usize][L::Letter as usize] = Some(Production::Char);

        rows[N::Function as usize] = [Some(Production::Function); LookaheadClass::COUNT];
        rows[N::ParamList as usize][L::LeftParen as usize] = Some(Production::ParamList);
        rows[N::PTail as usize] = [Some(Production::PTailEmpty); LookaheadClass::COUNT];
        rows[N::PTail as usize][L::Comma as usize] = Some(Production::PTailNext);

        Self { rows }
    }

    /// Returns the production table of the grammar.
    pub fn get() -> &'static Self {
        &TABLE
    }

    /// Looks up the production for `nonterminal` given the `lookahead` char.
    /// Returns `None` if the table has no entry for this pair.
    pub fn lookup(&self, nonterminal: N, lookahead: Option<char>) -> Option<Production> {
        self.rows[nonterminal as usize][LookaheadClass::of(lookahead) as usize]
    }
}
