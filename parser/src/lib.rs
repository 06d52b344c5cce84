//! Parsers for a small arithmetic expression language.
//!
//! The language supports non-negative integer literals, binary `+`, `-`, `*` and `/`,
//! unary `-`, parentheses and calls of named functions with one or more comma-separated
//! arguments (e.g., `pow(2,10)`). The input contains no whitespace.
//!
//! The crate provides two interchangeable parsers over the same LL(1) grammar
//! (see the [`grammar`] module):
//!
//! - [`parse_recursive()`]: a recursive-descent parser with one function per nonterminal.
//! - [`parse_table()`]: a table-driven parser using an explicit control [`Stack`]
//!   and the [`ProductionTable`](grammar::ProductionTable).
//!
//! Both parsers output the same [`Tree`]: a concrete parse tree in the left-child /
//! right-sibling encoding, in which empty derivations are omitted. Since the grammar is
//! right-recursive, the tree does not encode left associativity of operations; this is
//! up to the tree consumer (e.g., the evaluator in the `mathexpr-eval` crate).
//!
//! # Crate features
//!
//! - `std`. Enables support of types from `std`, such as the `Error` trait, and propagates
//!   to dependencies. Without it, the crate is `no_std` and requires only `alloc`.
//!
//! # Examples
//!
//! ```
//! use mathexpr_parser::{
//!     grammar::{Nonterminal, Symbol},
//!     ErrorKind, Strategy,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = Strategy::Table.parse("2*(3+4)")?;
//! assert_eq!(tree.symbol(), Symbol::from(Nonterminal::Expression));
//! assert_eq!(tree.prefix_text(), "2*(3+4)");
//! // Both parsers build identical trees.
//! let other_tree = Strategy::Recursive.parse("2*(3+4)")?;
//! assert_eq!(
//!     tree.display_tree().to_string(),
//!     other_tree.display_tree().to_string()
//! );
//!
//! let err = Strategy::Recursive.parse("2*(3+4").unwrap_err();
//! assert_eq!(
//!     *err.kind(),
//!     ErrorKind::UnexpectedTerm { context: Some(Nonterminal::Factor) }
//! );
//! assert_eq!(err.span().location_offset(), 6);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![doc(html_root_url = "https://docs.rs/mathexpr-parser/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

// Polyfill for `alloc` types.
mod alloc {
    #[cfg(not(feature = "std"))]
    extern crate alloc;

    #[cfg(not(feature = "std"))]
    pub use alloc::{boxed::Box, string::String, vec::Vec};
    #[cfg(all(test, not(feature = "std")))]
    pub use alloc::{format, string::ToString};
    #[cfg(feature = "std")]
    pub use std::{boxed::Box, string::String, vec::Vec};
    #[cfg(all(test, feature = "std"))]
    pub use std::{format, string::ToString};
}

pub use crate::{
    error::{Error, ErrorKind},
    parser::{parse_recursive, parse_table, ParseStrategyError, Strategy},
    spans::{InputSpan, LocatedSpan, NomResult, Spanned},
    stack::Stack,
    tree::{DisplayTree, Node, Tree},
};

mod error;
pub mod grammar;
mod parser;
mod spans;
pub mod stack;
mod tree;
