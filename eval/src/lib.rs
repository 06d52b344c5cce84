//! Evaluator for parse trees produced by [`mathexpr-parser`].
//!
//! # How it works
//!
//! 1. An expression is parsed into a [`Tree`](mathexpr_parser::Tree) by either of the parsers
//!   from `mathexpr-parser`. Both parsers produce identical trees.
//! 2. The tree is walked by [`evaluate()`], which computes the value of the expression
//!   as a 64-bit floating-point number.
//!
//! # Semantics
//!
//! - Literals are non-negative integers; all arithmetic is performed on `f64` values.
//!   Thus, `1/2` evaluates to `0.5`.
//! - `*` and `/` take precedence over `+` and `-`. All binary operations are left-associative,
//!   even though the grammar is right-recursive: `2-3-4` evaluates to `-5`, and `8/4/2` to `1`.
//! - Unary minus may be repeated: `--5` evaluates to `5`.
//! - Division by zero is an error rather than an infinite value.
//! - Functions are taken from the process-wide [`FunctionLibrary`]. Each function has
//!   a fixed arity; calling a function with another number of args is an error, as is calling
//!   an unknown function. Function args are only evaluated after the function is resolved
//!   and the number of args checked.
//! - The first error aborts evaluation; no partial result is produced.
//!
//! # Examples
//!
//! ```
//! use mathexpr_eval::{evaluate, ErrorKind};
//! use mathexpr_parser::Strategy;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! const EXPR: &str = "sqrt(pow(3,2)+pow(4,2))*cos(arctan(4/3))";
//! for strategy in Strategy::ALL {
//!     let tree = strategy.parse(EXPR)?;
//!     let value = evaluate(&tree)?;
//!     assert!((value - 3.0).abs() < 1e-9);
//! }
//!
//! let tree = Strategy::Table.parse("1+2/(3-3)")?;
//! let err = evaluate(&tree).unwrap_err();
//! assert_eq!(*err.kind(), ErrorKind::DivisionByZero);
//! // The error points at the division operator.
//! assert_eq!(err.range(), Some(3..4));
//! # Ok(())
//! # }
//! ```
//!
//! [`mathexpr-parser`]: https://docs.rs/mathexpr-parser

#![doc(html_root_url = "https://docs.rs/mathexpr-eval/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub use self::{
    error::{Error, ErrorKind},
    evaluator::evaluate,
    fns::{Function, FunctionLibrary},
};

pub mod error;
mod evaluator;
pub mod fns;
