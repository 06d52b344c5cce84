//! Simple CLI for parsing and evaluating arithmetic expressions.

use clap::{Args as ClapArgs, Parser};
use log::info;

use std::{
    io::{self, Read},
    process,
};

use mathexpr_eval::{evaluate, FunctionLibrary};
use mathexpr_parser::{Strategy, Tree};

mod common;

use crate::common::{ColorPreference, Reporter, ERROR_EXIT_CODE, USAGE_EXIT_CODE};

const ABOUT: &str = "CLI for parsing and evaluating arithmetic expressions.";

const AFTER_HELP: &str = "\
EXIT CODES:
    0    Normal exit
    1    Invalid command-line option
    2    Parsing or evaluation error";

#[derive(Debug, Parser)]
#[command(version, about = ABOUT, after_help = AFTER_HELP)]
enum Args {
    /// Parse the input and output its parse tree.
    Tree(ExprArgs),
    /// Parse and evaluate the input.
    Eval(ExprArgs),
    /// List functions callable from expressions.
    Functions,
}

#[derive(Debug, ClapArgs)]
struct ExprArgs {
    /// Parsing strategy: `recursive` (recursive descent) or `table` (table-driven LL(1)).
    #[arg(long, short = 's', default_value_t = Strategy::Recursive)]
    strategy: Strategy,
    /// Coloring of error diagnostics.
    #[arg(long, env = "COLOR", value_enum, default_value_t = ColorPreference::Auto)]
    color: ColorPreference,
    /// Expression to process. If omitted, the expression will be read from stdin.
    expression: Option<String>,
}

impl ExprArgs {
    fn read_expression(&mut self) -> io::Result<String> {
        let expression = match self.expression.take() {
            Some(expression) => expression,
            None => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        Ok(expression.trim_end_matches(['\n', '\r']).to_owned())
    }

    /// Parses the expression, passing the tree to `action` on success.
    fn parse_and_then(
        mut self,
        action: impl FnOnce(&Tree<'_>, &Reporter<'_>) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        let expression = self.read_expression()?;
        info!("processing {expression:?} with {} parser", self.strategy);
        let reporter = Reporter::new(&expression, self.color);

        let succeeded = match self.strategy.parse(&expression) {
            Ok(tree) => action(&tree, &reporter)?,
            Err(err) => {
                reporter.report_parse_error(&err)?;
                false
            }
        };
        if !succeeded {
            process::exit(ERROR_EXIT_CODE);
        }
        Ok(())
    }
}

impl Args {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Tree(args) => args.parse_and_then(|tree, _| {
                print!("{}", tree.display_tree());
                println!("Prefix text: {}", tree.prefix_text());
                Ok(true)
            }),
            Self::Eval(args) => args.parse_and_then(|tree, reporter| match evaluate(tree) {
                Ok(value) => {
                    println!("{value}");
                    Ok(true)
                }
                Err(err) => {
                    reporter.report_eval_error(&err)?;
                    Ok(false)
                }
            }),
            Self::Functions => {
                Self::print_functions();
                Ok(())
            }
        }
    }

    fn print_functions() {
        let library = FunctionLibrary::get();
        let signatures: Vec<_> = library.iter().map(ToString::to_string).collect();
        let width = signatures.iter().map(String::len).max().unwrap_or(0);
        for (signature, function) in signatures.iter().zip(library) {
            println!("{signature:width$}  {}", function.summary());
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::try_parse().unwrap_or_else(|err| {
        // `--help` and `--version` are reported as errors that go to stdout.
        let exit_code = if err.use_stderr() {
            USAGE_EXIT_CODE
        } else {
            0
        };
        err.print().ok();
        process::exit(exit_code);
    });
    args.run()
}
