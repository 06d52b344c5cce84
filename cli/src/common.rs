//! Common utils.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFile,
    term::{
        emit,
        termcolor::{ColorChoice, StandardStream},
        Config as ReportingConfig,
    },
};
use is_terminal::IsTerminal;

use std::io;

use mathexpr_eval::Error as EvalError;
use mathexpr_parser::Error as ParseError;

/// Exit code on invalid command-line options.
pub const USAGE_EXIT_CODE: i32 = 1;
/// Exit code on parsing or evaluation errors.
pub const ERROR_EXIT_CODE: i32 = 2;

/// Coloring of the diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorPreference {
    /// Color the output if stderr is a terminal.
    Auto,
    /// Always color the output.
    Always,
    /// Never color the output.
    Never,
}

impl ColorPreference {
    fn color_choice(self) -> ColorChoice {
        match self {
            Self::Always => ColorChoice::Always,
            Self::Never => ColorChoice::Never,
            Self::Auto if io::stderr().is_terminal() => ColorChoice::Auto,
            Self::Auto => ColorChoice::Never,
        }
    }
}

/// Reports parsing and evaluation errors for a single expression.
pub struct Reporter<'a> {
    file: SimpleFile<&'static str, &'a str>,
    writer: StandardStream,
    config: ReportingConfig,
}

impl<'a> Reporter<'a> {
    pub fn new(code: &'a str, color: ColorPreference) -> Self {
        Self {
            file: SimpleFile::new("expr", code),
            writer: StandardStream::stderr(color.color_choice()),
            config: ReportingConfig::default(),
        }
    }

    fn emit(&self, diagnostic: &Diagnostic<()>) -> anyhow::Result<()> {
        emit(&mut self.writer.lock(), &self.config, &self.file, diagnostic)?;
        Ok(())
    }

    pub fn report_parse_error(&self, err: &ParseError<'_>) -> anyhow::Result<()> {
        let span = err.span();
        let start = span.location_offset();
        let range = start..start + span.fragment().len();
        let message = match err.offending_char() {
            Some(ch) => format!("Unexpected `{ch}`"),
            None => "Input ends here".to_owned(),
        };

        let diagnostic = Diagnostic::error()
            .with_message(err.kind().to_string())
            .with_code("PARSE")
            .with_labels(vec![Label::primary((), range).with_message(message)]);
        self.emit(&diagnostic)
    }

    pub fn report_eval_error(&self, err: &EvalError<'_>) -> anyhow::Result<()> {
        let mut diagnostic = Diagnostic::error()
            .with_message(err.kind().to_string())
            .with_code("EVAL");
        if let Some(range) = err.range() {
            let label = Label::primary((), range).with_message(err.kind().main_span_info());
            diagnostic = diagnostic.with_labels(vec![label]);
        }
        if let Some(help) = err.kind().help() {
            diagnostic = diagnostic.with_notes(vec![help]);
        }
        self.emit(&diagnostic)
    }
}
