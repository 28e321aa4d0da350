//! Session facade tying the stages together.
//!
//! [`parse`] runs scanner + parser, [`Lox::resolve`] the static pass and
//! [`Lox::interpret`] the evaluator.  [`Lox::run`] chains all three the way
//! the command line and the REPL need it: diagnostics go to the error sink,
//! and any lexical, syntax or static error keeps the evaluator from running.

use std::io::{self, Write};

use log::{debug, info};

use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;

/// Output of [`parse`]: whatever parsed cleanly plus every lexical and
/// syntax diagnostic, in source order per stage.
#[derive(Debug)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<LoxError>,
}

impl Parsed {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse `source`.
pub fn parse(source: &str) -> Parsed {
    let (tokens, mut errors) = Scanner::new(source).scan_all();
    let (statements, parse_errors) = Parser::new(tokens).parse();

    errors.extend(parse_errors);

    Parsed { statements, errors }
}

/// Outcome of one [`Lox::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Lexical, syntax or resolver error; nothing was executed.
    StaticError,
    /// Execution started and stopped at an unhandled runtime error.
    RuntimeError,
}

impl Status {
    /// Process exit code for this outcome (sysexits conventions).
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::StaticError => 65,
            Status::RuntimeError => 70,
        }
    }
}

/// One interpreter session.  Globals persist across calls to `run`, which
/// is what the REPL relies on.
pub struct Lox {
    interpreter: Interpreter,
    err: Box<dyn Write>,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Program output to stdout, diagnostics to stderr.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_output(out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            err,
        }
    }

    /// Run the static pass, recording local distances in the interpreter.
    pub fn resolve(&mut self, statements: &[Stmt]) -> Vec<LoxError> {
        Resolver::new(&mut self.interpreter).resolve(statements)
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        self.interpreter.interpret(statements)
    }

    /// Parse, resolve and execute `source`, reporting every diagnostic.
    pub fn run(&mut self, source: &str) -> Status {
        info!("Running {} byte(s) of source", source.len());

        let parsed: Parsed = parse(source);
        if parsed.had_error() {
            self.report_all(&parsed.errors);
            return Status::StaticError;
        }

        let static_errors: Vec<LoxError> = self.resolve(&parsed.statements);
        if !static_errors.is_empty() {
            self.report_all(&static_errors);
            return Status::StaticError;
        }

        match self.interpret(&parsed.statements) {
            Ok(()) => Status::Ok,
            Err(e) => {
                self.report(&e);
                Status::RuntimeError
            }
        }
    }

    fn report_all(&mut self, errors: &[LoxError]) {
        debug!("Reporting {} diagnostic(s)", errors.len());

        for error in errors {
            self.report(error);
        }
    }

    fn report(&mut self, error: &LoxError) {
        // A broken diagnostics sink has nowhere left to report to.
        let _ = writeln!(self.err, "{}", error);
        let _ = self.err.flush();
    }
}
