//! Running sources and reporting their failures.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};

use specie_diagnostic::emitter::{ColorMode, TerminalEmitter};
use specie_diagnostic::{Diagnostic, ErrorCode};
use specie_eval::{join_relative, Interpreter, SpecieError, Value};

use crate::args::Options;
use crate::fs::{read_failure, FsResolver};
use crate::repl;

/// A failure that has already been shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reported;

/// An interpreter paired with the emitter its diagnostics go to.
pub struct Driver<W: Write> {
    interpreter: Interpreter,
    emitter: TerminalEmitter<W>,
}

impl Driver<io::Stderr> {
    /// Includes read from disk; diagnostics on stderr, colored on a terminal.
    pub fn stderr() -> Self {
        let is_tty = io::stderr().is_terminal();
        Driver::new(
            Interpreter::builder().file_resolver(FsResolver).build(),
            TerminalEmitter::stderr(ColorMode::Auto, is_tty),
        )
    }
}

impl<W: Write> Driver<W> {
    pub fn new(interpreter: Interpreter, emitter: TerminalEmitter<W>) -> Self {
        Driver {
            interpreter,
            emitter,
        }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    pub fn into_emitter(self) -> TerminalEmitter<W> {
        self.emitter
    }

    pub fn execute(&mut self, source: &str) -> Result<Value, Reported> {
        self.interpreter
            .execute(source)
            .map_err(|err| self.report(&err, source))
    }

    /// Read and run a file from disk. Includes inside it resolve against its
    /// directory.
    pub fn execute_file(&mut self, path: &str) -> Result<Value, Reported> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                let diagnostic =
                    Diagnostic::error(ErrorCode::E4011).with_message(read_failure(path, &err));
                self.emit(&diagnostic, "");
                return Err(Reported);
            }
        };
        tracing::debug!(path, bytes = source.len(), "running file");
        self.interpreter
            .execute_named(join_relative(None, path), &source)
            .map_err(|err| self.report(&err, &source))
    }

    /// How a result is printed: `None` for null, which prints nothing.
    pub fn render(&mut self, value: &Value, source: &str) -> Result<Option<String>, Reported> {
        if matches!(value, Value::Null) {
            return Ok(None);
        }
        match self.interpreter.render(value) {
            Ok(text) => Ok(Some(text)),
            Err(err) => Err(self.report(&SpecieError::Runtime(err), source)),
        }
    }

    /// Show `err` against the source it came from.
    pub fn report(&mut self, err: &SpecieError, source: &str) -> Reported {
        self.emit(&err.to_diagnostic(), source);
        Reported
    }

    fn emit(&mut self, diagnostic: &Diagnostic, source: &str) {
        if let Err(err) = self.emitter.emit(diagnostic, source) {
            tracing::warn!(%err, "failed to write a diagnostic");
        }
    }
}

/// Do what `options` asks: includes, then the file, then `-e`; the REPL when
/// there is neither a file nor an expression.
pub fn run<W: Write>(
    driver: &mut Driver<W>,
    options: &Options,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), Reported> {
    for path in &options.includes {
        driver.execute_file(path)?;
    }
    if let Some(path) = &options.file {
        driver.execute_file(path)?;
    }
    if let Some(expr) = &options.eval {
        let value = driver.execute(expr)?;
        if let Some(text) = driver.render(&value, expr)? {
            writeln!(output, "{text}").map_err(output_failure)?;
        }
    }
    if options.is_interactive() {
        repl::run(driver, input, output).map_err(output_failure)?;
    }
    Ok(())
}

#[cold]
fn output_failure(err: io::Error) -> Reported {
    eprintln!("error: {err}");
    Reported
}

#[cfg(test)]
mod tests;
