//! Command-line arguments.
//!
//! `specie [OPTIONS] [FILE]`. Parsed by hand: the surface is four flags.

use thiserror::Error;

/// What the process was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Files executed before anything else, in order.
    pub includes: Vec<String>,
    /// `-e EXPR`: evaluate, print, exit.
    pub eval: Option<String>,
    pub file: Option<String>,
}

impl Options {
    /// Neither a file nor an expression: start the REPL.
    pub fn is_interactive(&self) -> bool {
        self.eval.is_none() && self.file.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("option '{0}' requires a value")]
    MissingValue(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}': only one file can be run")]
    ExtraArgument(String),
}

/// Parse the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Action, ArgError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-V" | "--version" => return Ok(Action::Version),
            "-i" | "--include" => {
                let path = args.next().ok_or(ArgError::MissingValue(arg))?;
                options.includes.push(path);
            }
            "-e" | "--eval" => {
                let expr = args.next().ok_or(ArgError::MissingValue(arg))?;
                options.eval = Some(expr);
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--include=") {
                    options.includes.push(path.to_owned());
                } else if let Some(expr) = arg.strip_prefix("--eval=") {
                    options.eval = Some(expr.to_owned());
                } else if arg.starts_with('-') {
                    return Err(ArgError::UnknownOption(arg));
                } else if options.file.is_some() {
                    return Err(ArgError::ExtraArgument(arg));
                } else {
                    options.file = Some(arg);
                }
            }
        }
    }
    Ok(Action::Run(options))
}

pub fn usage() -> String {
    format!(
        "specie {version}

Usage: specie [OPTIONS] [FILE]

Runs FILE, or evaluates EXPR, or starts an interactive session.

Options:
  -i, --include FILE   Execute FILE first (repeatable)
  -e, --eval EXPR      Evaluate EXPR, print the result and exit
  -h, --help           Show this help message
  -V, --version        Show version information

Environment:
  RUST_LOG             Enable logging, e.g. RUST_LOG=specie_eval=debug
  SPECIE_LOG_TREE      Show logs as an indented span tree",
        version = env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests;
