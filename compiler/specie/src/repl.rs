//! The interactive session.
//!
//! Every input runs in the same global frame. A line ending in `\` asks for
//! another line, and so does input that stops in the middle of an
//! expression; an empty line then forces evaluation of what was typed.

use std::io::{self, BufRead, Write};
use std::mem;

use crate::driver::Driver;

pub const PROMPT: &str = ">>> ";
pub const CONTINUATION: &str = "... ";

pub fn run<W: Write>(
    driver: &mut Driver<W>,
    mut input: impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let mut pending = String::new();
    let mut line = String::new();
    loop {
        let prompt = if pending.is_empty() { PROMPT } else { CONTINUATION };
        output.write_all(prompt.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }
        let text = line.trim_end_matches(['\n', '\r']);
        if pending.is_empty() && text.trim() == "exit" {
            return Ok(());
        }
        if let Some(head) = text.strip_suffix('\\') {
            pending.push_str(head);
            pending.push('\n');
            continue;
        }
        pending.push_str(text);
        if pending.trim().is_empty() {
            pending.clear();
            continue;
        }

        match driver.interpreter().execute(&pending) {
            Err(err) if err.is_incomplete() && !text.trim().is_empty() => {
                pending.push('\n');
            }
            Err(err) => {
                driver.report(&err, &pending);
                pending.clear();
            }
            Ok(value) => {
                let source = mem::take(&mut pending);
                if let Ok(Some(shown)) = driver.render(&value, &source) {
                    writeln!(output, "{shown}")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
