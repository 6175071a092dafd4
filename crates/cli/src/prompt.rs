//! Line-oriented prompting.
//!
//! [`Prompter`] wraps any `BufRead`/`Write` pair so the interactive flows can be driven by a
//! terminal in production and by in-memory buffers in tests.

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()
    }

    /// Reads one line, without its line terminator or trailing whitespace.
    ///
    /// End of input is an [`ErrorKind::UnexpectedEof`] error: every question expects an answer.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "input ended while waiting for an answer",
            ));
        }
        Ok(line.trim_end().to_string())
    }

    /// Asks `question` until `parse` accepts the answer.
    ///
    /// A rejected answer prints the parser's message and asks again. This loops rather than
    /// recursing, so a long run of bad answers costs no stack.
    pub fn ask<T>(
        &mut self,
        question: impl Display,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> io::Result<T> {
        loop {
            self.say(format_args!("> {question}"))?;
            let answer = self.read_line()?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(reason) => self.say(format_args!("\n[X] {reason} Try that again.\n"))?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
