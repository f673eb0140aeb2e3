//! Line-oriented console over any reader/writer pair.

use log::warn;
use std::io::{self, BufRead, Write};

use crate::utils::validation::{is_valid_input, sanitize_input};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Show `label` and read a trimmed line. `None` once input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", label)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let value = sanitize_input(&line);
            if is_valid_input(&value) {
                return Ok(Some(value));
            }
            warn!("Discarded console input containing control characters");
            self.say("❌ Invalid characters, try again")?;
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
