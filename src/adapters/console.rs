//! Console operator adapter.
//!
//! Implements [`OperatorPort`] on stdin/stdout: prints the prompt and
//! blocks until a line (Enter) arrives.  A closed or failing stdin does not
//! block forever; calibration proceeds immediately with a warning.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::ports::OperatorPort;

pub struct ConsoleOperator<R> {
    input: R,
}

impl ConsoleOperator<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ConsoleOperator<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> OperatorPort for ConsoleOperator<R> {
    fn acknowledge(&mut self, prompt: &str) {
        let mut stdout = io::stdout();
        // Console output is best-effort.
        let _ = writeln!(stdout, "{prompt}");
        let _ = stdout.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => warn!("Console: stdin closed, continuing without confirmation"),
            Ok(_) => {}
            Err(e) => warn!("Console: stdin read failed ({}), continuing", e),
        }
    }
}
