//! Terminal console over stdin/stdout.

use bedtime_error::{BedtimeResult, IoError};
use bedtime_story::Console;
use std::io::{BufRead, Write};

/// Console reading lines from stdin and writing to stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Create a console bound to the process's standard streams.
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn ask(&mut self, prompt: &str) -> BedtimeResult<String> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(prompt.as_bytes()).map_err(IoError::from)?;
        stdout.flush().map_err(IoError::from)?;

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(IoError::from)?;
        Ok(strip_line_ending(line))
    }

    fn say(&mut self, text: &str) -> BedtimeResult<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text).map_err(IoError::from)?;
        stdout.flush().map_err(IoError::from)?;
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
