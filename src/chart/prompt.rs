use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::chart::date::ChartDate;

pub const DATE_PROMPT: &str = "Enter a date (YYYY-MM-DD) to retrieve the Billboard Hot 100: ";

/// Where the run gets its chart date from.
pub trait DateSource {
    fn next_date(&mut self) -> io::Result<ChartDate>;
}

/// Interactive prompt that keeps asking until a line has the `YYYY-MM-DD` shape.
///
/// There is no retry limit. Running out of input is the only way out without a
/// date, and surfaces as `UnexpectedEof`.
pub struct DatePrompt<R, W> {
    input: R,
    output: W,
}

impl DatePrompt<io::BufReader<io::Stdin>, io::Stdout> {
    /// Prompt on the terminal. Stdin is locked per read, not for the prompt's
    /// lifetime, so the authorization step can still read the redirect URL.
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> DatePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DateSource for DatePrompt<R, W> {
    fn next_date(&mut self) -> io::Result<ChartDate> {
        let mut line = String::new();

        loop {
            write!(self.output, "{}", DATE_PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a date was entered",
                ));
            }

            match ChartDate::parse(&line) {
                Some(date) => return Ok(date),
                None => warn!("Invalid format. Please enter the date in YYYY-MM-DD format."),
            }
        }
    }
}

/// Date supplied up front, e.g. from `--date`.
pub struct FixedDate(pub ChartDate);

impl DateSource for FixedDate {
    fn next_date(&mut self) -> io::Result<ChartDate> {
        Ok(self.0.clone())
    }
}
