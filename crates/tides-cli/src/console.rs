//! Line-oriented terminal I/O with optional colour.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crossterm::style::{Color, Stylize};
use thiserror::Error;
use tides_logic::FrontendError;

/// Why a typed answer could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please only enter one of the provided character options!")]
    UnknownOption,
    #[error("Please only enter an integer!")]
    NotAnInteger,
}

/// Applies terminal colours, or passes text through untouched when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn good(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    pub fn bad(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    /// Green when `value` meets `target`, red otherwise.
    pub fn against_target(&self, text: &str, value: i64, target: u32) -> String {
        if value >= target as i64 {
            self.good(text)
        } else {
            self.bad(text)
        }
    }
}

pub const INDENT: &str = "    ";

pub struct Console<R, W> {
    input: R,
    output: W,
    pub palette: Palette,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, palette: Palette) -> Self {
        Self {
            input,
            output,
            palette,
        }
    }

    /// Write pre-rendered text verbatim.
    pub fn print(&mut self, text: &str) -> Result<(), FrontendError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> Result<(), FrontendError> {
        writeln!(self.output, "{INDENT}{text}")?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> Result<(), FrontendError> {
        let painted = self.palette.bad(message);
        self.line(&painted)
    }

    /// Show the input marker and read one trimmed line.
    pub fn read_line(&mut self) -> Result<String, FrontendError> {
        write!(self.output, "\n{INDENT}% ")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(FrontendError::InputClosed);
        }
        writeln!(self.output)?;
        Ok(buf.trim().to_string())
    }

    /// Read an integer, re-prompting on anything unparsable.
    pub fn read_integer<T: FromStr>(&mut self) -> Result<T, FrontendError> {
        loop {
            let text = self.read_line()?;
            match text.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.error(&InputError::NotAnInteger.to_string())?,
            }
        }
    }

    /// Read a single letter and map it through `choose`, re-prompting when
    /// the letter is not an option.
    pub fn read_choice<T>(
        &mut self,
        choose: impl Fn(char) -> Option<T>,
    ) -> Result<T, FrontendError> {
        loop {
            let text = self.read_line()?;
            let mut chars = text.chars();
            let picked = match (chars.next(), chars.next()) {
                (Some(c), None) => choose(c.to_ascii_uppercase()),
                _ => None,
            };
            match picked {
                Some(value) => return Ok(value),
                None => self.error(&InputError::UnknownOption.to_string())?,
            }
        }
    }

    pub fn read_yes_no(&mut self) -> Result<bool, FrontendError> {
        self.read_choice(|c| match c {
            'Y' => Some(true),
            'N' => Some(false),
            _ => None,
        })
    }

    pub fn wait_for_continue(&mut self) -> Result<(), FrontendError> {
        self.line("Enter any character to continue")?;
        self.read_line().map(|_| ())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Palette::new(false),
        )
    }

    #[test]
    fn test_read_integer_reprompts() {
        let mut c = console("abc\n-1\n12\n");
        let n: u32 = c.read_integer().unwrap();
        assert_eq!(n, 12);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Please only enter an integer!").count(), 2);
    }

    #[test]
    fn test_read_choice_is_case_insensitive() {
        let mut c = console("maybe\ny\n");
        assert!(c.read_yes_no().unwrap());
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Please only enter one of the provided character options!"));
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut c = console("");
        assert!(matches!(c.read_line(), Err(FrontendError::InputClosed)));
    }

    #[test]
    fn test_palette_disabled_is_plain() {
        let p = Palette::new(false);
        assert_eq!(p.good("ok"), "ok");
        let p = Palette::new(true);
        assert_ne!(p.bad("no"), "no");
        assert!(p.bad("no").contains("no"));
    }
}
