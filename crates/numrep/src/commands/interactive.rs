//! Interactive menu loop.
//!
//! Each round asks for an input system, a value, an output system and, for
//! integer outputs, a bit width; then prints the result. Entering `q`,
//! `quit` or `exit` at any prompt, or closing the input, ends the session.

use std::io::{self, BufRead, Write};

use miette::{IntoDiagnostic, Result};
use numrep_encoding::{convert, EncodeOptions, Numeric, NumberSystem, Scheme};

use crate::config::Config;

/// Run the menu loop on stdin/stdout.
pub fn run(config: &Config) -> Result<()> {
    let options = config.encode_options()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), options)
        .run()
        .into_diagnostic()
}

/// A menu session over any line reader and writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: EncodeOptions,
}

/// What a prompt produced.
enum Reply {
    Line(String),
    Quit,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: EncodeOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// Loop until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Number representation converter")?;
        while self.round()? {}
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()
    }

    /// One conversion. Returns `false` once the user has quit.
    fn round(&mut self) -> io::Result<bool> {
        self.menu("Input system")?;
        let from = match self.select()? {
            Reply::Quit => return Ok(false),
            Reply::Line(line) => match parse_selection(&line) {
                Some(system) => system,
                None => return self.complain(format!("'{line}' is not a menu choice")),
            },
        };

        let value = match self.prompt("Enter value: ")? {
            Reply::Quit => return Ok(false),
            Reply::Line(line) => line,
        };
        if let Err(message) = self.validate(from, &value) {
            return self.complain(message);
        }

        self.menu("Output system")?;
        let to = match self.select()? {
            Reply::Quit => return Ok(false),
            Reply::Line(line) => match parse_selection(&line) {
                Some(system) => system,
                None => return self.complain(format!("'{line}' is not a menu choice")),
            },
        };

        let mut options = self.options;
        if to.scheme().is_some_and(Scheme::is_integer) {
            let label = format!("Bit width [{}]: ", options.width);
            match self.prompt(&label)? {
                Reply::Quit => return Ok(false),
                Reply::Line(line) if line.is_empty() => {}
                Reply::Line(line) => match line.parse() {
                    Ok(width) => options.width = width,
                    Err(_) => return self.complain(format!("'{line}' is not a bit width")),
                },
            }
        }

        tracing::debug!("interactive conversion of '{value}' from {from} to {to}");
        match convert(&value, from, to, &options) {
            Ok(conversion) => writeln!(self.output, "Result: {}", conversion.output)?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    /// Checks made before any conversion is attempted.
    fn validate(&self, from: NumberSystem, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("input must not be empty".to_string());
        }
        match from {
            NumberSystem::Decimal => Numeric::parse_decimal(value)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            NumberSystem::Binary(scheme) => {
                if let Some(bad) = value.chars().find(|c| *c != '0' && *c != '1') {
                    return Err(format!("binary input may only contain 0 and 1, found '{bad}'"));
                }
                let expected = self.options.layout.total_bits();
                if scheme == Scheme::Ieee754 && value.len() != expected {
                    return Err(format!(
                        "IEEE-754 input must be exactly {expected} bits, got {}",
                        value.len()
                    ));
                }
                Ok(())
            }
        }
    }

    fn menu(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{title}:")?;
        for (i, system) in NumberSystem::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, system.label())?;
        }
        writeln!(self.output, "  q) Quit")
    }

    fn select(&mut self) -> io::Result<Reply> {
        self.prompt("> ")
    }

    /// Print `label` and read one trimmed line.
    fn prompt(&mut self, label: &str) -> io::Result<Reply> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Quit);
        }
        let line = line.trim();
        if matches!(line.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
            return Ok(Reply::Quit);
        }
        Ok(Reply::Line(line.to_string()))
    }

    fn complain(&mut self, message: String) -> io::Result<bool> {
        writeln!(self.output, "Error: {message}")?;
        Ok(true)
    }
}

/// A menu number (1-based) or a system name such as `twos` or `decimal`.
fn parse_selection(line: &str) -> Option<NumberSystem> {
    match line.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| NumberSystem::ALL.get(i).copied()),
        Err(_) => line.parse().ok(),
    }
}
