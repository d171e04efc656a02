use crate::error::MoveError;
use crate::game::Outcome;
use serde_json::json;
use std::io::{self, Write};

/// How each evaluated sequence is written out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn create_reporter<W: Write + 'static>(format: ReportFormat, out: W) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter { out }),
        ReportFormat::Json => Box::new(JsonReporter { out }),
    }
}

pub trait Reporter {
    fn report(&mut self, moves: &str, result: &Result<Outcome, MoveError>) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, moves: &str, result: &Result<Outcome, MoveError>) -> io::Result<()> {
        match result {
            Ok(outcome) => writeln!(self.out, "Sequence: {} -> Result: {}", moves, outcome),
            Err(e) => writeln!(self.out, "Error processing sequence '{}': {}", moves, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, moves: &str, result: &Result<Outcome, MoveError>) -> io::Result<()> {
        let line = json!({
            "sequence": moves,
            "result": result.as_ref().ok().map(Outcome::label),
            "error": result.as_ref().err().map(ToString::to_string),
        });
        writeln!(self.out, "{}", line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Collects everything written so a test can read it after the writer is boxed.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}
