// Parser module: line window, tokenization, classification and field parsing.

pub mod classify;
pub mod field;

use crate::error::{Result, ScriptError};
use indicatif::ProgressBar;
use std::io::{self, BufRead};

pub const RECORD_KEYWORD: &str = "struct";
pub const ENUM_KEYWORD: &str = "enum";
pub const REQUIRED_KEYWORD: &str = "required";
pub const CLOSE_BRACE: &str = "}";

// One raw input line with its 1-based position. Line endings are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn is_close(&self) -> bool {
        self.trimmed() == CLOSE_BRACE
    }

    // Split the trimmed line on single spaces. Runs of spaces yield empty tokens.
    pub fn tokens(&self) -> Vec<&str> {
        self.trimmed().split(' ').collect()
    }
}

// Two-line sliding window over the input: the line being processed and the
// one after it. `advance` hands out the peeked line first, so anything that
// keeps consuming (enum bodies) continues exactly where the window stands.
pub struct LineWindow<R> {
    reader: R,
    peeked: Option<Line>,
    lines_read: usize,
    bar: Option<ProgressBar>,
}

impl<R: BufRead> LineWindow<R> {
    pub fn new(reader: R, bar: Option<ProgressBar>) -> io::Result<Self> {
        let mut window = Self {
            reader,
            peeked: None,
            lines_read: 0,
            bar,
        };
        window.peeked = window.read_raw()?;
        Ok(window)
    }

    // Move the window forward and return the new current line.
    pub fn advance(&mut self) -> io::Result<Option<Line>> {
        let current = self.peeked.take();
        if current.is_some() {
            self.peeked = self.read_raw()?;
        }
        Ok(current)
    }

    pub fn peek(&self) -> Option<&Line> {
        self.peeked.as_ref()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    fn read_raw(&mut self) -> io::Result<Option<Line>> {
        let mut raw = Vec::new();
        let n = self.reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            if let Some(b) = &self.bar {
                b.finish();
            }
            return Ok(None);
        }
        if let Some(b) = &self.bar {
            b.inc(n as u64);
        }
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        // Bytes that are not UTF-8 (Latin-1 comments and the like) are replaced, not fatal.
        let text = String::from_utf8_lossy(&raw).into_owned();
        self.lines_read += 1;
        Ok(Some(Line {
            number: self.lines_read,
            text,
        }))
    }
}

// Name of a struct/enum header: the token after the keyword.
pub fn header_name<'a>(tokens: &[&'a str], line: &Line) -> Result<&'a str> {
    match tokens.get(1) {
        Some(&name) if !name.is_empty() && name != "{" => Ok(name),
        _ => Err(ScriptError::malformed(
            line.number,
            line.trimmed(),
            format!("`{}` header without a name", tokens.first().copied().unwrap_or_default()),
        )),
    }
}
