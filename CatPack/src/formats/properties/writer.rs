//! `.properties` writing
//!
//! Values are escaped so that the output is plain ISO-8859-1: backslashes and
//! tabs get their short escapes and characters outside Latin-1 become
//! `\uXXXX` sequences. `=` and `:` inside values are left as they are.

use super::indexed_key;
use crate::error::Result;
use std::io::Write;

/// Escape a property value
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{c}' => escaped.push_str("\\f"),
            // Leading whitespace would be eaten as separator by readers
            ' ' if i == 0 => escaped.push_str("\\ "),
            c if u32::from(c) > 0xff => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    escaped.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Encode text as ISO-8859-1, replacing unmappable characters with `?`
#[must_use]
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Line-oriented `.properties` writer producing ISO-8859-1 bytes
pub struct PropertiesWriter<W: Write> {
    writer: W,
}

impl<W: Write> PropertiesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a `#` comment line
    pub fn write_comment(&mut self, comment: &str) -> Result<()> {
        if comment.is_empty() {
            self.write_line("#")
        } else {
            self.write_line(&format!("# {comment}"))
        }
    }

    /// Write `key=value`; absent values produce no line
    pub fn write_property(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.write_line(&format!("{key}={}", escape_value(value))),
            None => Ok(()),
        }
    }

    /// Write `key#index=value`; absent values produce no line
    pub fn write_indexed(&mut self, key: &str, index: usize, value: Option<&str>) -> Result<()> {
        self.write_property(&indexed_key(key, index), value)
    }

    pub fn blank_line(&mut self) -> Result<()> {
        self.write_line("")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(&encode_latin1(line))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
