//! `.properties` parsing
//!
//! Follows the standard line-oriented semantics: comment lines start with `#`
//! or `!`, a line ending with an odd number of backslashes continues on the
//! next line, and the key ends at the first unescaped `=`, `:` or whitespace.

use super::Properties;
use crate::error::{Error, Result};

/// Decode ISO-8859-1 bytes (every byte maps to the code point of same value)
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse `.properties` data from raw ISO-8859-1 bytes
///
/// # Errors
///
/// Returns [`Error::InvalidProperties`] if an escape sequence is malformed.
pub fn parse_properties_bytes(data: &[u8]) -> Result<Properties> {
    parse_properties(&decode_latin1(data))
}

/// Parse `.properties` text
///
/// # Errors
///
/// Returns [`Error::InvalidProperties`] if an escape sequence is malformed.
pub fn parse_properties(text: &str) -> Result<Properties> {
    let chars: Vec<char> = text.chars().collect();
    let mut lines = LineReader::new(&chars);
    let mut properties = Properties::new();

    while let Some((line_number, line)) = lines.next_logical_line() {
        let (key, value) = split_key_value(&line);
        let key = unescape(key, line_number)?;
        let value = unescape(value, line_number)?;
        properties.insert(key, value);
    }

    Ok(properties)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Reads logical lines, joining continuations and skipping comments
struct LineReader<'a> {
    chars: &'a [char],
    pos: usize,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            line: 1,
        }
    }

    /// Consume a line terminator at the current position, if any
    fn consume_terminator(&mut self) -> bool {
        match self.chars.get(self.pos) {
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
                true
            }
            Some('\r') => {
                self.pos += 1;
                if self.chars.get(self.pos) == Some(&'\n') {
                    self.pos += 1;
                }
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn skip_blanks(&mut self) {
        while self.chars.get(self.pos).is_some_and(|&c| is_blank(c)) {
            self.pos += 1;
        }
    }

    fn skip_to_line_end(&mut self) {
        while self
            .chars
            .get(self.pos)
            .is_some_and(|&c| c != '\n' && c != '\r')
        {
            self.pos += 1;
        }
        self.consume_terminator();
    }

    /// Returns the next logical line with the number of its first physical line
    fn next_logical_line(&mut self) -> Option<(usize, Vec<char>)> {
        loop {
            if self.pos >= self.chars.len() {
                return None;
            }
            self.skip_blanks();
            let start_line = self.line;

            match self.chars.get(self.pos) {
                None => return None,
                Some('\n' | '\r') => {
                    self.consume_terminator();
                    continue;
                }
                Some('#' | '!') => {
                    self.skip_to_line_end();
                    continue;
                }
                Some(_) => {}
            }

            let mut line = Vec::new();
            let mut backslashes = 0usize;
            loop {
                match self.chars.get(self.pos) {
                    None => {
                        if backslashes % 2 == 1 {
                            line.pop();
                        }
                        return Some((start_line, line));
                    }
                    Some('\n' | '\r') => {
                        self.consume_terminator();
                        if backslashes % 2 == 1 {
                            line.pop();
                            backslashes = 0;
                            self.skip_blanks();
                            continue;
                        }
                        return Some((start_line, line));
                    }
                    Some(&c) => {
                        if c == '\\' {
                            backslashes += 1;
                        } else {
                            backslashes = 0;
                        }
                        line.push(c);
                        self.pos += 1;
                    }
                }
            }
        }
    }
}

/// Split a logical line into its raw (still escaped) key and value
fn split_key_value(line: &[char]) -> (&[char], &[char]) {
    let mut key_len = 0;
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < line.len() {
        let c = line[key_len];
        if (c == '=' || c == ':') && !preceding_backslash {
            value_start = key_len + 1;
            has_separator = true;
            break;
        } else if is_blank(c) && !preceding_backslash {
            value_start = key_len + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < line.len() {
        let c = line[value_start];
        if !is_blank(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    (&line[..key_len], &line[value_start.min(line.len())..])
}

/// Resolve escape sequences of a raw key or value
fn unescape(raw: &[char], line_number: usize) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let c = raw[i];
        i += 1;
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }

        let Some(&escaped) = raw.get(i) else {
            break;
        };
        i += 1;
        let unit = match escaped {
            't' => u16::from(b'\t'),
            'n' => u16::from(b'\n'),
            'r' => u16::from(b'\r'),
            'f' => 0x0c,
            'u' => {
                let digits: String = raw.iter().skip(i).take(4).collect();
                if digits.len() != 4 || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
                    return Err(Error::InvalidProperties {
                        line: line_number,
                        message: format!("malformed \\uxxxx encoding: \\u{digits}"),
                    });
                }
                i += 4;
                u16::from_str_radix(&digits, 16).map_err(|e| Error::InvalidProperties {
                    line: line_number,
                    message: e.to_string(),
                })?
            }
            other => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(other.encode_utf16(&mut buf));
                continue;
            }
        };
        units.push(unit);
    }

    Ok(String::from_utf16_lossy(&units))
}
