//! Instance file parsing
//!
//! An instance file carries two integer header lines followed by opaque
//! payload lines:
//!
//! ```text
//! <n>
//! <C>
//! <payload line 1>
//! ...
//! ```
//!
//! The payload is kept as raw bytes so it can be re-emitted exactly,
//! including line terminators and a missing final newline.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("expected 2 header lines, found {found}")]
    MissingHeader { found: usize },

    #[error("header line {line} is not valid UTF-8")]
    NonUtf8Header { line: usize },

    #[error("header line {line} is not an integer: '{value}'")]
    NotAnInteger { line: usize, value: String },
}

/// A decimal integer of any size, kept in canonical text form.
///
/// Header values are only ever re-emitted, so they are never narrowed to a
/// machine integer. Canonical form has no `+`, no `_` separators, no leading
/// zeros and no negative zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderInt(String);

impl HeaderInt {
    /// Parse `text` the way a decimal `int()` literal reads: optional sign,
    /// ASCII digits with single `_` separators between them, surrounding
    /// whitespace ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, digits) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let mut canonical = String::with_capacity(digits.len() + 1);
        let mut prev_underscore = true;
        for ch in digits.chars() {
            match ch {
                '0'..='9' => {
                    if !(canonical.is_empty() && ch == '0') {
                        canonical.push(ch);
                    }
                    prev_underscore = false;
                }
                '_' if !prev_underscore => prev_underscore = true,
                _ => return None,
            }
        }
        // Empty digits, or a leading/trailing separator
        if prev_underscore {
            return None;
        }

        if canonical.is_empty() {
            return Some(Self("0".to_string()));
        }
        if negative {
            canonical.insert(0, '-');
        }
        Some(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for HeaderInt {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for HeaderInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two integer counts at the top of an instance file, in read order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceHeader {
    pub n: HeaderInt,
    pub c: HeaderInt,
}

/// A parsed instance borrowing its payload from the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<'a> {
    pub header: InstanceHeader,
    pub payload: &'a [u8],
}

impl Instance<'_> {
    /// Count payload lines the way a line reader would: a trailing fragment
    /// without a newline still counts as a line.
    pub fn payload_lines(&self) -> usize {
        let newlines = self.payload.iter().filter(|&&b| b == b'\n').count();
        match self.payload.last() {
            Some(b'\n') | None => newlines,
            Some(_) => newlines + 1,
        }
    }
}

/// Display identifier of an instance: the file name up to its first `.`.
pub fn label_for(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Parse the header of `bytes` and split off the payload.
pub fn parse_instance(bytes: &[u8]) -> Result<Instance<'_>, InstanceError> {
    let (n, rest) = next_header_line(bytes, 1)?;
    let (c, payload) = next_header_line(rest, 2)?;
    Ok(Instance {
        header: InstanceHeader { n, c },
        payload,
    })
}

fn next_header_line(bytes: &[u8], line_no: usize) -> Result<(HeaderInt, &[u8]), InstanceError> {
    if bytes.is_empty() {
        return Err(InstanceError::MissingHeader { found: line_no - 1 });
    }
    let (line, tail) = split_line(bytes);
    Ok((parse_header_line(line, line_no)?, tail))
}

/// Split off the first line, dropping its terminator. `\n`, `\r\n` and a
/// lone `\r` all end a header line.
fn split_line(bytes: &[u8]) -> (&[u8], &[u8]) {
    match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
        Some(pos) if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') => {
            (&bytes[..pos], &bytes[pos + 2..])
        }
        Some(pos) => (&bytes[..pos], &bytes[pos + 1..]),
        None => (bytes, &[]),
    }
}

fn parse_header_line(line: &[u8], line_no: usize) -> Result<HeaderInt, InstanceError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| InstanceError::NonUtf8Header { line: line_no })?;
    HeaderInt::parse(text).ok_or_else(|| InstanceError::NotAnInteger {
        line: line_no,
        value: text.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(n: i64, c: i64) -> InstanceHeader {
        InstanceHeader {
            n: n.into(),
            c: c.into(),
        }
    }

    fn canonical(text: &str) -> Option<String> {
        HeaderInt::parse(text).map(|v| v.to_string())
    }

    #[test]
    fn test_label_stops_at_first_dot() {
        assert_eq!(label_for("abc.def.txt"), "abc");
        assert_eq!(label_for("noext"), "noext");
        assert_eq!(label_for(".hidden"), "");
        assert_eq!(label_for("trailing."), "trailing");
    }

    #[test]
    fn test_parse_splits_header_and_payload() {
        let instance = parse_instance(b"3\n7\nhello\nworld\n").unwrap();
        assert_eq!(instance.header, header(3, 7));
        assert_eq!(instance.payload, b"hello\nworld\n");
        assert_eq!(instance.payload_lines(), 2);
    }

    #[test]
    fn test_parse_header_only() {
        let instance = parse_instance(b"1\n2\n").unwrap();
        assert_eq!(instance.header, header(1, 2));
        assert!(instance.payload.is_empty());
        assert_eq!(instance.payload_lines(), 0);

        // Second header line without a terminator is still a header line
        let instance = parse_instance(b"1\n2").unwrap();
        assert_eq!(instance.header.c.as_str(), "2");
        assert!(instance.payload.is_empty());
    }

    #[test]
    fn test_payload_keeps_line_endings_verbatim() {
        let instance = parse_instance(b"4\n5\r\nrow one\r\nrow two").unwrap();
        assert_eq!(instance.header, header(4, 5));
        assert_eq!(instance.payload, b"row one\r\nrow two");
        assert_eq!(instance.payload_lines(), 2);
    }

    #[test]
    fn test_header_tolerates_surrounding_whitespace_and_sign() {
        let instance = parse_instance(b"  12 \n-3\t\n").unwrap();
        assert_eq!(instance.header, header(12, -3));
    }

    #[test]
    fn test_missing_header_lines() {
        assert_eq!(
            parse_instance(b""),
            Err(InstanceError::MissingHeader { found: 0 })
        );
        assert_eq!(
            parse_instance(b"5\n"),
            Err(InstanceError::MissingHeader { found: 1 })
        );
    }

    #[test]
    fn test_non_integer_header() {
        match parse_instance(b"3\nseven\npayload\n") {
            Err(InstanceError::NotAnInteger { line, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "seven");
            }
            other => panic!("expected NotAnInteger, got {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_header() {
        assert_eq!(
            parse_instance(b"\xff\n1\n"),
            Err(InstanceError::NonUtf8Header { line: 1 })
        );
    }

    #[test]
    fn test_header_values_beyond_machine_integers() {
        let instance = parse_instance(b"3\n99999999999999999999\nx\n").unwrap();
        assert_eq!(instance.header.n.as_str(), "3");
        assert_eq!(instance.header.c.as_str(), "99999999999999999999");
        assert_eq!(
            canonical("-123456789012345678901234567890").as_deref(),
            Some("-123456789012345678901234567890")
        );
    }

    #[test]
    fn test_header_values_are_canonicalised() {
        assert_eq!(canonical("+7").as_deref(), Some("7"));
        assert_eq!(canonical("007").as_deref(), Some("7"));
        assert_eq!(canonical("1_000").as_deref(), Some("1000"));
        assert_eq!(canonical("-0").as_deref(), Some("0"));
        assert_eq!(canonical("000").as_deref(), Some("0"));
        assert_eq!(canonical("-0_42").as_deref(), Some("-42"));

        let instance = parse_instance(b"1_000\n2\n").unwrap();
        assert_eq!(instance.header, header(1000, 2));
    }

    #[test]
    fn test_malformed_header_values_are_rejected() {
        for text in ["", "-", "+", "_1", "1_", "1__0", "1 0", "0x10", "1.0", "--1", "+-1"] {
            assert_eq!(canonical(text), None, "accepted {text:?}");
        }
    }

    #[test]
    fn test_bare_carriage_return_ends_header_lines() {
        let instance = parse_instance(b"3\r7\rpayload\r").unwrap();
        assert_eq!(instance.header, header(3, 7));
        assert_eq!(instance.payload, b"payload\r");

        let instance = parse_instance(b"3\r\n7\r\nrow\r\n").unwrap();
        assert_eq!(instance.header, header(3, 7));
        assert_eq!(instance.payload, b"row\r\n");
    }
}
