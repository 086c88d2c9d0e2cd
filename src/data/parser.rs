//! Extraction of a reading from one raw sensor line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::CM_TO_MM;

use super::Reading;

/// First signed decimal numeral; `.` or `,` as separator.
static NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?\d*[.,]?\d+").expect("numeral pattern is a valid regex")
});

/// Turns text lines into [`Reading`]s, scaling by a fixed unit factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParser {
    scale: f64,
}

impl LineParser {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Parse raw bytes as received from the transport.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, so a corrupted
    /// byte only spoils the line if it lands inside the numeral.
    pub fn parse_bytes(&self, raw: &[u8]) -> Option<Reading> {
        self.parse(&String::from_utf8_lossy(raw))
    }

    /// Parse one line of text. Returns `None` for blank lines, lines without a
    /// numeral, and numerals that do not parse as a float.
    pub fn parse(&self, line: &str) -> Option<Reading> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let numeral = NUMERAL.find(line)?.as_str().replace(',', ".");
        let value: f64 = numeral.parse().ok()?;
        Some(Reading::from_mm(value * self.scale))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(CM_TO_MM)
    }
}

/// Parse a centimeter line into millimeters with the default scale.
pub fn parse_line(line: &str) -> Option<Reading> {
    LineParser::default().parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm(line: &str) -> Option<f64> {
        parse_line(line).map(Reading::mm)
    }

    #[test]
    fn numeral_embedded_in_text() {
        let v = mm("Distance: 12.5 cm").unwrap();
        assert!((v - 125.0).abs() < 1e-9);
    }

    #[test]
    fn comma_decimal_separator() {
        let v = mm("7,25").unwrap();
        assert!((v - 72.5).abs() < 1e-9);
    }

    #[test]
    fn only_the_first_numeral_counts() {
        let v = mm("3 then 9").unwrap();
        assert!((v - 30.0).abs() < 1e-9);
    }

    #[test]
    fn signs_and_leading_separator() {
        assert!((mm("-4.5").unwrap() + 45.0).abs() < 1e-9);
        assert!((mm("+2").unwrap() - 20.0).abs() < 1e-9);
        assert!((mm("-.5").unwrap() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn blank_and_non_numeric_lines_are_skipped() {
        assert_eq!(mm(""), None);
        assert_eq!(mm("   \r"), None);
        assert_eq!(mm("Out of range"), None);
        assert_eq!(mm("--.--"), None);
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let raw = [0xff, 0xfe, b'1', b'5', b'.', b'0', b'\r'];
        let reading = LineParser::default().parse_bytes(&raw).unwrap();
        assert!((reading.mm() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn custom_scale_is_applied() {
        let parser = LineParser::new(1.0);
        assert_eq!(parser.parse("42").map(Reading::mm), Some(42.0));
    }
}
