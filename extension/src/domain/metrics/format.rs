//! JSON text formatting for flat records
//!
//! Records are written in the number and string forms used by the Go
//! `encoding/json` package, so output is byte-identical to the records that
//! collector-side consumers already parse:
//!
//! - doubles use the shortest round-trip digits, as plain decimals for
//!   magnitudes in `[1e-6, 1e21)` and zero, otherwise in exponent form with an
//!   explicit sign (`1e+21`, `1e-7`);
//! - `<`, `>`, `&`, U+2028 and U+2029 inside strings are written as `\uXXXX`.

use std::io;

use serde_json::ser::Formatter;

/// Compact formatter with Go-compatible numbers and string escapes
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormatter;

impl Formatter for RecordFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_double(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

/// Shortest round-trip text of a finite double
pub fn format_double(value: f64) -> String {
    let abs = value.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        // Display never uses exponents and drops a trailing `.0`
        return value.to_string();
    }

    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{:0>2}", mantissa, exp),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(s: &str) -> String {
        let mut out = Vec::new();
        RecordFormatter.write_string_fragment(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_whole_doubles_have_no_fraction() {
        assert_eq!(format_double(22.0), "22");
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(-0.0), "-0");
        assert_eq!(format_double(100.0), "100");
        assert_eq!(format_double(-3.0), "-3");
    }

    #[test]
    fn test_shortest_round_trip_digits() {
        assert_eq!(format_double(9.833394491064633), "9.833394491064633");
        assert_eq!(format_double(0.1), "0.1");
        assert_eq!(format_double(1.5), "1.5");
    }

    #[test]
    fn test_plain_decimal_range() {
        assert_eq!(format_double(1e16), "10000000000000000");
        assert_eq!(format_double(1e20), "100000000000000000000");
        assert_eq!(format_double(1e-6), "0.000001");
    }

    #[test]
    fn test_exponent_range() {
        assert_eq!(format_double(1e21), "1e+21");
        assert_eq!(format_double(1.5e300), "1.5e+300");
        assert_eq!(format_double(-2e22), "-2e+22");
        assert_eq!(format_double(1e-7), "1e-7");
        assert_eq!(format_double(1.25e-10), "1.25e-10");
        assert_eq!(format_double(5e-324), "5e-324");
    }

    #[test]
    fn test_html_characters_are_escaped() {
        assert_eq!(escape("a<b>&c"), "a\\u003cb\\u003e\\u0026c");
        assert_eq!(escape("line\u{2028}para\u{2029}"), "line\\u2028para\\u2029");
        assert_eq!(escape("plain.ascii-text"), "plain.ascii-text");
        assert_eq!(escape("héllo"), "héllo");
    }
}
