//! Access-log line parsing and the filter-phase decision.

use crate::classifier::Classifier;
use crate::entry::LogRecord;
use crate::error::{Error, Result};
use regex::Regex;

/// The outer pattern splitting an access-log line into date, method, URI and status.
pub const ACCESS_LOG_PATTERN: &str =
    r#".*\[(?P<date>.*)\].*(?P<method>GET|POST) (?P<uri>/.*) HTTP/1\.1" (?P<status>[0-9]{3}).*"#;

/// Parses raw access-log lines with the outer line pattern.
#[derive(Debug, Clone)]
pub struct Parser {
    /// The compiled outer pattern.
    regex: Regex,
}

impl Parser {
    /// Create a parser for the standard access-log line shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carlog::Parser;
    ///
    /// let parser = Parser::new()?;
    /// let record = parser.parse_line(
    ///     r#"127.0.0.1 - - [10/Oct/2023:13:55:36] "GET /oel/pkw/bmw HTTP/1.1" 200 1024"#,
    /// )?;
    /// assert_eq!(record.uri, "/oel/pkw/bmw");
    /// assert_eq!(record.status, 200);
    /// # Ok::<(), carlog::Error>(())
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_pattern(ACCESS_LOG_PATTERN)
    }

    /// Create a parser from a custom outer pattern.
    ///
    /// The pattern must declare the `date`, `method`, `uri` and `status` groups.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::invalid_line_pattern(pattern, e))?;
        Ok(Self { regex })
    }

    /// Parse a raw line into a [`LogRecord`].
    pub fn parse_line(&self, line: &str) -> Result<LogRecord> {
        let captures = self
            .regex
            .captures(line)
            .ok_or_else(|| Error::line_format_mismatch(line))?;

        let group = |name: &str| captures.name(name).map_or("", |m| m.as_str());

        let status = group("status");
        let status = status
            .parse::<u16>()
            .map_err(|e| Error::invalid_status(status, e))?;

        Ok(LogRecord::new(
            group("date"),
            group("method"),
            group("uri"),
            status,
        ))
    }

    /// Decide whether a raw line belongs in the combined store.
    ///
    /// True when the line has the access-log shape and its URI is accepted by
    /// the classifier. Rejected rim lines and unrecognised URIs are dropped.
    pub fn filter_line(&self, line: &str, classifier: &Classifier) -> bool {
        match self.parse_line(line) {
            Ok(record) => classifier.classify(&record.uri).is_match(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OIL_LINE: &str =
        r#"127.0.0.1 - - [10/Oct/2023:13:55:36] "GET /oel/pkw/bmw HTTP/1.1" 200 1024"#;

    #[test]
    fn test_parse_line() {
        let parser = Parser::new().unwrap();
        let record = parser.parse_line(OIL_LINE).unwrap();

        assert_eq!(record.date, "10/Oct/2023:13:55:36");
        assert_eq!(record.method, "GET");
        assert_eq!(record.uri, "/oel/pkw/bmw");
        assert_eq!(record.status, 200);
    }

    #[test]
    fn test_parse_combined_format_with_query() {
        let parser = Parser::new().unwrap();
        let line = r#"10.0.0.1 - - [25/Dec/2013:14:30:00 +0000] "POST /oils/search?vehicleId=7 HTTP/1.1" 302 0 "-" "Mozilla/5.0""#;
        let record = parser.parse_line(line).unwrap();

        assert_eq!(record.date, "25/Dec/2013:14:30:00 +0000");
        assert_eq!(record.method, "POST");
        assert_eq!(record.uri, "/oils/search?vehicleId=7");
        assert_eq!(record.status, 302);
    }

    #[test]
    fn test_parse_mismatch() {
        let parser = Parser::new().unwrap();

        let result = parser.parse_line("This is not a valid log line");
        assert!(matches!(result, Err(Error::LineFormatMismatch { .. })));

        // Only HTTP/1.1 GET and POST requests have the expected shape.
        let result = parser.parse_line(r#"1.2.3.4 - - [x] "PUT /oel/pkw HTTP/1.1" 200 1"#);
        assert!(result.is_err());
        let result = parser.parse_line(r#"1.2.3.4 - - [x] "GET /oel/pkw HTTP/2.0" 200 1"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_line() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();

        assert!(parser.filter_line(OIL_LINE, &classifier));
        assert!(!parser.filter_line(
            r#"1.2.3.4 - - [x] "GET /index.html HTTP/1.1" 200 1"#,
            &classifier
        ));
        assert!(!parser.filter_line(
            r#"1.2.3.4 - - [x] "GET /felgen/bmw/bmw--felgen.html HTTP/1.1" 200 1"#,
            &classifier
        ));
        assert!(!parser.filter_line("", &classifier));
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let result = Parser::with_pattern("(?P<date>");
        assert!(matches!(result, Err(Error::InvalidLinePattern { .. })));
    }
}
