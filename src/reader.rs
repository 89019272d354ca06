//! Line-by-line reading of log sources.

use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader yielding the raw lines of an input source.
///
/// The reader implements the Iterator trait, allowing you to process lines
/// using standard Rust iterator patterns. Trailing `\n` and `\r\n` are
/// stripped; empty lines are yielded like any other line.
#[derive(Debug)]
pub struct LineReader<R: Read> {
    /// The underlying buffered reader.
    reader: BufReader<R>,
    /// Number of lines read so far, including failed ones.
    line_number: usize,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader over the input source.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carlog::LineReader;
    /// use std::io::Cursor;
    ///
    /// let reader = LineReader::new(Cursor::new("first\r\nsecond\n"));
    /// let lines: Vec<String> = reader.collect::<Result<_, _>>()?;
    /// assert_eq!(lines, ["first", "second"]);
    /// # Ok::<(), carlog::Error>(())
    /// ```
    pub fn new(input: R) -> Self {
        Self {
            reader: BufReader::new(input),
            line_number: 0,
        }
    }

    /// One-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    ///
    /// # Returns
    ///
    /// An `Option<Result<String>>` where:
    /// - `None` indicates end of input
    /// - `Some(Ok(line))` is the next line without its terminator
    /// - `Some(Err(error))` indicates an I/O error; a line that is not valid
    ///   UTF-8 is consumed and reported with kind `InvalidData`
    pub fn read(&mut self) -> Option<Result<String>> {
        let mut buf = Vec::new();

        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;

                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }

                Some(String::from_utf8(buf).map_err(|e| {
                    Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                }))
            }
            Err(e) => Some(Err(Error::Io { source: e })),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}
