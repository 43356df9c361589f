//! Line-oriented decoder producing quotation records.
//!
//! The wire format is one author line followed by any number of quotation
//! lines, each terminated by `\n`. Blank lines between quotations are
//! skipped; quotation order and duplicates are preserved.

use super::{DecodeError, Decoder};

/// A decoded quotation record: an author and their quotations in payload
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quotes {
    author: String,
    quotes: Vec<String>,
}

impl Quotes {
    /// Construct a record directly, primarily for test fixtures.
    #[must_use]
    pub fn new(author: impl Into<String>, quotes: Vec<String>) -> Self {
        Self {
            author: author.into(),
            quotes,
        }
    }

    /// Author named on the payload's first line.
    #[must_use]
    pub fn author(&self) -> &str { &self.author }

    /// Quotations in the order they appeared, duplicates retained.
    #[must_use]
    pub fn quotes(&self) -> &[String] { &self.quotes }
}

/// Decoder for the line-oriented quotes format.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotesDecoder;

impl Decoder for QuotesDecoder {
    type Value = Quotes;

    fn decode(&self, payload: &[u8]) -> Result<Quotes, DecodeError> {
        let text = std::str::from_utf8(payload)?;
        let mut lines = text.lines();

        let author = match lines.next() {
            Some(line) if !line.trim().is_empty() => line.trim_end().to_owned(),
            _ => return Err(DecodeError::MissingHeader),
        };

        let quotes = lines
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Quotes { author, quotes })
    }
}
