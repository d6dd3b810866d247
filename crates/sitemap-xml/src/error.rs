//! Error types for sitemap encoding and decoding.

use thiserror::Error;

/// Errors that can occur when writing or reading sitemap documents.
///
/// Every variant carries a byte position: the number of bytes accepted by the
/// sink for write failures, or the input offset reached for parse failures.
/// [`Error::position`] returns it uniformly.
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink failed. `written` counts the bytes it accepted first.
    #[error("write failed after {written} bytes: {source}")]
    Write {
        written: u64,
        #[source]
        source: std::io::Error,
    },

    /// XML syntax or encoding error reported by the parser.
    #[error("XML error at byte {offset}: {source}")]
    Xml {
        offset: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Input ended while an element was still open.
    #[error("unexpected end of input at byte {offset}: <{element}> is not closed")]
    UnexpectedEof { offset: u64, element: String },

    /// Input contained no root element at all.
    #[error("no <{expected}> root element found (read {offset} bytes)")]
    MissingRoot { offset: u64, expected: &'static str },

    /// Non-whitespace text before the root element.
    #[error("text outside the root element at byte {offset}")]
    TextOutsideRoot { offset: u64 },

    /// Root element has the wrong name (e.g. a sitemap index read as a sitemap).
    #[error("expected root element <{expected}>, found <{found}> at byte {offset}")]
    UnexpectedRoot {
        offset: u64,
        expected: &'static str,
        found: String,
    },

    /// Element text that cannot be stored in its typed field.
    #[error("invalid <{element}> value {value:?} at byte {offset}")]
    InvalidValue {
        offset: u64,
        element: &'static str,
        value: String,
    },
}

impl Error {
    /// Bytes written before a write failure, or the input offset of a parse failure.
    pub fn position(&self) -> u64 {
        match self {
            Error::Write { written, .. } => *written,
            Error::Xml { offset, .. }
            | Error::UnexpectedEof { offset, .. }
            | Error::MissingRoot { offset, .. }
            | Error::TextOutsideRoot { offset }
            | Error::UnexpectedRoot { offset, .. }
            | Error::InvalidValue { offset, .. } => *offset,
        }
    }

    /// Whether this error came from reading a document rather than writing one.
    pub fn is_parse(&self) -> bool {
        !matches!(self, Error::Write { .. })
    }
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, Error>;
