//! Error types for the pqa-core library.
//!
//! Absence of an answer in a document is never an error: the engine reports
//! it as a not-found answer. Errors here cover loading the document and
//! building rule tables.

use thiserror::Error;

/// Main error type for the pqa library.
#[derive(Error, Debug)]
pub enum PqaError {
    /// Document loading or text extraction error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid rule pattern in a category table.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to fetching a document and turning it into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be retrieved from its location.
    #[error("failed to fetch document from {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// Failed to open/parse the PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Requested page does not exist.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The PDF only contains scanned images, which need OCR.
    #[error("PDF contains only images ({images} found); no extractable text")]
    ImageOnly { images: usize },

    /// The document is larger than the configured limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The bytes are neither a PDF nor UTF-8 text.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while compiling a category table.
#[derive(Error, Debug)]
pub enum PatternError {
    /// A rule's regular expression failed to compile.
    #[error("invalid pattern for rule {rule} in category {category}: {reason}")]
    InvalidRegex {
        category: String,
        rule: String,
        reason: String,
    },

    /// A rule references a capture group its pattern does not define.
    #[error("rule {rule} references capture group {group}, pattern has {available}")]
    MissingGroup {
        rule: String,
        group: usize,
        available: usize,
    },

    /// The same category appears twice in one table.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// A category declares no keywords, so it can never be classified.
    #[error("category {0} has no keywords")]
    NoKeywords(String),
}

/// Result type for the pqa library.
pub type Result<T> = std::result::Result<T, PqaError>;
