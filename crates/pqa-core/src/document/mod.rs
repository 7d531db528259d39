//! Document source: raw bytes to normalized policy text.

pub mod text;

pub use text::{normalize_document, normalize_question};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DocumentError, Result};
use crate::models::config::DocumentConfig;
use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Magic bytes at the start of every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Format a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

/// A loaded document with its normalized text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Whitespace-normalized text.
    pub text: String,
    /// Source format.
    pub kind: DocumentKind,
    /// Page count (1 for plain text).
    pub pages: u32,
    /// Size of the raw input in bytes.
    pub bytes: usize,
}

impl Document {
    /// Wrap text that is already in memory.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: normalize_document(text),
            kind: DocumentKind::PlainText,
            pages: 1,
            bytes: text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Load a document from raw bytes. PDFs are detected by their magic bytes;
/// anything else must be UTF-8 text.
pub fn load_document(data: &[u8], config: &DocumentConfig) -> Result<Document> {
    if data.len() > config.max_bytes {
        return Err(DocumentError::TooLarge {
            size: data.len(),
            limit: config.max_bytes,
        }
        .into());
    }

    if data.trim_ascii_start().starts_with(PDF_MAGIC) {
        return load_pdf(data, config);
    }

    let raw = std::str::from_utf8(data).map_err(|e| {
        DocumentError::UnsupportedFormat(format!("neither PDF nor UTF-8 text ({})", e))
    })?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut document = Document::from_text(raw);
    document.bytes = data.len();
    if document.is_empty() {
        warn!("Text document is empty");
    }
    debug!("Loaded text document: {} bytes", data.len());
    Ok(document)
}

fn load_pdf(data: &[u8], config: &DocumentConfig) -> Result<Document> {
    let mut extractor = PdfExtractor::new().with_min_text_length(config.min_text_length);
    extractor.load(data)?;

    let content = extractor.extract_all()?;
    match content.pdf_type {
        PdfType::Image => {
            return Err(DocumentError::ImageOnly {
                images: content.images,
            }
            .into());
        }
        PdfType::Empty => warn!("PDF has little or no extractable text"),
        PdfType::Text | PdfType::Hybrid => {}
    }

    let text = normalize_document(&content.text);
    info!(
        "Loaded PDF: {} pages, {} chars of text ({:?})",
        content.pages,
        text.len(),
        content.pdf_type
    );

    Ok(Document {
        text,
        kind: DocumentKind::Pdf,
        pages: content.pages,
        bytes: data.len(),
    })
}
