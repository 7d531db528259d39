//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::DocumentError;

/// Extracted text below this many bytes counts as "no text".
const DEFAULT_MIN_TEXT_LENGTH: usize = 20;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Extracted text (if any).
    pub text: String,
    /// Number of pages.
    pub pages: u32,
    /// Number of embedded image objects.
    pub images: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Set the minimum text length for a PDF to count as text-based.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Extract the text of the loaded document and classify it.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let doc = self
            .document
            .as_ref()
            .ok_or(DocumentError::Parse("No document loaded".to_string()))?;

        let pages = doc.get_pages().len() as u32;
        if pages == 0 {
            return Err(DocumentError::NoPages);
        }

        let text = match self.extract_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("Whole-document extraction failed ({}), reading page by page", e);
                self.extract_pages_text()
            }
        };
        let images = self.count_images();
        let pdf_type = self.classify(&text, images);

        debug!(
            "PDF analysis: {} pages, {} chars text, {} images -> {:?}",
            pages,
            text.trim().len(),
            images,
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            pages,
            images,
        })
    }

    /// Join the text of every page that lopdf can read, skipping pages it
    /// cannot decode.
    pub fn extract_pages_text(&self) -> String {
        let Some(doc) = self.document.as_ref() else {
            return String::new();
        };

        let mut text = String::new();
        for page in doc.get_pages().keys() {
            match self.extract_page_text(*page) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => warn!("Skipping page {}: {}", page, e),
            }
        }
        text
    }

    /// Count image XObjects in the document without decoding them.
    pub fn count_images(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        let count = doc
            .objects
            .values()
            .filter(|object| is_image(object))
            .count();

        trace!("Found {} image objects", count);
        count
    }

    fn classify(&self, text: &str, images: usize) -> PdfType {
        let has_text = text.trim().len() >= self.min_text_length;
        let has_images = images > 0;

        match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        }
    }
}

fn is_image(object: &Object) -> bool {
    match object {
        Object::Stream(stream) => stream
            .dict
            .get(b"Subtype")
            .and_then(|subtype| subtype.as_name())
            .is_ok_and(|name| name == b"Image"),
        _ => false,
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.raw_data.is_empty() {
            return Err(DocumentError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(DocumentError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(DocumentError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// One-page PDF, optionally with an embedded 1x1 grey image.
    fn build_pdf(with_image: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        if with_image {
            doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![128],
            ));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.count_images(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"%PDF-1.4 definitely not a pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_) | DocumentError::NoPages));
    }

    #[test]
    fn test_load_counts_pages_and_images() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&build_pdf(true)).unwrap();

        assert_eq!(extractor.page_count(), 1);
        assert_eq!(extractor.count_images(), 1);
        assert!(matches!(
            extractor.extract_page_text(7),
            Err(DocumentError::InvalidPage(7))
        ));
    }

    #[test]
    fn test_page_by_page_text() {
        assert_eq!(PdfExtractor::new().extract_pages_text(), "");

        let mut extractor = PdfExtractor::new();
        extractor.load(&build_pdf(false)).unwrap();
        // The only page has an empty content stream
        assert!(extractor.extract_pages_text().trim().is_empty());
    }

    #[test]
    fn test_classify_thresholds() {
        let extractor = PdfExtractor::new().with_min_text_length(10);

        assert_eq!(extractor.classify("Grace period of 30 days", 0), PdfType::Text);
        assert_eq!(extractor.classify("  ", 2), PdfType::Image);
        assert_eq!(extractor.classify("Grace period of 30 days", 1), PdfType::Hybrid);
        assert_eq!(extractor.classify("short", 0), PdfType::Empty);
    }
}
