//! Core library for insurance policy question answering.
//!
//! This crate provides:
//! - Document loading (PDF text extraction, plain text)
//! - Question classification into policy categories
//! - Rule-based answer extraction with a keyword context fallback
//! - Request/response models and accuracy reporting

pub mod document;
pub mod error;
pub mod models;
pub mod pdf;
pub mod policy;

pub use document::{load_document, Document, DocumentKind};
pub use error::{DocumentError, PatternError, PqaError, Result};
pub use models::answer::{AnalysisResult, Answer, Outcome};
pub use models::config::PqaConfig;
pub use models::response::{AnalysisRequest, AnalysisResponse, QuestionAnswer};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use policy::rules::{CategoryId, CategoryRegistry};
pub use policy::{MatchOutcome, PolicyAnalyzer, QuestionAnswerer};
