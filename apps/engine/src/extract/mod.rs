//! Text extraction adapters.
//!
//! Each supported format gets an adapter that takes the file bytes and
//! returns raw text plus minimal structural hints. Format rejection happens
//! here, before any extraction attempt; the legacy .doc format gets its own
//! error so the UI can suggest converting the file.

pub mod docx;
pub mod pdf;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ParseError;
use crate::models::parsed::ParseSource;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

/// An uploaded file: name, declared MIME type, and raw bytes.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Raw text plus structural hints from one extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub text: String,
    /// Page count, when the format exposes one (PDF).
    pub pages: Option<u32>,
    /// Format-specific diagnostics, surfaced as soft warnings.
    pub messages: Vec<String>,
}

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Detected file format, from declared MIME type, extension fallback, and
/// magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    /// Binary .doc, explicitly unsupported.
    LegacyDoc,
    PlainText,
    Unknown,
}

impl FileKind {
    pub fn detect(mime_type: &str, file_name: &str, bytes: &[u8]) -> Self {
        let mime = mime_type.trim().to_lowercase();
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        if mime == "application/msword" || ext == "doc" || bytes.starts_with(OLE2_MAGIC) {
            return FileKind::LegacyDoc;
        }
        if mime == "application/pdf" || ext == "pdf" || bytes.starts_with(PDF_MAGIC) {
            return FileKind::Pdf;
        }
        if mime == DOCX_MIME || ext == "docx" || bytes.starts_with(ZIP_MAGIC) {
            return FileKind::Docx;
        }
        if mime == "text/plain" || ext == "txt" {
            return FileKind::PlainText;
        }
        FileKind::Unknown
    }
}

/// Format-specific text extractor. Extraction runs off the caller's thread
/// because document decoding is CPU-bound.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText, ParseError>;

    fn name(&self) -> &'static str;
}

/// Routes a file to the matching extractor. Rejects legacy and unknown
/// formats before touching the bytes.
pub async fn extract_file(file: ResumeFile) -> Result<(ExtractedText, ParseSource), ParseError> {
    let kind = FileKind::detect(&file.mime_type, &file.file_name, &file.bytes);
    debug!(file = %file.file_name, ?kind, "routing extraction");

    match kind {
        FileKind::LegacyDoc => Err(ParseError::LegacyFormat),
        FileKind::Unknown => Err(ParseError::UnsupportedFormat(Some(file.mime_type.clone()))),
        FileKind::Pdf => {
            let extracted = PdfExtractor.extract(file.bytes).await?;
            Ok((extracted, ParseSource::Pdf))
        }
        FileKind::Docx => {
            let extracted = DocxExtractor.extract(file.bytes).await?;
            Ok((extracted, ParseSource::Docx))
        }
        FileKind::PlainText => {
            let text = String::from_utf8_lossy(&file.bytes).into_owned();
            Ok((
                ExtractedText {
                    text,
                    pages: None,
                    messages: Vec::new(),
                },
                ParseSource::Text,
            ))
        }
    }
}
