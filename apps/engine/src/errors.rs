use thiserror::Error;

/// Parse-pipeline error type.
///
/// Every failure of `parse_resume_file` surfaces as one of these variants;
/// nothing below the orchestrator boundary propagates a raw library error.
/// The scoring engine has no error path; it is a pure computation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// File is neither PDF nor DOCX (nor plain text).
    #[error("Unsupported file format{}. Please upload a PDF or DOCX file.", fmt_detail(.0))]
    UnsupportedFormat(Option<String>),

    /// Legacy binary .doc, explicitly unsupported, distinct from the
    /// generic case so the UI can suggest converting the file.
    #[error("Legacy .doc files are not supported. Please convert the file to .docx or PDF and try again.")]
    LegacyFormat,

    /// Extraction succeeded mechanically but yielded insufficient text.
    #[error("Could not read any text from this file. It may be empty, corrupted, or image-based.")]
    EmptyDocument,

    /// Any exception thrown by an underlying extraction library.
    #[error("Failed to extract text: {0}")]
    Extraction(String),
}

fn fmt_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(" ({d})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_message_is_distinct_from_unsupported() {
        let legacy = ParseError::LegacyFormat.to_string();
        let generic = ParseError::UnsupportedFormat(None).to_string();
        assert_ne!(legacy, generic);
        assert!(legacy.contains(".doc"));
        assert!(generic.contains("PDF or DOCX"));
    }

    #[test]
    fn test_unsupported_includes_detail_when_present() {
        let err = ParseError::UnsupportedFormat(Some("image/png".to_string()));
        assert!(err.to_string().contains("image/png"));
    }

    #[test]
    fn test_empty_document_names_likely_causes() {
        let msg = ParseError::EmptyDocument.to_string();
        assert!(msg.contains("empty"));
        assert!(msg.contains("image-based"));
    }

    #[test]
    fn test_extraction_preserves_underlying_message() {
        let err = ParseError::Extraction("bad xref table".to_string());
        assert!(err.to_string().contains("bad xref table"));
    }
}
