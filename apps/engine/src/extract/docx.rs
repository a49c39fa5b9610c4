//! DOCX text extraction.
//!
//! A .docx file is a zip archive; the document body lives in
//! word/document.xml. The walk collects `w:t` text runs, emits a newline at
//! each paragraph end and explicit break, and a space for tabs. The XML is
//! streamed rather than built into a tree.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::errors::ParseError;
use crate::extract::{ExtractedText, TextExtractor};

pub struct DocxExtractor;

#[async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText, ParseError> {
        let result = tokio::task::spawn_blocking(move || extract_docx(&bytes))
            .await
            .map_err(|e| ParseError::Extraction(format!("extraction task failed: {e}")))?;
        result
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

fn extract_docx(bytes: &[u8]) -> Result<ExtractedText, ParseError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ParseError::Extraction(format!("failed to open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ParseError::Extraction(format!("DOCX is missing its document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ParseError::Extraction(format!("failed to read document body: {e}")))?;

    let text = walk_document_xml(&xml)?;

    Ok(ExtractedText {
        text: normalize(&text),
        pages: None,
        messages: Vec::new(),
    })
}

fn walk_document_xml(xml: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = true,
                b"tab" => text.push(' '),
                b"br" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push(' '),
                b"br" => text.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_text_run {
                    let chunk = t
                        .unescape()
                        .map_err(|e| ParseError::Extraction(format!("bad XML escape: {e}")))?;
                    text.push_str(&chunk);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::Extraction(format!(
                    "failed to parse document XML: {e}"
                )))
            }
        }
    }

    Ok(text)
}

/// Runs of this many or more blank lines collapse to a single blank line;
/// shorter runs are kept as-is.
const BLANK_RUN_COLLAPSE: usize = 3;

/// Normalizes extracted text: LF line endings, single spaces within lines,
/// trimmed lines, runs of 3+ blank lines collapsed to one, and leading and
/// trailing blank lines dropped.
fn normalize(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;

    for raw in text.replace("\r\n", "\n").split('\n') {
        let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
        } else {
            if !lines.is_empty() {
                let keep = if blank_run >= BLANK_RUN_COLLAPSE { 1 } else { blank_run };
                for _ in 0..keep {
                    lines.push(String::new());
                }
            }
            blank_run = 0;
            lines.push(line);
        }
    }
    lines.join("\n")
}
