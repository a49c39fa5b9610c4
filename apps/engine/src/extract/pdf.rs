//! PDF text extraction.
//!
//! Walks each page's content stream tracking the text matrix so fragments can
//! be regrouped into visual lines (same baseline, left to right). Many resume
//! PDFs emit fragments out of reading order; sorting by position recovers it.
//! Falls back to `pdf_extract` for documents whose content streams yield
//! almost nothing through the positioned walk.

use async_trait::async_trait;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::errors::ParseError;
use crate::extract::{ExtractedText, TextExtractor};

/// Fragments whose baselines differ by at most this much land on one line.
const LINE_TOLERANCE: f64 = 5.0;

/// Below this much positioned text the walk is considered failed and the
/// plain-text fallback runs instead.
const MIN_POSITIONED_CHARS: usize = 40;

/// Resumes longer than this get a soft length warning.
const MAX_RECOMMENDED_PAGES: usize = 3;

const PAGE_LENGTH_MESSAGE: &str = "Resume is longer than 3 pages; consider shortening it.";

pub struct PdfExtractor;

/// One positioned run of text from a content stream.
#[derive(Debug, Clone)]
struct TextFragment {
    x: f64,
    y: f64,
    text: String,
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedText, ParseError> {
        let result = tokio::task::spawn_blocking(move || extract_pdf(&bytes))
            .await
            .map_err(|e| ParseError::Extraction(format!("extraction task failed: {e}")))?;
        result
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<ExtractedText, ParseError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ParseError::Extraction(format!("failed to load PDF: {e}")))?;

    let pages = doc.get_pages();
    let page_count = pages.len();

    let mut page_texts: Vec<String> = Vec::with_capacity(page_count);
    for (&page_num, &page_id) in pages.iter() {
        let fragments = collect_fragments(&doc, page_num, page_id);
        page_texts.push(assemble_lines(fragments));
    }

    // Pages joined with a form feed; it trims away as whitespace downstream
    // but keeps a visible boundary in the raw text.
    let mut text = page_texts.join("\u{000C}\n");

    if text.trim().chars().count() < MIN_POSITIONED_CHARS {
        debug!(
            chars = text.trim().chars().count(),
            "positioned walk yielded too little text, using plain fallback"
        );
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(fallback) => text = fallback,
            Err(e) => warn!(error = %e, "plain text fallback also failed"),
        }
    }

    let mut messages = Vec::new();
    if page_count > MAX_RECOMMENDED_PAGES {
        messages.push(PAGE_LENGTH_MESSAGE.to_string());
    }

    Ok(ExtractedText {
        text,
        pages: Some(page_count as u32),
        messages,
    })
}

/// Walks one page's content stream and returns positioned fragments.
///
/// Tracks only the translation parts of the text matrix: Tm resets the
/// position outright, Td/TD move relative to the line start, T* and `'`
/// advance by the leading. Rotation and scaling are ignored; resumes are
/// upright documents.
fn collect_fragments(doc: &Document, page_num: u32, page_id: ObjectId) -> Vec<TextFragment> {
    let content = match doc.get_and_decode_page_content(page_id) {
        Ok(content) => content,
        Err(e) => {
            warn!(page = page_num, error = %e, "failed to decode page content");
            return Vec::new();
        }
    };

    let mut fragments = Vec::new();
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut line_x = 0.0_f64;
    let mut leading = 0.0_f64;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                x = 0.0;
                y = 0.0;
                line_x = 0.0;
            }
            "Tm" => {
                if op.operands.len() == 6 {
                    x = number(&op.operands[4]).unwrap_or(x);
                    y = number(&op.operands[5]).unwrap_or(y);
                    line_x = x;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() == 2 {
                    let tx = number(&op.operands[0]).unwrap_or(0.0);
                    let ty = number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                    x = line_x + tx;
                    y += ty;
                    line_x = x;
                }
            }
            "TL" => {
                if let Some(l) = op.operands.first().and_then(number) {
                    leading = l;
                }
            }
            "T*" => {
                x = line_x;
                y -= leading;
            }
            "Tj" => {
                if let Some(Object::String(data, _)) = op.operands.first() {
                    push_fragment(&mut fragments, x, y, data);
                }
            }
            "'" => {
                x = line_x;
                y -= leading;
                if let Some(Object::String(data, _)) = op.operands.first() {
                    push_fragment(&mut fragments, x, y, data);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let mut run = String::new();
                    for item in items {
                        if let Object::String(data, _) = item {
                            run.push_str(&decode_pdf_string(data));
                        }
                    }
                    if !run.trim().is_empty() {
                        fragments.push(TextFragment { x, y, text: run });
                    }
                }
            }
            _ => {}
        }
    }

    fragments
}

fn push_fragment(fragments: &mut Vec<TextFragment>, x: f64, y: f64, data: &[u8]) {
    let text = decode_pdf_string(data);
    if !text.trim().is_empty() {
        fragments.push(TextFragment { x, y, text });
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// UTF-16BE when the BOM is present, Latin-1 otherwise. Fonts with custom
/// encodings come out garbled here and rely on the fallback path.
fn decode_pdf_string(data: &[u8]) -> String {
    if data.len() >= 2 && data[0] == 0xFE && data[1] == 0xFF {
        let utf16: Vec<u16> = data[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        data.iter().map(|&b| b as char).collect()
    }
}

/// Groups fragments into visual lines: same baseline within tolerance, then
/// left to right. Lines are emitted top of page first.
fn assemble_lines(mut fragments: Vec<TextFragment>) -> String {
    if fragments.is_empty() {
        return String::new();
    }

    // Descending y first so line grouping walks down the page.
    fragments.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut lines: Vec<Vec<TextFragment>> = Vec::new();
    for fragment in fragments {
        match lines.last_mut() {
            Some(line) if (line[0].y - fragment.y).abs() <= LINE_TOLERANCE => {
                line.push(fragment);
            }
            _ => lines.push(vec![fragment]),
        }
    }

    let mut out = Vec::with_capacity(lines.len());
    for mut line in lines {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
        let joined = line
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        out.push(joined);
    }
    out.join("\n")
}
