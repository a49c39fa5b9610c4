//! Resume import and ATS scoring engine.
//!
//! Two subsystems share this crate:
//!
//! - the **import pipeline**: [`parse_resume_file`] turns an uploaded PDF,
//!   DOCX, or plain-text file into a structured [`ParsedResume`] via text
//!   extraction, heading-based section detection, and per-section heuristic
//!   parsers, with a confidence score and soft warnings;
//! - the **ATS scorer**: [`calculate_ats_score`] grades a structured resume
//!   (optionally against a job description) on completeness, keyword overlap,
//!   formatting, and content quality, producing a weighted 0-100 score and
//!   prioritized suggestions.
//!
//! Extraction is rule-based and best-effort by design; results carry warnings
//! rather than failing on messy input.

pub mod errors;
pub mod extract;
pub mod models;
pub mod parser;
pub mod scoring;

pub use errors::ParseError;
pub use extract::{ExtractedText, ResumeFile};
pub use models::parsed::ParsedResume;
pub use models::resume::ResumeData;
pub use models::score::{AtsScore, ScoreBreakdown, Suggestion, SuggestionCategory};
pub use parser::{
    convert_to_resume_data, parse_resume_file, parse_resume_text, ImportSequencer,
};
pub use scoring::calculate_ats_score;
