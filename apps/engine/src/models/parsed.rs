//! Intermediate structures produced by the import pipeline.
//!
//! A `ParsedResume` is built once per import, is immutable afterwards, and is
//! consumed by `parser::convert_to_resume_data` into the app's resume record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level contact fields swept from the whole document.
/// Each field is either absent or a syntactically plausible value of its kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

/// One job entry. Dates are `YYYY-MM` strings; `current` means the end date
/// is logically "present" even if a literal date string was captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExperience {
    pub company: String,
    pub position: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    /// Newline-joined bullet text.
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEducation {
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProject {
    pub name: String,
    pub role: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: String,
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCertification {
    pub name: String,
    pub issuer: String,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

/// Where the raw text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseSource {
    Pdf,
    Docx,
    Text,
}

/// Audit metadata attached to every successful parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseInfo {
    pub source: ParseSource,
    pub file_name: String,
    pub parsed_at: DateTime<Utc>,
    /// 0–100 heuristic strength-of-extraction score.
    pub confidence: u8,
    /// Advisory, non-terminal issues found during parsing.
    pub warnings: Vec<String>,
}

/// Full structured output of one import operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub contact: ParsedContact,
    pub summary: Option<String>,
    pub experience: Vec<ParsedExperience>,
    pub education: Vec<ParsedEducation>,
    pub skills: Vec<String>,
    pub projects: Vec<ParsedProject>,
    pub certifications: Vec<ParsedCertification>,
    /// Full original extracted text, retained for audit/debug.
    pub raw_text: String,
    pub parse_info: ParseInfo,
}
