//! Contact and header extraction.
//!
//! Contact fields are swept from the whole text with a flat regex cascade;
//! first match wins per field. Name and job title come only from the header
//! region (first ~500 characters).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::parsed::ParsedContact;

pub(crate) static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s|,;)\]]+").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap());

/// US-formatted numbers, tried first.
static PHONE_US_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]\d{4}").unwrap()
});

/// Looser international fallback: leading +, 8-15 digits with separators.
static PHONE_INTL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d{1,3}[\s.\-]?\d[\d\s.\-]{5,12}\d").unwrap());

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%\-]+/?").unwrap()
});

static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9\-]+/?").unwrap()
});

/// "City, ST": capitalized city words followed by a two-letter state code.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*), ?([A-Z]{2})\b").unwrap()
});

/// 2-4 capitalized words, the usual shape of a name on its own line.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z'.\-]+(?: [A-Z][A-Za-z'.\-]+){1,3}$").unwrap()
});

static NAME_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^name\s*[:\-]\s*(.{2,60})$").unwrap());

/// Nouns that signal a job-title line in the document header.
const TITLE_KEYWORDS: &[&str] = &[
    "engineer", "developer", "manager", "designer", "analyst", "consultant",
    "architect", "scientist", "specialist", "administrator", "director", "lead",
    "intern", "coordinator", "researcher",
];

/// Header region inspected for name/title extraction.
const HEADER_REGION_CHARS: usize = 500;
const TITLE_LOOKAHEAD_LINES: usize = 3;

/// Flat regex sweep over the entire text. Each field is independent;
/// the first successful pattern wins.
pub fn extract_contact_info(text: &str) -> ParsedContact {
    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

    let phone = PHONE_US_RE
        .find(text)
        .or_else(|| PHONE_INTL_RE.find(text))
        .map(|m| m.as_str().trim().to_string());

    let linkedin = LINKEDIN_RE
        .find(text)
        .map(|m| ensure_scheme(m.as_str().trim_end_matches('/')));
    let github = GITHUB_RE
        .find(text)
        .map(|m| ensure_scheme(m.as_str().trim_end_matches('/')));

    let website = URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| {
            let lower = url.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .map(|url| url.trim_end_matches('/').to_string());

    let location = LOCATION_RE
        .captures(text)
        .map(|caps| format!("{}, {}", &caps[1], &caps[2]));

    ParsedContact {
        email,
        phone,
        location,
        linkedin,
        github,
        website,
    }
}

fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn header_region(text: &str) -> &str {
    match text.char_indices().nth(HEADER_REGION_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Inspects only the first non-empty header line: accepted as a name if it
/// looks like 2-4 capitalized words, or carries an explicit "Name:" label.
pub fn extract_name(text: &str) -> Option<String> {
    let line = header_region(text).lines().map(str::trim).find(|l| !l.is_empty())?;

    if let Some(caps) = NAME_LABEL_RE.captures(line) {
        return Some(caps[1].trim().to_string());
    }
    if NAME_RE.is_match(line) {
        return Some(line.to_string());
    }
    None
}

/// Scans the 1-3 lines following the name line for a title-indicating noun
/// and returns the first matching line verbatim.
pub fn extract_job_title(text: &str, name: Option<&str>) -> Option<String> {
    let lines: Vec<&str> = header_region(text)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let start = match name {
        Some(n) => lines.iter().position(|l| *l == n).map(|i| i + 1).unwrap_or(0),
        None => 0,
    };

    lines
        .iter()
        .skip(start)
        .take(TITLE_LOOKAHEAD_LINES)
        .find(|line| {
            let lower = line.to_lowercase();
            TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(|line| line.to_string())
}
