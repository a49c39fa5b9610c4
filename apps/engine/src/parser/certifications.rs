//! Certification parsing: every content line is one independent entry.
//! Wrapped issuers or dates on a following line are not reassociated.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::parsed::ParsedCertification;
use crate::parser::contact::URL_RE;
use crate::parser::experience::strip_bullet;
use crate::parser::sections::is_heading_line;

/// "Name - Issuer" (spaces required so hyphenated names survive).
static ISSUER_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+[-–—]\s+(.+)$").unwrap());

/// "Name (Issuer)"
static ISSUER_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\(([^)]+)\)").unwrap());

static ISSUER_BY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+by\s+(.+)$").unwrap());

static ISSUER_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+from\s+(.+)$").unwrap());

static MONTH_YEAR_ANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b")
        .unwrap()
});

static CREDENTIAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:credential(?:\s+id)?|id|#)\s*[:#]\s*([A-Za-z0-9\-]{4,})").unwrap()
});

/// Lines under this length are noise, not certifications.
const MIN_LINE_CHARS: usize = 5;

const DEFAULT_ISSUER: &str = "Unknown Issuer";

pub fn parse_certifications_section(content: &str) -> Vec<ParsedCertification> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = strip_bullet(raw);
            if line.chars().count() < MIN_LINE_CHARS || (i == 0 && is_heading_line(&line)) {
                return None;
            }
            Some(parse_certification_line(&line))
        })
        .collect()
}

fn parse_certification_line(line: &str) -> ParsedCertification {
    let issue_date = MONTH_YEAR_ANY_RE
        .find(line)
        .and_then(|m| crate::parser::dates::parse_date(m.as_str()));
    let credential_id = CREDENTIAL_ID_RE
        .captures(line)
        .map(|caps| caps[1].to_string());
    let credential_url = URL_RE.find(line).map(|m| m.as_str().to_string());

    // Strip the independently extracted pieces before the issuer cascade so
    // they don't end up inside the name/issuer text.
    let mut body = line.to_string();
    for re in [&*URL_RE, &*MONTH_YEAR_ANY_RE, &*CREDENTIAL_ID_RE] {
        if let Some(range) = re.find(&body).map(|m| m.range()) {
            body.replace_range(range, "");
        }
    }
    let body = body
        .trim()
        .trim_end_matches([',', '|', '-', '–', '—', ';'])
        .trim()
        .to_string();

    // First matching pattern wins: dash, parens, "by", "from".
    let (name, issuer) = if let Some(caps) = ISSUER_DASH_RE.captures(&body) {
        (caps[1].to_string(), caps[2].to_string())
    } else if let Some(caps) = ISSUER_PAREN_RE.captures(&body) {
        (caps[1].to_string(), caps[2].to_string())
    } else if let Some(caps) = ISSUER_BY_RE.captures(&body) {
        (caps[1].to_string(), caps[2].to_string())
    } else if let Some(caps) = ISSUER_FROM_RE.captures(&body) {
        (caps[1].to_string(), caps[2].to_string())
    } else {
        (body.clone(), DEFAULT_ISSUER.to_string())
    };

    ParsedCertification {
        name: name.trim().trim_end_matches([',', '|']).trim().to_string(),
        issuer: issuer.trim().trim_end_matches([',', '|']).trim().to_string(),
        issue_date,
        expiry_date: None,
        credential_id,
        credential_url,
    }
}
