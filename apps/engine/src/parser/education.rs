//! Education parsing: incremental entries keyed off degree-keyword lines
//! rather than date ranges.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::parsed::ParsedEducation;
use crate::parser::experience::{is_bullet_line, strip_bullet};
use crate::parser::sections::is_heading_line;

static DEGREE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(bachelor|master|associate|doctorate|phd|ph\.d|b\.s|m\.s|b\.a|m\.a|mba|b\.sc|m\.sc|diploma)\b").unwrap()
});

static DEGREE_IN_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+in\s+(.+)$").unwrap());

static DEGREE_OF_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+of\s+(.+)$").unwrap());

static INSTITUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(university|college|institute|school|academy)\b").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

/// Years found on institution lines (or standalone) are taken as graduation
/// dates with an assumed May month.
const ASSUMED_GRADUATION_MONTH: &str = "05";

const DEFAULT_INSTITUTION: &str = "Unknown Institution";
const MIN_DESCRIPTION_CHARS: usize = 20;

#[derive(Debug, Default)]
struct EntryBuilder {
    institution: Option<String>,
    degree: String,
    field: Option<String>,
    end_date: Option<String>,
    description: Vec<String>,
}

impl EntryBuilder {
    fn finalize(self) -> ParsedEducation {
        ParsedEducation {
            institution: self
                .institution
                .unwrap_or_else(|| DEFAULT_INSTITUTION.to_string()),
            degree: self.degree,
            field: self.field,
            start_date: None,
            end_date: self.end_date,
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.join("\n"))
            },
        }
    }
}

pub fn parse_education_section(content: &str) -> Vec<ParsedEducation> {
    let mut entries: Vec<ParsedEducation> = Vec::new();
    let mut builder: Option<EntryBuilder> = None;

    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || (i == 0 && is_heading_line(line)) {
            continue;
        }

        if DEGREE_LINE_RE.is_match(line) {
            if let Some(done) = builder.take() {
                entries.push(done.finalize());
            }
            let mut next = EntryBuilder::default();
            let (degree, field) = split_degree_field(line);
            next.degree = degree;
            next.field = field;
            if let Some(year) = YEAR_RE.find(line) {
                next.end_date = Some(format!("{}-{ASSUMED_GRADUATION_MONTH}", year.as_str()));
            }
            builder = Some(next);
            continue;
        }

        let Some(entry) = builder.as_mut() else {
            continue;
        };

        if entry.institution.is_none() && INSTITUTION_RE.is_match(line) {
            let year = YEAR_RE.find(line);
            if let Some(y) = &year {
                entry.end_date = Some(format!("{}-{ASSUMED_GRADUATION_MONTH}", y.as_str()));
            }
            let name = match year {
                Some(y) => format!("{}{}", &line[..y.start()], &line[y.end()..]),
                None => line.to_string(),
            };
            entry.institution =
                Some(name.trim().trim_end_matches([',', '-', '|', '–']).trim().to_string());
        } else if entry.end_date.is_none() && entry.institution.is_none() && is_year_line(line) {
            // Standalone year before any institution line: graduation fallback.
            entry.end_date = Some(format!("{line}-{ASSUMED_GRADUATION_MONTH}"));
        } else if is_bullet_line(line) {
            entry.description.push(strip_bullet(line));
        } else if line.chars().count() >= MIN_DESCRIPTION_CHARS {
            entry.description.push(line.to_string());
        }
    }

    if let Some(done) = builder.take() {
        entries.push(done.finalize());
    }
    entries
}

fn is_year_line(line: &str) -> bool {
    line.len() == 4 && YEAR_RE.is_match(line)
}

/// Splits "Degree in Field" / "Degree of Field"; returns the whole line as
/// the degree when neither pattern applies.
fn split_degree_field(line: &str) -> (String, Option<String>) {
    let cleaned = line
        .trim()
        .trim_end_matches([',', '.', '|'])
        .trim()
        .to_string();

    if let Some(caps) = DEGREE_IN_FIELD_RE.captures(&cleaned) {
        return (caps[1].trim().to_string(), Some(caps[2].trim().to_string()));
    }
    if let Some(caps) = DEGREE_OF_FIELD_RE.captures(&cleaned) {
        return (caps[1].trim().to_string(), Some(caps[2].trim().to_string()));
    }
    (cleaned, None)
}
