//! Experience parsing: an incremental state machine over section lines.
//!
//! A date-range line opens a new entry; following lines become the company
//! (org-suffix keyword), bullets, or bullet continuations until the next
//! date-range line or end-of-section closes the entry out.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::parsed::ParsedExperience;
use crate::parser::dates::{is_open_ended, parse_date, DATE_RANGE_RE};
use crate::parser::sections::{contains_company_suffix, is_heading_line};

/// "Position at Company | <dates>"
static POSITION_AT_COMPANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+at\s+(.+)$").unwrap());

/// "Position, Company <dates>"
static POSITION_COMMA_COMPANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?),\s*(.+)$").unwrap());

pub(crate) const BULLET_PREFIXES: &[char] = &['-', '•', '*', '·', '●', '▪', '‣', '–'];

/// Unprefixed lines shorter than this are ignored rather than treated as
/// bullet continuations.
const MIN_CONTINUATION_CHARS: usize = 20;

const DEFAULT_COMPANY: &str = "Unknown Company";
const DEFAULT_POSITION: &str = "Unknown Position";

#[derive(Debug, Default)]
struct EntryBuilder {
    company: Option<String>,
    position: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    current: bool,
    bullets: Vec<String>,
}

impl EntryBuilder {
    /// Closes the entry out. Entries where neither a company nor a position
    /// was detected are dropped; a missing one of the two gets a placeholder.
    fn finalize(self) -> Option<ParsedExperience> {
        if self.company.is_none() && self.position.is_none() {
            return None;
        }
        Some(ParsedExperience {
            company: self.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            position: self.position.unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            start_date: self.start_date,
            end_date: self.end_date,
            current: self.current,
            description: self.bullets.join("\n"),
            bullets: self.bullets,
        })
    }
}

pub(crate) fn is_bullet_line(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_PREFIXES)
}

pub(crate) fn strip_bullet(line: &str) -> String {
    line.trim()
        .trim_start_matches(BULLET_PREFIXES)
        .trim()
        .to_string()
}

pub fn parse_experience_section(content: &str) -> Vec<ParsedExperience> {
    let mut entries: Vec<ParsedExperience> = Vec::new();
    let mut builder: Option<EntryBuilder> = None;
    // Most recent non-bulleted, non-date line; position fallback for the
    // "dates on their own line" layout.
    let mut last_plain_line: Option<String> = None;

    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        // A leading header line that re-matches the section heading is noise.
        if i == 0 && is_heading_line(line) {
            continue;
        }

        if let Some(range) = DATE_RANGE_RE.captures(line) {
            if let Some(done) = builder.take() {
                entries.extend(done.finalize());
            }

            let whole = range.get(0).map(|m| m.range()).unwrap_or(0..0);
            let mut next = EntryBuilder {
                start_date: parse_date(&range[1]),
                current: is_open_ended(&range[2]),
                ..Default::default()
            };
            if !next.current {
                next.end_date = parse_date(&range[2]);
            }

            let prefix = line[..whole.start]
                .trim()
                .trim_end_matches(['|', '•', ',', '-', '–', '—', ' '])
                .trim();
            if !prefix.is_empty() {
                if let Some(caps) = POSITION_AT_COMPANY_RE.captures(prefix) {
                    next.position = Some(caps[1].trim().to_string());
                    next.company = Some(caps[2].trim().to_string());
                } else if let Some(caps) = POSITION_COMMA_COMPANY_RE.captures(prefix) {
                    next.position = Some(caps[1].trim().to_string());
                    next.company = Some(caps[2].trim().to_string());
                } else {
                    next.position = Some(prefix.to_string());
                }
            }
            if next.position.is_none() {
                next.position = last_plain_line.take();
            }

            builder = Some(next);
            continue;
        }

        if let Some(entry) = builder.as_mut() {
            if entry.company.is_none() && !is_bullet_line(line) && contains_company_suffix(line) {
                entry.company = Some(line.to_string());
            } else if is_bullet_line(line) {
                entry.bullets.push(strip_bullet(line));
            } else if line.chars().count() >= MIN_CONTINUATION_CHARS {
                match entry.bullets.last_mut() {
                    Some(last) => {
                        last.push(' ');
                        last.push_str(line);
                    }
                    None => entry.bullets.push(line.to_string()),
                }
            }
        }

        if !is_bullet_line(line) {
            last_plain_line = Some(line.to_string());
        }
    }

    if let Some(done) = builder.take() {
        entries.extend(done.finalize());
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_company_with_pipe_dates() {
        let entries =
            parse_experience_section("Senior Engineer at Acme Inc | Jan 2020 - Present\n- Led migration reducing latency by 40%");
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.position, "Senior Engineer");
        assert_eq!(e.company, "Acme Inc");
        assert_eq!(e.start_date.as_deref(), Some("2020-01"));
        assert!(e.current);
        assert!(e.end_date.is_none());
        assert_eq!(e.bullets.len(), 1);
        assert!(e.bullets[0].contains("40%"));
    }

    #[test]
    fn test_position_comma_company() {
        let entries = parse_experience_section("Backend Developer, Globex 2018 - 2020\n- Built billing pipeline handling 2M events");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].position, "Backend Developer");
        assert_eq!(entries[0].company, "Globex");
        assert_eq!(entries[0].start_date.as_deref(), Some("2018-01"));
        assert_eq!(entries[0].end_date.as_deref(), Some("2020-01"));
        assert!(!entries[0].current);
    }

    #[test]
    fn test_preceding_line_becomes_position() {
        let content = "Staff Engineer\nMar 2019 - Present\nInitech Corp\n- Owned the deployment platform for 30 services";
        let entries = parse_experience_section(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].position, "Staff Engineer");
        assert_eq!(entries[0].company, "Initech Corp");
    }

    #[test]
    fn test_company_from_org_suffix_line() {
        let content = "Engineer at Nowhere | Jan 2020 - Dec 2020";
        let entries = parse_experience_section(content);
        assert_eq!(entries[0].company, "Nowhere");

        let content = "Platform Engineer\n2020 - 2021\nHooli LLC\n- Scaled ingestion to 100k requests per second";
        let entries = parse_experience_section(content);
        assert_eq!(entries[0].company, "Hooli LLC");
    }

    #[test]
    fn test_multiple_entries_split_on_date_lines() {
        let content = "Senior Engineer at Acme Inc | Jan 2020 - Present\n- Led replatforming across 4 teams\nEngineer at Globex Corp | Jun 2017 - Dec 2019\n- Shipped the v2 API used by 200 customers";
        let entries = parse_experience_section(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "Acme Inc");
        assert_eq!(entries[1].company, "Globex Corp");
        assert_eq!(entries[1].end_date.as_deref(), Some("2019-12"));
    }

    #[test]
    fn test_unprefixed_long_line_continues_last_bullet() {
        let content = "Engineer at Acme Inc | 2020 - 2021\n- Reduced infra spend by 30%\nthrough rightsizing and reserved capacity planning";
        let entries = parse_experience_section(content);
        assert_eq!(entries[0].bullets.len(), 1);
        assert!(entries[0].bullets[0].contains("rightsizing"));
    }

    #[test]
    fn test_bare_line_becomes_first_bullet() {
        let content = "Engineer at Acme Inc | 2020 - 2021\nResponsible for the full data platform stack";
        let entries = parse_experience_section(content);
        assert_eq!(entries[0].bullets.len(), 1);
    }

    #[test]
    fn test_entry_without_company_or_position_dropped() {
        let content = "Jan 2020 - Dec 2020\n- Did some things worth mentioning here";
        let entries = parse_experience_section(content);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_company_gets_placeholder() {
        let content = "Senior Engineer\nJan 2020 - Dec 2020\n- Shipped three internal tools used daily";
        let entries = parse_experience_section(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Unknown Company");
        assert_eq!(entries[0].position, "Senior Engineer");
    }

    #[test]
    fn test_description_is_newline_joined_bullets() {
        let content = "Engineer at Acme Inc | 2020 - 2021\n- First bullet with numbers 10%\n- Second bullet with numbers 20%";
        let entries = parse_experience_section(content);
        assert_eq!(
            entries[0].description,
            "First bullet with numbers 10%\nSecond bullet with numbers 20%"
        );
    }

    #[test]
    fn test_leading_section_heading_skipped() {
        let content = "Work Experience\nEngineer at Acme Inc | 2020 - 2021\n- Maintained the payments service fleet";
        let entries = parse_experience_section(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Acme Inc");
    }

    #[test]
    fn test_empty_section() {
        assert!(parse_experience_section("").is_empty());
    }
}
