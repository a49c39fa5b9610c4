//! Date parsing for resume entries.
//!
//! Only three input shapes are recognized: `Month YYYY`, bare `YYYY`, and
//! `MM/YYYY`. Everything else returns None. "Present"/"Current" also return
//! None; the caller tracks the open-ended flag separately.

use std::sync::LazyLock;

use regex::Regex;

const MONTH_PREFIX: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

/// A date range like "Jan 2020 - Present", "2018 – 2020", or "01/2019 to 12/2021".
/// The open end accepts "Present"/"Current" in any case.
pub static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let token = format!(r"(?:{MONTH_PREFIX})[a-z]*\.?\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}}");
    Regex::new(&format!(
        r"(?i)\b({token})\s*(?:[-–—]|to|through)\s*({token}|present|current)\b"
    ))
    .unwrap()
});

static MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{3,9})\.?\s+(\d{4})$").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

static MM_YYYY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{4})$").unwrap());

const MONTHS: &[(&str, &str)] = &[
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// True for "present"/"current" in any case.
pub fn is_open_ended(token: &str) -> bool {
    let t = token.trim().to_lowercase();
    t == "present" || t == "current"
}

/// Parses a single date token to `YYYY-MM`.
///
/// "present"/"current" and unrecognized inputs return None.
pub fn parse_date(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() || is_open_ended(&token) {
        return None;
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(&token) {
        let name = &caps[1];
        let prefix = &name[..3.min(name.len())];
        let month = MONTHS.iter().find(|(m, _)| *m == prefix)?.1;
        return Some(format!("{}-{}", &caps[2], month));
    }

    if YEAR_RE.is_match(&token) {
        return Some(format!("{token}-01"));
    }

    if let Some(caps) = MM_YYYY_RE.captures(&token) {
        let month: u32 = caps[1].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        return Some(format!("{}-{:02}", &caps[2], month));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_year_full_name() {
        assert_eq!(parse_date("January 2020"), Some("2020-01".to_string()));
        assert_eq!(parse_date("September 2019"), Some("2019-09".to_string()));
    }

    #[test]
    fn test_month_year_abbreviated() {
        assert_eq!(parse_date("Jan 2020"), Some("2020-01".to_string()));
        assert_eq!(parse_date("Dec 2021"), Some("2021-12".to_string()));
        assert_eq!(parse_date("Sep. 2018"), Some("2018-09".to_string()));
    }

    #[test]
    fn test_bare_year_maps_to_january() {
        assert_eq!(parse_date("2016"), Some("2016-01".to_string()));
    }

    #[test]
    fn test_numeric_month_slash_year() {
        assert_eq!(parse_date("3/2021"), Some("2021-03".to_string()));
        assert_eq!(parse_date("11/2019"), Some("2019-11".to_string()));
    }

    #[test]
    fn test_present_and_current_return_none() {
        assert_eq!(parse_date("Present"), None);
        assert_eq!(parse_date("CURRENT"), None);
        assert_eq!(parse_date("present"), None);
    }

    #[test]
    fn test_unrecognized_returns_none() {
        assert_eq!(parse_date("sometime in 2020"), None);
        assert_eq!(parse_date("20/2020"), None);
        assert_eq!(parse_date("Foo 2020"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_output_shape_for_all_supported_forms() {
        let shape = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
        for input in ["March 2022", "2019", "7/2020", "Oct 2015", "12/1999"] {
            let parsed = parse_date(input).unwrap_or_else(|| panic!("{input} did not parse"));
            assert!(shape.is_match(&parsed), "{input} produced {parsed}");
        }
    }

    #[test]
    fn test_range_regex_matches_common_forms() {
        for line in [
            "Jan 2020 - Present",
            "January 2018 – March 2020",
            "2016-2020",
            "01/2019 to 12/2021",
            "Senior Engineer at Acme Inc | Jan 2020 - Present",
            "Oct 2017 through current",
        ] {
            assert!(DATE_RANGE_RE.is_match(line), "no range found in {line:?}");
        }
    }

    #[test]
    fn test_range_regex_captures_both_ends() {
        let caps = DATE_RANGE_RE.captures("Jan 2020 - Present").unwrap();
        assert_eq!(&caps[1], "Jan 2020");
        assert_eq!(&caps[2], "Present");
        assert!(is_open_ended(&caps[2]));
    }

    #[test]
    fn test_range_regex_ignores_plain_prose() {
        assert!(!DATE_RANGE_RE.is_match("Worked on many projects"));
        assert!(!DATE_RANGE_RE.is_match("Improved latency by 40%"));
    }
}
