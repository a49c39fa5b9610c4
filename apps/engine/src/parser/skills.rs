//! Skills parsing: best-of-N delimiter selection.
//!
//! Each delimiter in priority order produces a candidate token set; the
//! delimiter yielding the most plausible tokens wins. Note the inherent bias
//! toward whichever split produces more pieces.

use crate::parser::sections::is_heading_line;

/// Priority-ordered delimiter strategies.
const DELIMITERS: &[&str] = &[",", "|", "•", "·", "●", "\n", ";"];

/// Plausible token length: strictly between 1 and 50 characters.
const MIN_TOKEN_CHARS: usize = 2;
const MAX_TOKEN_CHARS: usize = 49;

const BULLET_PREFIXES: &[char] = &['-', '•', '*', '·', '●', '▪', '‣', '–'];

/// Splits a skills section body into individual skills.
///
/// The winning delimiter is whichever produces the largest candidate set;
/// the result is deduplicated case-insensitively, preserving first-seen
/// order for determinism.
pub fn parse_skills(content: &str) -> Vec<String> {
    let mut best: Vec<String> = Vec::new();
    for delimiter in DELIMITERS {
        let candidates = split_candidates(content, delimiter);
        if candidates.len() > best.len() {
            best = candidates;
        }
    }

    let mut seen: Vec<String> = Vec::new();
    let mut skills: Vec<String> = Vec::new();
    for skill in best {
        let key = skill.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            skills.push(skill);
        }
    }
    skills
}

fn split_candidates(content: &str, delimiter: &str) -> Vec<String> {
    content
        .split(delimiter)
        .map(clean_token)
        .filter(|token| is_plausible(token))
        .collect()
}

fn clean_token(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(BULLET_PREFIXES)
        .trim()
        .to_string()
}

fn is_plausible(token: &str) -> bool {
    let len = token.chars().count();
    (MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&len) && !is_heading_line(token)
}
