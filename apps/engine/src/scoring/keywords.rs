//! Keyword sub-score: overlap between job-description keywords and the
//! resume's text. Without a job description there is nothing to match
//! against, so a neutral default applies.

use std::collections::HashMap;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ResumeData;
use crate::models::score::{Suggestion, SuggestionCategory};

/// Score used when no job description was supplied.
pub const NO_JOB_DESCRIPTION_DEFAULT: u8 = 70;

/// Only the top keywords by weight are matched.
const MAX_KEYWORDS: usize = 50;

/// Missing-keyword list shown to the user is capped.
const MISSING_KEYWORDS_CAP: usize = 20;

const CRITICAL_MATCH_THRESHOLD: u8 = 50;
const IMPORTANT_MATCH_THRESHOLD: u8 = 70;

/// Weight boost for tokens in the curated vocabulary.
const VOCAB_WEIGHT: u32 = 5;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9][a-z0-9+#.\-]*").unwrap());

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "do", "for", "from",
    "has", "have", "if", "in", "into", "is", "it", "its", "of", "on", "or", "our", "should",
    "that", "the", "their", "this", "to", "was", "we", "were", "will", "with", "you", "your",
    "ability", "able", "etc", "including", "job", "more", "must", "new", "other", "plus",
    "preferred", "required", "requirements", "responsibilities", "role", "strong", "team",
    "work", "working", "years", "experience",
];

/// Curated technical and soft-skill vocabulary; membership boosts a token's
/// weight so real skills outrank filler words.
const KEYWORD_VOCAB: &[&str] = &[
    "agile", "analytics", "angular", "ansible", "api", "automation", "aws", "azure", "backend",
    "c++", "c#", "ci/cd", "cloud", "communication", "css", "data", "database", "devops",
    "django", "docker", "elasticsearch", "frontend", "gcp", "git", "go", "graphql", "html",
    "java", "javascript", "jenkins", "kafka", "kubernetes", "leadership", "linux",
    "machine-learning", "mentoring", "microservices", "mongodb", "mysql", "node.js", "php",
    "postgresql", "python", "react", "redis", "rest", "ruby", "rust", "scala", "scrum",
    "security", "spark", "sql", "swift", "terraform", "testing", "typescript", "vue",
];

/// Score, suggestions, matched keywords, missing keywords.
pub fn score(
    resume: &ResumeData,
    job_description: Option<&str>,
) -> (u8, Vec<Suggestion>, Vec<String>, Vec<String>) {
    let Some(jd) = job_description.map(str::trim).filter(|jd| !jd.is_empty()) else {
        return (NO_JOB_DESCRIPTION_DEFAULT, Vec::new(), Vec::new(), Vec::new());
    };

    let keywords = extract_keywords(jd);
    if keywords.is_empty() {
        return (0, Vec::new(), Vec::new(), Vec::new());
    }

    let resume_text = flatten_resume(resume).to_lowercase();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in &keywords {
        if resume_text.contains(keyword.as_str()) {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }
    missing.truncate(MISSING_KEYWORDS_CAP);

    let rate = (matched.len() as f64 / keywords.len() as f64 * 100.0).round() as u8;

    let mut suggestions = Vec::new();
    if rate < CRITICAL_MATCH_THRESHOLD {
        suggestions.push(
            Suggestion::new(
                "low-keyword-match",
                SuggestionCategory::Critical,
                "keywords",
                format!("Only {rate}% of the job's keywords appear in your resume."),
            )
            .with_action("Work missing keywords into your summary, skills, and bullet points"),
        );
    } else if rate < IMPORTANT_MATCH_THRESHOLD {
        suggestions.push(Suggestion::new(
            "moderate-keyword-match",
            SuggestionCategory::Important,
            "keywords",
            format!("{rate}% keyword match; adding a few more would strengthen the fit."),
        ));
    }

    (rate, suggestions, matched, missing)
}

/// Tokenizes, strips stopwords, weights by frequency plus vocabulary
/// membership, and keeps the top candidates by weight.
fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for m in TOKEN_RE.find_iter(&lower) {
        let token = m.as_str().trim_end_matches('.');
        if token.len() < 2 || STOPWORDS.contains(&token) {
            continue;
        }
        *counts.entry(token).or_default() += 1;
    }

    let mut weighted: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(token, freq)| {
            let vocab_boost = if KEYWORD_VOCAB.contains(&token) {
                VOCAB_WEIGHT
            } else {
                0
            };
            (token.to_string(), freq + vocab_boost)
        })
        .collect();

    // Weight descending, token ascending for determinism at equal weight.
    weighted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    weighted.truncate(MAX_KEYWORDS);
    weighted.into_iter().map(|(token, _)| token).collect()
}

/// All resume text a keyword could legitimately appear in.
fn flatten_resume(resume: &ResumeData) -> String {
    let mut parts: Vec<&str> = vec![
        &resume.personal.job_title,
        &resume.summary,
    ];
    for e in &resume.experience {
        parts.push(&e.position);
        parts.push(&e.description);
    }
    for e in &resume.education {
        parts.push(&e.degree);
        parts.push(&e.field);
        parts.push(&e.description);
    }
    for s in &resume.skills {
        parts.push(s);
    }
    for p in &resume.projects {
        parts.push(&p.name);
        parts.push(&p.description);
        for t in &p.technologies {
            parts.push(t);
        }
    }
    for c in &resume.certifications {
        parts.push(&c.name);
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with_skills(skills: &[&str]) -> ResumeData {
        ResumeData {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_job_description_defaults_to_70() {
        let (score, suggestions, matched, missing) = score(&ResumeData::default(), None);
        assert_eq!(score, 70);
        assert!(suggestions.is_empty());
        assert!(matched.is_empty());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_blank_job_description_same_as_none() {
        let (score, _, _, _) = score(&ResumeData::default(), Some("   "));
        assert_eq!(score, 70);
    }

    #[test]
    fn test_full_match_scores_100() {
        let resume = resume_with_skills(&["Rust", "Kubernetes", "PostgreSQL"]);
        let (score, suggestions, matched, missing) =
            score(&resume, Some("rust kubernetes postgresql"));
        assert_eq!(score, 100);
        assert!(suggestions.is_empty());
        assert_eq!(matched.len(), 3);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_no_match_scores_0_with_critical() {
        let resume = resume_with_skills(&["Cooking"]);
        let (score, suggestions, _, missing) = score(&resume, Some("rust kubernetes postgresql"));
        assert_eq!(score, 0);
        assert_eq!(suggestions[0].category, SuggestionCategory::Critical);
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn test_stopwords_excluded_from_keywords() {
        let keywords = extract_keywords("we are looking for experience with the rust language");
        assert!(keywords.contains(&"rust".to_string()));
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"experience".to_string()));
    }

    #[test]
    fn test_vocab_terms_outrank_filler_at_equal_frequency() {
        let mut text = String::from("kubernetes widget ");
        // 60 distinct filler tokens push past the keep limit
        for i in 0..60 {
            text.push_str(&format!("filler{i:02} "));
        }
        let keywords = extract_keywords(&text);
        assert!(keywords.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_adding_missing_keyword_never_lowers_score() {
        let jd = "rust kubernetes postgresql terraform grafana";
        let base = resume_with_skills(&["Rust"]);
        let (before, _, _, missing) = score(&base, Some(jd));

        let mut improved = base.clone();
        improved.skills.push(missing[0].clone());
        let (after, _, _, _) = score(&improved, Some(jd));
        assert!(after >= before);
    }

    #[test]
    fn test_missing_list_capped_at_20() {
        let jd: String = (0..40).map(|i| format!("uniqueterm{i:02} ")).collect();
        let (_, _, _, missing) = score(&ResumeData::default(), Some(&jd));
        assert_eq!(missing.len(), 20);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let resume = resume_with_skills(&["RUST"]);
        let (score, _, matched, _) = score(&resume, Some("Rust"));
        assert_eq!(score, 100);
        assert_eq!(matched, vec!["rust".to_string()]);
    }
}
