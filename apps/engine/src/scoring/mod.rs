//! ATS scoring engine.
//!
//! Four sub-scores computed independently, combined with fixed weights into
//! an overall 0-100 score. A pure function of its inputs: no state, no
//! failure path, safe to recompute on every edit.

pub mod completeness;
pub mod content;
pub mod formatting;
pub mod keywords;

use tracing::debug;

use crate::models::resume::ResumeData;
use crate::models::score::{AtsScore, ScoreBreakdown, Suggestion};

const WEIGHT_COMPLETENESS: f64 = 0.35;
const WEIGHT_KEYWORDS: f64 = 0.30;
const WEIGHT_FORMATTING: f64 = 0.20;
const WEIGHT_CONTENT: f64 = 0.15;

pub fn calculate_ats_score(resume: &ResumeData, job_description: Option<&str>) -> AtsScore {
    let (completeness, mut suggestions) = completeness::score(resume);
    let (keywords, keyword_suggestions, matched_keywords, missing_keywords) =
        keywords::score(resume, job_description);
    let (formatting, formatting_suggestions) = formatting::score(resume);
    let (content, content_suggestions) = content::score(resume);

    suggestions.extend(keyword_suggestions);
    suggestions.extend(formatting_suggestions);
    suggestions.extend(content_suggestions);
    sort_suggestions(&mut suggestions);

    let overall = (f64::from(completeness) * WEIGHT_COMPLETENESS
        + f64::from(keywords) * WEIGHT_KEYWORDS
        + f64::from(formatting) * WEIGHT_FORMATTING
        + f64::from(content) * WEIGHT_CONTENT)
        .round() as u8;

    debug!(
        overall,
        completeness, keywords, formatting, content, "computed ats score"
    );

    AtsScore {
        overall,
        breakdown: ScoreBreakdown {
            completeness,
            keywords,
            formatting,
            content,
        },
        suggestions,
        matched_keywords,
        missing_keywords,
    }
}

/// Stable sort by category so critical items lead while insertion order is
/// preserved within a category.
fn sort_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| s.category);
}
