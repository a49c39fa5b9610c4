//! Content-quality sub-score: deductions from 100 for thin or redundant
//! material.

use std::collections::HashSet;

use crate::models::resume::ResumeData;
use crate::models::score::{Suggestion, SuggestionCategory};

const DEDUCT_THIN_DESCRIPTIONS: u32 = 20;
const DEDUCT_DUPLICATE_SKILLS: u32 = 10;
const DEDUCT_NO_EXTRAS: u32 = 10;

const AVG_DESCRIPTION_MIN_CHARS: usize = 100;

pub fn score(resume: &ResumeData) -> (u8, Vec<Suggestion>) {
    let mut deductions = 0u32;
    let mut suggestions = Vec::new();

    if !resume.experience.is_empty() {
        let total: usize = resume
            .experience
            .iter()
            .map(|e| e.description.trim().chars().count())
            .sum();
        let average = total / resume.experience.len();
        if average < AVG_DESCRIPTION_MIN_CHARS {
            deductions += DEDUCT_THIN_DESCRIPTIONS;
            suggestions.push(
                Suggestion::new(
                    "thin-content",
                    SuggestionCategory::Important,
                    "experience",
                    "Your role descriptions are brief; expand each with concrete accomplishments.",
                )
                .with_action("Aim for 2-4 substantial bullet points per position"),
            );
        }
    }

    let mut seen = HashSet::new();
    let has_duplicates = resume
        .skills
        .iter()
        .any(|skill| !seen.insert(skill.trim().to_lowercase()));
    if has_duplicates {
        deductions += DEDUCT_DUPLICATE_SKILLS;
        suggestions.push(Suggestion::new(
            "duplicate-skills",
            SuggestionCategory::Optional,
            "skills",
            "Your skills list contains duplicates; remove the repeats.",
        ));
    }

    if resume.projects.is_empty() && resume.certifications.is_empty() {
        deductions += DEDUCT_NO_EXTRAS;
        suggestions.push(Suggestion::new(
            "no-extras",
            SuggestionCategory::Optional,
            "projects",
            "Projects or certifications help you stand out; add one if you can.",
        ));
    }

    (100u32.saturating_sub(deductions) as u8, suggestions)
}
