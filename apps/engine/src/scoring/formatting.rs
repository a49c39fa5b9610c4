//! Formatting sub-score: deductions from 100 for structure problems that
//! trip up automated resume parsers. Experience-related checks only apply
//! when experience entries exist.

use crate::models::resume::ResumeData;
use crate::models::score::{Suggestion, SuggestionCategory};

const DEDUCT_LONG_SUMMARY: u32 = 10;
const DEDUCT_NO_BULLETS: u32 = 15;
const DEDUCT_NO_NUMBERS: u32 = 20;
const DEDUCT_NO_ACTION_VERBS: u32 = 15;

const SUMMARY_MAX_CHARS: usize = 500;

const ACTION_VERBS: &[&str] = &[
    "achieved", "built", "created", "delivered", "designed", "developed", "drove", "enabled",
    "established", "implemented", "improved", "increased", "launched", "led", "maintained",
    "managed", "mentored", "optimized", "owned", "reduced", "scaled", "shipped", "streamlined",
];

pub fn score(resume: &ResumeData) -> (u8, Vec<Suggestion>) {
    let mut deductions = 0u32;
    let mut suggestions = Vec::new();

    if resume.summary.trim().chars().count() > SUMMARY_MAX_CHARS {
        deductions += DEDUCT_LONG_SUMMARY;
        suggestions.push(Suggestion::new(
            "long-summary",
            SuggestionCategory::Important,
            "summary",
            "Your summary is over 500 characters; tighten it to a few sentences.",
        ));
    }

    if !resume.experience.is_empty() {
        let descriptions: Vec<&str> = resume
            .experience
            .iter()
            .map(|e| e.description.as_str())
            .collect();

        let has_bullet_structure = descriptions
            .iter()
            .any(|d| d.contains('\n') || d.contains('•') || d.contains('-'));
        if !has_bullet_structure {
            deductions += DEDUCT_NO_BULLETS;
            suggestions.push(
                Suggestion::new(
                    "no-bullets",
                    SuggestionCategory::Important,
                    "experience",
                    "Descriptions read as blocks of text; break them into bullet points.",
                )
                .with_action("Start each line with a dash or bullet character"),
            );
        }

        let has_numbers = descriptions
            .iter()
            .any(|d| d.contains('%') || d.chars().any(|c| c.is_ascii_digit()));
        if !has_numbers {
            deductions += DEDUCT_NO_NUMBERS;
            suggestions.push(
                Suggestion::new(
                    "no-metrics",
                    SuggestionCategory::Important,
                    "experience",
                    "No numbers in your descriptions; quantify your impact.",
                )
                .with_action("Add percentages, counts, or dollar amounts to your bullet points"),
            );
        }

        let has_action_verb = descriptions.iter().any(|d| {
            let lower = d.to_lowercase();
            ACTION_VERBS.iter().any(|verb| lower.contains(verb))
        });
        if !has_action_verb {
            deductions += DEDUCT_NO_ACTION_VERBS;
            suggestions.push(Suggestion::new(
                "no-action-verbs",
                SuggestionCategory::Important,
                "experience",
                "Start bullet points with strong action verbs like led, built, or reduced.",
            ));
        }
    }

    (100u32.saturating_sub(deductions) as u8, suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceRecord;

    fn resume_with_description(description: &str) -> ResumeData {
        ResumeData {
            experience: vec![ExperienceRecord {
                id: "exp-0".to_string(),
                description: description.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_well_formatted_scores_100() {
        let resume =
            resume_with_description("- Led migration cutting p99 latency by 40%\n- Built CI pipeline");
        let (score, suggestions) = score(&resume);
        assert_eq!(score, 100);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_no_experience_skips_experience_checks() {
        let (score, suggestions) = score(&ResumeData::default());
        assert_eq!(score, 100);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_long_summary_deducts_10() {
        let mut resume = resume_with_description("- Led work on 3 services");
        resume.summary = "x".repeat(501);
        let (score, suggestions) = score(&resume);
        assert_eq!(score, 90);
        assert!(suggestions.iter().any(|s| s.id == "long-summary"));
    }

    #[test]
    fn test_no_bullet_structure_deducts_15() {
        let resume = resume_with_description("Led a team of 4 engineers shipping weekly");
        let (score, _) = score(&resume);
        // no newline, bullet, or hyphen
        assert_eq!(score, 85);
    }

    #[test]
    fn test_no_numbers_deducts_20() {
        let resume = resume_with_description("- Led the platform team\n- Built tooling");
        let (score, suggestions) = score(&resume);
        assert_eq!(score, 80);
        assert!(suggestions.iter().any(|s| s.id == "no-metrics"));
    }

    #[test]
    fn test_no_action_verbs_deducts_15() {
        let resume = resume_with_description("- Responsible for 3 internal services");
        let (score, suggestions) = score(&resume);
        assert_eq!(score, 85);
        assert!(suggestions.iter().any(|s| s.id == "no-action-verbs"));
    }

    #[test]
    fn test_deductions_stack() {
        let resume = resume_with_description("Responsible for things");
        let (score, _) = score(&resume);
        // no bullets, no numbers, no action verbs
        assert_eq!(score, 50);
    }
}
