//! Completeness sub-score: additive points for fields that are present,
//! capped at 100, with a suggestion for every shortfall.

use crate::models::resume::ResumeData;
use crate::models::score::{Suggestion, SuggestionCategory};

/// Point table. Each rule is additive and independent.
const POINTS_NAME: u32 = 5;
const POINTS_EMAIL: u32 = 5;
const POINTS_PHONE: u32 = 5;
const POINTS_LOCATION: u32 = 5;
const POINTS_JOB_TITLE: u32 = 5;
const POINTS_SUMMARY_FULL: u32 = 5;
const POINTS_SUMMARY_SHORT: u32 = 2;
const POINTS_EXPERIENCE_MANY: u32 = 15;
const POINTS_EXPERIENCE_ONE: u32 = 8;
const POINTS_DESCRIPTIONS_ALL: u32 = 15;
const POINTS_DESCRIPTIONS_SOME: u32 = 8;
const POINTS_EDUCATION: u32 = 15;
const POINTS_SKILLS_MANY: u32 = 25;
const POINTS_SKILLS_SOME: u32 = 18;
const POINTS_SKILLS_FEW: u32 = 10;

const SUMMARY_MIN_CHARS: usize = 50;
const DESCRIPTION_MIN_CHARS: usize = 50;
const EXPERIENCE_MANY_THRESHOLD: usize = 2;
const SKILLS_MANY_THRESHOLD: usize = 8;
const SKILLS_SOME_THRESHOLD: usize = 5;
const MAX_SCORE: u32 = 100;

pub fn score(resume: &ResumeData) -> (u8, Vec<Suggestion>) {
    let mut points = 0u32;
    let mut suggestions = Vec::new();

    if resume.personal.full_name.trim().is_empty() {
        suggestions.push(Suggestion::new(
            "missing-name",
            SuggestionCategory::Critical,
            "personal",
            "Your name is missing.",
        ));
    } else {
        points += POINTS_NAME;
    }

    if resume.personal.email.trim().is_empty() {
        suggestions.push(Suggestion::new(
            "missing-email",
            SuggestionCategory::Critical,
            "personal",
            "Add an email address so recruiters can reach you.",
        ));
    } else {
        points += POINTS_EMAIL;
    }

    if resume.personal.phone.trim().is_empty() {
        suggestions.push(Suggestion::new(
            "missing-phone",
            SuggestionCategory::Important,
            "personal",
            "Add a phone number.",
        ));
    } else {
        points += POINTS_PHONE;
    }

    if resume.personal.location.trim().is_empty() {
        suggestions.push(Suggestion::new(
            "missing-location",
            SuggestionCategory::Optional,
            "personal",
            "Adding a location helps with geographically filtered searches.",
        ));
    } else {
        points += POINTS_LOCATION;
    }

    if resume.personal.job_title.trim().is_empty() {
        suggestions.push(Suggestion::new(
            "missing-title",
            SuggestionCategory::Important,
            "personal",
            "Add a job title under your name.",
        ));
    } else {
        points += POINTS_JOB_TITLE;
    }

    let summary = resume.summary.trim();
    if summary.is_empty() {
        suggestions.push(
            Suggestion::new(
                "missing-summary",
                SuggestionCategory::Important,
                "summary",
                "Add a professional summary.",
            )
            .with_action("Write 2-3 sentences highlighting your experience and strengths"),
        );
    } else if summary.chars().count() < SUMMARY_MIN_CHARS {
        points += POINTS_SUMMARY_SHORT;
        suggestions.push(Suggestion::new(
            "short-summary",
            SuggestionCategory::Important,
            "summary",
            "Your summary is very short; expand it to at least a couple of sentences.",
        ));
    } else {
        points += POINTS_SUMMARY_FULL;
    }

    match resume.experience.len() {
        0 => suggestions.push(
            Suggestion::new(
                "no-experience",
                SuggestionCategory::Critical,
                "experience",
                "No work experience listed.",
            )
            .with_action("Add at least one position, even internships or volunteer work"),
        ),
        1 => {
            points += POINTS_EXPERIENCE_ONE;
            suggestions.push(Suggestion::new(
                "one-experience",
                SuggestionCategory::Optional,
                "experience",
                "Only one position listed; add more if you have them.",
            ));
        }
        _ => points += POINTS_EXPERIENCE_MANY,
    }

    if !resume.experience.is_empty() {
        let with_description = resume
            .experience
            .iter()
            .filter(|e| e.description.trim().chars().count() >= DESCRIPTION_MIN_CHARS)
            .count();
        if with_description == resume.experience.len() {
            points += POINTS_DESCRIPTIONS_ALL;
        } else if with_description > 0 {
            points += POINTS_DESCRIPTIONS_SOME;
            suggestions.push(Suggestion::new(
                "thin-descriptions",
                SuggestionCategory::Important,
                "experience",
                "Some positions have little or no description; describe what you did in each.",
            ));
        } else {
            suggestions.push(Suggestion::new(
                "no-descriptions",
                SuggestionCategory::Important,
                "experience",
                "Your positions have no real descriptions; add bullet points for each.",
            ));
        }
    }

    if resume.education.is_empty() {
        suggestions.push(Suggestion::new(
            "no-education",
            SuggestionCategory::Important,
            "education",
            "No education listed.",
        ));
    } else {
        points += POINTS_EDUCATION;
    }

    match resume.skills.len() {
        0 => suggestions.push(
            Suggestion::new(
                "no-skills",
                SuggestionCategory::Critical,
                "skills",
                "No skills listed.",
            )
            .with_action("Add 8-12 skills relevant to your target role"),
        ),
        n if n >= SKILLS_MANY_THRESHOLD => points += POINTS_SKILLS_MANY,
        n if n >= SKILLS_SOME_THRESHOLD => {
            points += POINTS_SKILLS_SOME;
            suggestions.push(Suggestion::new(
                "few-skills",
                SuggestionCategory::Optional,
                "skills",
                "Consider listing a few more skills.",
            ));
        }
        _ => {
            points += POINTS_SKILLS_FEW;
            suggestions.push(Suggestion::new(
                "few-skills",
                SuggestionCategory::Important,
                "skills",
                "Your skills list is sparse; aim for at least 8 relevant skills.",
            ));
        }
    }

    (points.min(MAX_SCORE) as u8, suggestions)
}
