//! Resume parsing pipeline.
//!
//! `parse_resume_file` runs the whole import: format detection, text
//! extraction, section detection, per-section parsing, and assembly into a
//! `ParsedResume` with a confidence score and soft warnings. The pipeline
//! never fails on bad content; only unsupported formats, broken files, and
//! effectively empty documents are terminal.

pub mod certifications;
pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod projects;
pub mod sections;
pub mod skills;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::info;

use crate::errors::ParseError;
use crate::extract::{extract_file, ResumeFile};
use crate::models::parsed::{ParseInfo, ParseSource, ParsedResume};
use crate::models::resume::{
    CertificationRecord, EducationRecord, ExperienceRecord, PersonalInfo, ProfileLink,
    ProjectRecord, ResumeData,
};
use sections::{detect_sections, SectionType};

/// Documents with fewer trimmed characters than this are treated as empty
/// (scanned or image-only files usually land here).
const MIN_TEXT_CHARS: usize = 50;

/// Confidence model: a base for any parseable document plus a boost per
/// high-signal field that was actually extracted.
const CONFIDENCE_BASE: u32 = 50;
const CONFIDENCE_NAME_BOOST: u32 = 10;
const CONFIDENCE_TITLE_BOOST: u32 = 5;
const CONFIDENCE_EMAIL_BOOST: u32 = 10;
const CONFIDENCE_EXPERIENCE_BOOST: u32 = 15;
const CONFIDENCE_EDUCATION_BOOST: u32 = 10;
const CONFIDENCE_MAX: u32 = 100;

/// Parses an uploaded resume file end to end.
pub async fn parse_resume_file(file: ResumeFile) -> Result<ParsedResume, ParseError> {
    let file_name = file.file_name.clone();
    let (extracted, source) = extract_file(file).await?;
    build_parsed_resume(&extracted.text, &file_name, source, extracted.messages)
}

/// Parses already-extracted plain text, for callers that bypass file upload.
pub fn parse_resume_text(text: &str, file_name: &str) -> Result<ParsedResume, ParseError> {
    build_parsed_resume(text, file_name, ParseSource::Text, Vec::new())
}

fn build_parsed_resume(
    text: &str,
    file_name: &str,
    source: ParseSource,
    extraction_messages: Vec<String>,
) -> Result<ParsedResume, ParseError> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(ParseError::EmptyDocument);
    }

    let contact = contact::extract_contact_info(text);
    let full_name = contact::extract_name(text);
    let job_title = contact::extract_job_title(text, full_name.as_deref());

    let matches = detect_sections(text);

    let mut summary: Option<String> = None;
    let mut experience = Vec::new();
    let mut education = Vec::new();
    let mut skill_list: Vec<String> = Vec::new();
    let mut projects = Vec::new();
    let mut certifications = Vec::new();

    for m in &matches {
        match m.section {
            SectionType::Summary => {
                if summary.is_none() {
                    let body = m.content.trim();
                    if !body.is_empty() {
                        summary = Some(body.to_string());
                    }
                }
            }
            SectionType::Experience => {
                experience.extend(experience::parse_experience_section(&m.content));
            }
            SectionType::Education => {
                education.extend(education::parse_education_section(&m.content));
            }
            SectionType::Skills => {
                for skill in skills::parse_skills(&m.content) {
                    if !skill_list.iter().any(|s| s.eq_ignore_ascii_case(&skill)) {
                        skill_list.push(skill);
                    }
                }
            }
            SectionType::Projects => {
                projects.extend(projects::parse_projects_section(&m.content));
            }
            SectionType::Certifications => {
                certifications.extend(certifications::parse_certifications_section(&m.content));
            }
            _ => {}
        }
    }

    let mut confidence = CONFIDENCE_BASE;
    if full_name.is_some() {
        confidence += CONFIDENCE_NAME_BOOST;
    }
    if job_title.is_some() {
        confidence += CONFIDENCE_TITLE_BOOST;
    }
    if contact.email.is_some() {
        confidence += CONFIDENCE_EMAIL_BOOST;
    }
    if !experience.is_empty() {
        confidence += CONFIDENCE_EXPERIENCE_BOOST;
    }
    if !education.is_empty() {
        confidence += CONFIDENCE_EDUCATION_BOOST;
    }
    let confidence = confidence.min(CONFIDENCE_MAX) as u8;

    let mut warnings = Vec::new();
    if full_name.is_none() {
        warnings.push("Could not detect a name; fill it in manually.".to_string());
    }
    if contact.email.is_none() {
        warnings.push("No email address found.".to_string());
    }
    if experience.is_empty() {
        warnings.push("No work experience entries were detected.".to_string());
    }
    if skill_list.is_empty() {
        warnings.push("No skills were detected.".to_string());
    }
    warnings.extend(extraction_messages);

    info!(
        file = %file_name,
        ?source,
        confidence,
        sections = matches.len(),
        experience = experience.len(),
        skills = skill_list.len(),
        "parsed resume"
    );

    Ok(ParsedResume {
        full_name,
        job_title,
        contact,
        summary,
        experience,
        education,
        skills: skill_list,
        projects,
        certifications,
        raw_text: text.to_string(),
        parse_info: ParseInfo {
            source,
            file_name: file_name.to_string(),
            parsed_at: Utc::now(),
            confidence,
            warnings,
        },
    })
}

/// Flattens a `ParsedResume` into the app's editable resume record. Imported
/// entries get deterministic ids so a re-import replaces rather than
/// duplicates them.
pub fn convert_to_resume_data(parsed: &ParsedResume) -> ResumeData {
    let personal = PersonalInfo {
        full_name: parsed.full_name.clone().unwrap_or_default(),
        job_title: parsed.job_title.clone().unwrap_or_default(),
        email: parsed.contact.email.clone().unwrap_or_default(),
        phone: parsed.contact.phone.clone().unwrap_or_default(),
        location: parsed.contact.location.clone().unwrap_or_default(),
    };

    let experience = parsed
        .experience
        .iter()
        .enumerate()
        .map(|(i, e)| ExperienceRecord {
            id: format!("imported-exp-{i}"),
            company: e.company.clone(),
            position: e.position.clone(),
            start_date: e.start_date.clone().unwrap_or_default(),
            end_date: e.end_date.clone().unwrap_or_default(),
            current: e.current,
            description: e.description.clone(),
        })
        .collect();

    let education = parsed
        .education
        .iter()
        .enumerate()
        .map(|(i, e)| EducationRecord {
            id: format!("imported-edu-{i}"),
            institution: e.institution.clone(),
            degree: e.degree.clone(),
            field: e.field.clone().unwrap_or_default(),
            start_date: e.start_date.clone().unwrap_or_default(),
            end_date: e.end_date.clone().unwrap_or_default(),
            description: e.description.clone().unwrap_or_default(),
        })
        .collect();

    let projects = parsed
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectRecord {
            id: format!("imported-proj-{i}"),
            name: p.name.clone(),
            url: p.url.clone().unwrap_or_default(),
            description: p.description.clone(),
            technologies: p.technologies.clone().unwrap_or_default(),
        })
        .collect();

    let certifications = parsed
        .certifications
        .iter()
        .enumerate()
        .map(|(i, c)| CertificationRecord {
            id: format!("imported-cert-{i}"),
            name: c.name.clone(),
            issuer: c.issuer.clone(),
            issue_date: c.issue_date.clone().unwrap_or_default(),
            credential_id: c.credential_id.clone().unwrap_or_default(),
            credential_url: c.credential_url.clone().unwrap_or_default(),
        })
        .collect();

    let mut links = Vec::new();
    let link_fields = [
        ("linkedin", "LinkedIn", &parsed.contact.linkedin),
        ("github", "GitHub", &parsed.contact.github),
        ("website", "Website", &parsed.contact.website),
    ];
    for (slug, label, url) in link_fields {
        if let Some(url) = url {
            links.push(ProfileLink {
                id: format!("imported-link-{slug}"),
                label: label.to_string(),
                url: url.clone(),
            });
        }
    }

    ResumeData {
        personal,
        summary: parsed.summary.clone().unwrap_or_default(),
        experience,
        education,
        skills: parsed.skills.clone(),
        projects,
        certifications,
        links,
    }
}

/// Serializes overlapping imports: each import takes a ticket, and only the
/// holder of the latest ticket may apply its result. An import that finishes
/// after a newer one started discards its output.
#[derive(Debug, Default)]
pub struct ImportSequencer {
    latest: AtomicU64,
}

impl ImportSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new import and returns its ticket, invalidating all earlier
    /// tickets.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer import has begun.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
