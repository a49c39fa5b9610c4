//! Projects parsing: short non-bulleted lines open a new project; bulleted
//! or long lines accumulate as description; a "Technologies:" style label
//! splits into the technologies list.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::parsed::ParsedProject;
use crate::parser::contact::URL_RE;
use crate::parser::experience::{is_bullet_line, strip_bullet};
use crate::parser::sections::is_heading_line;

static TECH_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:technologies|tech\s+stack|built\s+with|stack)\s*[:\-]\s*(.+)$").unwrap()
});

/// Non-bulleted lines up to this length are treated as project titles.
const MAX_TITLE_CHARS: usize = 60;

#[derive(Debug, Default)]
struct ProjectBuilder {
    name: String,
    url: Option<String>,
    description: Vec<String>,
    technologies: Option<Vec<String>>,
}

impl ProjectBuilder {
    fn finalize(self) -> ParsedProject {
        ParsedProject {
            name: self.name,
            role: None,
            url: self.url,
            start_date: None,
            end_date: None,
            current: None,
            description: self.description.join("\n"),
            technologies: self.technologies,
        }
    }
}

pub fn parse_projects_section(content: &str) -> Vec<ParsedProject> {
    let mut projects: Vec<ParsedProject> = Vec::new();
    let mut builder: Option<ProjectBuilder> = None;

    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || (i == 0 && is_heading_line(line)) {
            continue;
        }

        // Check the technologies label before the new-title rule: the label
        // line is short and non-bulleted too.
        if let Some(caps) = TECH_LABEL_RE.captures(line) {
            if let Some(project) = builder.as_mut() {
                let techs: Vec<String> = caps[1]
                    .split([',', '|'])
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if !techs.is_empty() {
                    project.technologies = Some(techs);
                }
            }
            continue;
        }

        let is_title = !is_bullet_line(line) && line.chars().count() <= MAX_TITLE_CHARS;
        if is_title {
            if let Some(done) = builder.take() {
                projects.push(done.finalize());
            }
            let mut next = ProjectBuilder::default();
            let mut title = line.to_string();
            if let Some(url) = URL_RE.find(line) {
                next.url = Some(url.as_str().trim_end_matches('/').to_string());
                title = format!("{}{}", &line[..url.start()], &line[url.end()..]);
            }
            next.name = title
                .trim()
                .trim_end_matches(['-', '–', '|', ':', '(', ')'])
                .trim()
                .to_string();
            builder = Some(next);
            continue;
        }

        if let Some(project) = builder.as_mut() {
            let text = if is_bullet_line(line) {
                strip_bullet(line)
            } else {
                line.to_string()
            };
            if project.url.is_none() {
                if let Some(url) = URL_RE.find(&text) {
                    project.url = Some(url.as_str().trim_end_matches('/').to_string());
                }
            }
            project.description.push(text);
        }
    }

    if let Some(done) = builder.take() {
        projects.push(done.finalize());
    }
    projects.retain(|p| !p.name.is_empty());
    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_opens_project() {
        let projects = parse_projects_section(
            "Task Tracker\n- CLI tool for tracking daily tasks built over a weekend",
        );
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Task Tracker");
        assert!(projects[0].description.contains("CLI tool"));
    }

    #[test]
    fn test_inline_url_extracted_and_stripped_from_title() {
        let projects = parse_projects_section(
            "Task Tracker https://github.com/janedoe/tracker\n- Weekend CLI project for daily task tracking",
        );
        assert_eq!(projects[0].name, "Task Tracker");
        assert_eq!(
            projects[0].url.as_deref(),
            Some("https://github.com/janedoe/tracker")
        );
    }

    #[test]
    fn test_url_in_description_captured_when_title_had_none() {
        let projects = parse_projects_section(
            "Task Tracker\n- Source at https://github.com/janedoe/tracker with CI included",
        );
        assert_eq!(
            projects[0].url.as_deref(),
            Some("https://github.com/janedoe/tracker")
        );
    }

    #[test]
    fn test_technologies_label_splits_on_commas() {
        let projects =
            parse_projects_section("Task Tracker\n- Daily task CLI\nTechnologies: Rust, SQLite, Clap");
        let techs = projects[0].technologies.as_ref().unwrap();
        assert_eq!(techs, &vec!["Rust".to_string(), "SQLite".to_string(), "Clap".to_string()]);
    }

    #[test]
    fn test_tech_stack_label_splits_on_pipes() {
        let projects =
            parse_projects_section("Weather Bot\n- Slack bot for forecasts\nTech stack: Python | Flask");
        let techs = projects[0].technologies.as_ref().unwrap();
        assert_eq!(techs.len(), 2);
        assert_eq!(techs[0], "Python");
    }

    #[test]
    fn test_multiple_projects() {
        let content = "Task Tracker\n- CLI tool for tracking daily work items\nWeather Bot\n- Slack bot posting daily forecasts to channels";
        let projects = parse_projects_section(content);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Task Tracker");
        assert_eq!(projects[1].name, "Weather Bot");
    }

    #[test]
    fn test_long_line_is_description_not_title() {
        let content = "Task Tracker\nThis project grew out of a long-standing frustration with heavyweight task managers and aims to stay minimal";
        let projects = parse_projects_section(content);
        assert_eq!(projects.len(), 1);
        assert!(!projects[0].description.is_empty());
    }

    #[test]
    fn test_content_before_first_title_dropped() {
        let projects = parse_projects_section(
            "- stray bullet with no project association at all\nTask Tracker\n- Real description",
        );
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Task Tracker");
    }

    #[test]
    fn test_empty_section() {
        assert!(parse_projects_section("").is_empty());
    }
}
