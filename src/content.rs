//! Blog and project records as stored in the hosted content tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// HTML markup.
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "demo_url", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub created_at: String,
}

impl Project {
    /// Tags win over the comma separated `stack` column.
    pub fn stack_tags(&self) -> Vec<String> {
        if let Some(tags) = self.tags.as_ref().filter(|tags| !tags.is_empty()) {
            return tags.clone();
        }

        self.stack
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// `2024-01-05T10:00:00+00:00` → `January 5, 2024`. Unparseable input is
/// returned unchanged.
pub fn format_date(timestamp: &str) -> String {
    parse_date(timestamp)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Calendar date of a timestamp, used for sitemap `lastmod`.
pub fn iso_date(timestamp: &str) -> Option<String> {
    parse_date(timestamp).map(|date| date.format("%Y-%m-%d").to_string())
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.date_naive());
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.date());
    }

    timestamp
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(stack: Option<&str>, tags: Option<Vec<&str>>) -> Project {
        Project {
            id: 1,
            name: "Folio".to_string(),
            description: String::new(),
            stack: stack.map(ToString::to_string),
            tags: tags.map(|tags| tags.into_iter().map(ToString::to_string).collect()),
            link: None,
            github_url: None,
            created_at: "2024-01-05T10:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn formats_rfc3339_and_naive_timestamps() {
        assert_eq!(format_date("2024-01-05T10:00:00+00:00"), "January 5, 2024");
        assert_eq!(format_date("2023-11-20T08:30:00.123456"), "November 20, 2023");
        assert_eq!(format_date("2022-07-04"), "July 4, 2022");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(iso_date("soon"), None);
    }

    #[test]
    fn iso_date_keeps_the_calendar_day() {
        assert_eq!(
            iso_date("2024-03-09T23:59:59.5+00:00").as_deref(),
            Some("2024-03-09")
        );
    }

    #[test]
    fn stack_column_is_split_and_trimmed() {
        let tags = project(Some("Rust, Yew ,, axum"), None).stack_tags();
        assert_eq!(tags, vec!["Rust", "Yew", "axum"]);
    }

    #[test]
    fn explicit_tags_take_precedence() {
        let tags = project(Some("ignored"), Some(vec!["wasm"])).stack_tags();
        assert_eq!(tags, vec!["wasm"]);

        let tags = project(Some("Rust"), Some(Vec::new())).stack_tags();
        assert_eq!(tags, vec!["Rust"]);
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("hello world again", 6), "hello...");
    }

    #[test]
    fn project_accepts_richer_column_names() {
        let project: Project = serde_json::from_str(
            r#"{"id":3,"title":"Site","description":"d","demo_url":"https://x.dev","created_at":"2024-01-01"}"#,
        )
        .expect("valid project row");

        assert_eq!(project.name, "Site");
        assert_eq!(project.link.as_deref(), Some("https://x.dev"));
        assert!(project.stack_tags().is_empty());
    }
}
