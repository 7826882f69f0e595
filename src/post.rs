use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use crate::text_utils::{format_date, parse_post_date, reading_time, today};

pub const UNTITLED: &str = "Untitled";

/// Position of the post file in the configured list, starting at 1.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PostId(pub u32);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub date: String,
    pub image: String,
    pub tags: Vec<String>,
    pub body: String,
    pub filename: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, file={}\ntitle={}\ntags={}\nbody:\n{}",
               self.id,
               self.date,
               self.filename,
               self.title,
               self.tags.join(","),
               self.body
        )
    }
}

/// Example of post
/// ```text
/// Stand by Me
/// 2024-06-01
/// /images/byme.jpg
/// film, friendship
///
/// First paragraph.
///
/// Second paragraph.
/// ```
impl Post {
    pub fn parse(id: PostId, filename: &str, content: &str) -> Post {
        Self::parse_with_today(id, filename, content, today())
    }

    pub fn parse_with_today(id: PostId, filename: &str, content: &str, today: NaiveDate) -> Post {
        let content = content.replace('\r', "");
        let lines: Vec<&str> = content.split('\n').collect();

        // Only the title skips blank lines, the other header fields are positional
        let mut idx = lines.iter()
            .position(|line| !line.trim().is_empty())
            .unwrap_or(lines.len());

        let mut next_field = || {
            let field = lines.get(idx).map(|line| line.trim()).unwrap_or("");
            idx += 1;
            field.to_string()
        };

        let title = next_field();
        let date = next_field();
        let image = next_field();
        let tags = next_field();

        let title = if title.is_empty() { UNTITLED.to_string() } else { title };
        let date = if date.is_empty() { format_date(&today) } else { date };
        let body = lines.get(idx..)
            .map(|rest| rest.join("\n"))
            .unwrap_or_default()
            .trim()
            .to_string();

        Post {
            id,
            title,
            date,
            image,
            tags: extract_tags(&tags),
            body,
            filename: filename.to_string(),
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_post_date(&self.date)
    }

    pub fn reading_time(&self) -> u32 {
        reading_time(&self.body)
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.body.split("\n\n")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn excerpt(&self) -> &str {
        self.paragraphs().first().copied().unwrap_or("")
    }

    /// Case-insensitive substring search over title, body and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.body.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
