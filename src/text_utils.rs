use std::ops::Index;

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

const WORDS_PER_MINUTE: f64 = 200.0;

// Free-text date formats accepted besides the ISO prefix
const DATE_FORMATS: [&str; 5] = [
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

fn to_int<T: std::str::FromStr>(num_str: &str) -> Option<T> {
    num_str.parse::<T>().ok()
}

/// Parses the free-text date of a post into a calendar date.
/// Anything starting with `YYYY-MM-DD` is accepted, so `2024-02-12 22:54:00` works too.
pub fn parse_post_date(buf: &str) -> Option<NaiveDate> {
    lazy_static! {
        static ref ISO_DATE_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    }

    let buf = buf.trim();
    if let Some(caps) = ISO_DATE_REGEX.captures(buf) {
        let y: i32 = to_int(caps.index(1))?;
        let m: u32 = to_int(caps.index(2))?;
        let d: u32 = to_int(caps.index(3))?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    DATE_FORMATS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(buf, fmt).ok())
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text`, never less than one.
pub fn reading_time(text: &str) -> u32 {
    let minutes = (word_count(text) as f64 / WORDS_PER_MINUTE).round();
    minutes.max(1.0) as u32
}

/// Turns a title into a file-name friendly slug: `Stand by Me!` -> `stand-by-me`
pub fn slugify(title: &str) -> String {
    let title = unidecode::unidecode(title);
    let mut slug = String::new();
    let mut prev_dash = true;

    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
