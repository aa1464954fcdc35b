use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::config::RenderConfig;
use crate::error::{BlogdexError, Result};
use crate::model::{ArticleRecord, IndexStyle, TimeZone};

/// Newest first. Equal instants keep their input order.
pub fn sort_newest_first(records: &[ArticleRecord]) -> Vec<ArticleRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    sorted
}

/// Link target for an article: each path segment percent-encoded, appended to `base_url`.
pub fn article_url(base_url: &str, path: &str) -> String {
    let encoded = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if base_url.is_empty() {
        encoded
    } else {
        format!("{base_url}/{encoded}")
    }
}

/// Markdown-escape a link label so `|`, `[` and `]` cannot end the link or the table cell.
pub fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '\\' | '|' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Parsed strftime pattern, validated once per render.
pub struct TimeFormat<'a> {
    items: Vec<Item<'a>>,
    zone: TimeZone,
}

impl<'a> TimeFormat<'a> {
    pub fn new(pattern: &'a str, zone: TimeZone) -> Result<Self> {
        let items: Vec<Item<'a>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(BlogdexError::InvalidTimeFormat(pattern.to_string()));
        }
        Ok(Self { items, zone })
    }

    pub fn format(&self, record: &ArticleRecord) -> Result<String> {
        let utc = DateTime::from_timestamp_millis(record.last_modified).ok_or_else(|| {
            BlogdexError::InvalidTimestamp {
                path: record.path.clone(),
                millis: record.last_modified,
            }
        })?;
        let text = match self.zone {
            TimeZone::Utc => utc.format_with_items(self.items.iter()).to_string(),
            TimeZone::Local => utc
                .with_timezone(&Local)
                .format_with_items(self.items.iter())
                .to_string(),
        };
        Ok(text)
    }
}

/// Render the full index document: header followed by one line per article.
pub fn render(records: &[ArticleRecord], config: &RenderConfig) -> Result<String> {
    let time_format = TimeFormat::new(&config.time_format, config.timezone)?;
    let mut out = config.header.clone();
    for record in sort_newest_first(records) {
        let url = article_url(&config.base_url, &record.path);
        let label = escape_label(record.file_name());
        match config.style {
            IndexStyle::Table => {
                let time = time_format.format(&record)?;
                out.push_str(&format!("|[{label}]({url})|{time}|\n"));
            }
            IndexStyle::List => {
                out.push_str(&format!("- [{label}]({url})\n"));
            }
        }
    }
    Ok(out)
}
