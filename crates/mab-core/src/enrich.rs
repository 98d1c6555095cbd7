//! Context enrichment: web-page summaries folded into a request.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::{formatting::take_chars, Result};

pub const TITLE_PLACEHOLDER: &str = "Заголовок не найден";
pub const DESCRIPTION_PLACEHOLDER: &str = "Описание не найдено";
pub const HEADINGS_PLACEHOLDER: &str = "Заголовки не найдены";

/// Max headings kept per page.
pub const MAX_HEADINGS: usize = 10;
/// Visible text kept by the extractor.
pub const MAX_EXTRACTED_TEXT: usize = 3000;
/// Visible text actually forwarded to the model.
pub const MAX_FORWARDED_TEXT: usize = 1000;

/// Bounded extraction of one fetched page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
    pub text: String,
}

impl PageSummary {
    /// Human-readable block describing the page.
    pub fn render(&self) -> String {
        let headings = if self.headings.is_empty() {
            HEADINGS_PLACEHOLDER.to_string()
        } else {
            self.headings.join("\n")
        };

        format!(
            "URL: {url}\n\nЗаголовок страницы: {title}\n\nMeta описание: {description}\n\nОсновные заголовки:\n{headings}\n\nФрагмент контента:\n{excerpt}...",
            url = self.url,
            title = self.title,
            description = self.description,
            excerpt = take_chars(&self.text, MAX_FORWARDED_TEXT),
        )
    }

    /// Context string handed to the prompt composer.
    pub fn as_context(&self) -> String {
        format!("Данные с сайта:\n{}\n\n", self.render())
    }
}

/// Port for fetching and summarizing a page.
///
/// Failures are reported as `Error::Enrichment` and never abort an exchange.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<PageSummary>;
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s<>"'«»]+"#).expect("valid regex"))
}

/// First http(s) URL in `text`, with trailing sentence punctuation removed.
///
/// A closing `)` or `]` is kept when it balances an opening one inside the URL.
pub fn extract_first_url(text: &str) -> Option<String> {
    url_regex()
        .find_iter(text)
        .map(|m| trim_trailing_punctuation(m.as_str()).to_string())
        .find(|u| !u.ends_with("://"))
}

fn trim_trailing_punctuation(mut url: &str) -> &str {
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => url.matches('(').count() < url.matches(')').count(),
            ']' => url.matches('[').count() < url.matches(']').count(),
            _ => false,
        };
        if !strip {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}
