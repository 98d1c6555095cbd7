//! Web page fetcher used for context enrichment.
//!
//! Fetches a page with a browser-like user agent and extracts a bounded
//! summary (title, meta description, headings, visible text).

use std::time::Duration;

use async_trait::async_trait;
use scraper::{node::Node, ElementRef, Html, Selector};

use mab_core::{
    enrich::{
        PageFetcher, PageSummary, DESCRIPTION_PLACEHOLDER, MAX_EXTRACTED_TEXT, MAX_HEADINGS,
        TITLE_PLACEHOLDER,
    },
    errors::Error,
    formatting::take_chars,
    Result,
};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

#[derive(Clone)]
pub struct WebPageFetcher {
    http: reqwest::Client,
}

impl WebPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self { http })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Enrichment(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Enrichment(format!("{url} returned {status}")));
        }

        resp.text()
            .await
            .map_err(|e| Error::Enrichment(format!("failed to read body: {e}")))
    }
}

#[async_trait]
impl PageFetcher for WebPageFetcher {
    async fn summarize(&self, url: &str) -> Result<PageSummary> {
        let html = self.fetch(url).await?;
        let summary = parse_page(url, &html)?;
        tracing::debug!(url, bytes = html.len(), "page fetched");
        Ok(summary)
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Enrichment(format!("invalid selector {css}: {e}")))
}

/// Extract a `PageSummary` from raw HTML.
pub fn parse_page(url: &str, html: &str) -> Result<PageSummary> {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&selector("title")?)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let description = doc
        .select(&selector(r#"meta[name="description"]"#)?)
        .find_map(|m| m.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());

    let headings = doc
        .select(&selector("h1, h2, h3")?)
        .take(MAX_HEADINGS)
        .map(element_text)
        .collect();

    Ok(PageSummary {
        url: url.to_string(),
        title,
        description,
        headings,
        text: visible_text(&doc, MAX_EXTRACTED_TEXT),
    })
}

/// Concatenated text of an element, each fragment trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect::<String>()
}

/// Visible text with whitespace collapsed to single spaces, cut to `max_chars`.
fn visible_text(doc: &Html, max_chars: usize) -> String {
    let mut out = String::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        for word in text.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }

        if out.chars().count() >= max_chars {
            break;
        }
    }
    take_chars(&out, max_chars).to_string()
}
