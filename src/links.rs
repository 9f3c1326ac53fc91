//! Auto-linking of class names mentioned in chat messages.
//!
//! Every index page living under `/api/<category>/<Name>` contributes
//! `Name -> url` to a [`ClassUrlMap`]. A [`LinkAnnotator`] compiles all
//! names into one alternation and splits a message into [`Segment`]s.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::models::IndexedDocument;

/// Entity name -> page url. Later pages overwrite earlier ones on collision.
pub type ClassUrlMap = HashMap<String, String>;

static API_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/api/([^/]+)/([^/]+)/?$").expect("static pattern is valid")
});

// Thousands of class names blow past the default compiled size limit.
const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Extract the entity name from an `/api/<category>/<Name>` url.
pub fn entity_name(url: &str) -> Option<&str> {
    API_PAGE
        .captures(url)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Build the name -> url map for every page following the api url layout.
pub fn build_class_url_map(documents: &[IndexedDocument]) -> ClassUrlMap {
    let mut map = ClassUrlMap::new();
    for doc in documents {
        if let Some(name) = entity_name(&doc.url) {
            map.insert(name.to_string(), doc.url.clone());
        }
    }
    map
}

/// A run of message text, either plain or linked to a wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { content: String },
    Link { content: String, url: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content } | Segment::Link { content, .. } => content,
        }
    }
}

/// Concatenate segment contents back into the original text.
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter().map(Segment::content).collect()
}

/// Compiled whole-word matcher over every known entity name.
#[derive(Debug, Clone, Default)]
pub struct LinkAnnotator {
    pattern: Option<Regex>,
    urls: ClassUrlMap,
}

impl LinkAnnotator {
    pub fn new(urls: ClassUrlMap) -> Self {
        let pattern = compile_pattern(&urls);
        Self { pattern, urls }
    }

    pub fn from_documents(documents: &[IndexedDocument]) -> Self {
        Self::new(build_class_url_map(documents))
    }

    pub fn class_urls(&self) -> &ClassUrlMap {
        &self.urls
    }

    /// Split `text` into plain and linked segments.
    ///
    /// Matching is case-sensitive and whole-word, longer names win over
    /// shorter overlapping ones, and matches never overlap. Word boundaries
    /// are Unicode-aware, so a name glued to a letter like `é` is not linked.
    pub fn annotate(&self, text: &str) -> Vec<Segment> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(pattern) = &self.pattern else {
            return vec![Segment::text(text)];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            let Some(url) = self.urls.get(m.as_str()) else {
                continue;
            };
            if m.start() > last {
                segments.push(Segment::text(&text[last..m.start()]));
            }
            segments.push(Segment::Link {
                content: m.as_str().to_string(),
                url: url.clone(),
            });
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::text(&text[last..]));
        }
        segments
    }
}

fn compile_pattern(urls: &ClassUrlMap) -> Option<Regex> {
    if urls.is_empty() {
        return None;
    }

    let mut names: Vec<&str> = urls.keys().map(String::as_str).collect();
    // Longest first so the alternation prefers the longer name; ties sorted
    // for a stable pattern.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("Entity link pattern unavailable, links disabled: {e}");
            None
        }
    }
}
