//! The static wiki index: loading, parsing, and the in-memory knowledge base.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::links::{LinkAnnotator, Segment};
use crate::models::{IndexedDocument, ScoredDocument};
use crate::search;

/// Why the static index could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read index file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to fetch index: {0}")]
    Http(#[from] reqwest::Error),
    #[error("index request returned status {0}")]
    Status(u16),
    #[error("malformed index: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse the on-the-wire index: a JSON array of `{u, t, c}` records.
pub fn parse_index(json: &str) -> Result<Vec<IndexedDocument>, IndexError> {
    Ok(serde_json::from_str(json)?)
}

/// Loaded index plus everything derived from it. Never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    documents: Vec<IndexedDocument>,
    annotator: LinkAnnotator,
}

impl KnowledgeBase {
    pub fn new(documents: Vec<IndexedDocument>) -> Self {
        let annotator = LinkAnnotator::from_documents(&documents);
        Self {
            documents,
            annotator,
        }
    }

    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Top-ranked pages for `query`.
    pub fn retrieve(&self, query: &str) -> Vec<ScoredDocument<'_>> {
        search::retrieve(&self.documents, query)
    }

    /// Split `text` into plain and linked segments using the page names
    /// in this index.
    pub fn annotate(&self, text: &str) -> Vec<Segment> {
        self.annotator.annotate(text)
    }

    pub fn annotator(&self) -> &LinkAnnotator {
        &self.annotator
    }
}

/// Source of the precomputed index.
#[async_trait]
pub trait IndexLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<IndexedDocument>, IndexError>;
}

/// Where the static index lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    File(PathBuf),
    Url(String),
}

impl IndexSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            IndexSource::Url(location.to_string())
        } else {
            IndexSource::File(PathBuf::from(location))
        }
    }
}

/// Reads the index from disk or fetches it with a GET request.
pub struct StaticIndexLoader {
    source: IndexSource,
    client: reqwest::Client,
}

impl StaticIndexLoader {
    pub fn new(source: IndexSource, client: reqwest::Client) -> Self {
        Self { source, client }
    }
}

#[async_trait]
impl IndexLoader for StaticIndexLoader {
    async fn load(&self) -> Result<Vec<IndexedDocument>, IndexError> {
        tracing::info!("Loading AI index from {:?}", self.source);
        let body = match &self.source {
            IndexSource::File(path) => tokio::fs::read_to_string(path).await?,
            IndexSource::Url(url) => {
                let resp = self.client.get(url).send().await?;
                if !resp.status().is_success() {
                    return Err(IndexError::Status(resp.status().as_u16()));
                }
                resp.text().await?
            }
        };
        let documents = parse_index(&body)?;
        tracing::info!("AI index loaded: {} pages", documents.len());
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"u": "/api/Awaken/AwakenEcsBootstrap", "t": "AwakenEcsBootstrap", "c": "Overview of the ECS bootstrap system."},
        {"u": "/guides/getting-started", "t": "Getting Started", "c": "Install the mod loader."}
    ]"#;

    #[test]
    fn test_parse_index() {
        let docs = parse_index(SAMPLE).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].title, "Getting Started");
    }

    #[test]
    fn test_parse_index_rejects_non_array() {
        assert!(matches!(
            parse_index(r#"{"u": "/a", "t": "A", "c": ""}"#),
            Err(IndexError::Malformed(_))
        ));
        assert!(matches!(parse_index("<html>"), Err(IndexError::Malformed(_))));
    }

    #[test]
    fn test_knowledge_base_links_api_pages_only() {
        let kb = KnowledgeBase::new(parse_index(SAMPLE).unwrap());
        assert_eq!(kb.annotator().class_urls().len(), 1);
        let segments = kb.annotate("Start with AwakenEcsBootstrap");
        assert_eq!(
            segments[1],
            Segment::Link {
                content: "AwakenEcsBootstrap".into(),
                url: "/api/Awaken/AwakenEcsBootstrap".into(),
            }
        );
    }

    #[test]
    fn test_empty_knowledge_base() {
        let kb = KnowledgeBase::default();
        assert!(kb.is_empty());
        assert!(kb.retrieve("ecs bootstrap").is_empty());
        assert_eq!(kb.annotate("Hero"), vec![Segment::text("Hero")]);
    }

    #[test]
    fn test_index_source_parse() {
        assert_eq!(
            IndexSource::parse("https://example.org/Wiki/ai-index.json"),
            IndexSource::Url("https://example.org/Wiki/ai-index.json".into())
        );
        assert_eq!(
            IndexSource::parse("./build/ai-index.json"),
            IndexSource::File(PathBuf::from("./build/ai-index.json"))
        );
    }

    #[tokio::test]
    async fn test_loader_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai-index.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let loader = StaticIndexLoader::new(IndexSource::File(path), reqwest::Client::new());
        let docs = loader.load().await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = StaticIndexLoader::new(
            IndexSource::File(dir.path().join("missing.json")),
            reqwest::Client::new(),
        );
        assert!(matches!(loader.load().await, Err(IndexError::Io(_))));
    }
}
