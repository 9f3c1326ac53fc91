//! Keyword retrieval over the wiki index: tokenize, expand with domain
//! synonyms, score, rank.

pub mod rank;
pub mod scoring;
pub mod synonyms;
pub mod tokenize;

use crate::models::{IndexedDocument, ScoredDocument};

pub use rank::{rank, TOP_K};
pub use scoring::score_document;
pub use tokenize::{expand, tokenize, QueryTokenSet};

/// Run the whole retrieval pipeline for one user query.
pub fn retrieve<'a>(documents: &'a [IndexedDocument], query: &str) -> Vec<ScoredDocument<'a>> {
    let tokens = expand(&tokenize(query));
    let ranked = rank(documents, &tokens, query);
    tracing::debug!(
        "Ranked {} of {} pages for {} query tokens",
        ranked.len(),
        documents.len(),
        tokens.len()
    );
    ranked
}
