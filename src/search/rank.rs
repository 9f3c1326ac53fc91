use crate::models::{IndexedDocument, ScoredDocument};

use super::scoring::score_document;
use super::tokenize::QueryTokenSet;

/// Maximum number of pages handed to the context assembler.
pub const TOP_K: usize = 5;

/// Score every document, drop non-matches, and keep the best [`TOP_K`].
///
/// Ties keep index order.
pub fn rank<'a>(
    documents: &'a [IndexedDocument],
    tokens: &QueryTokenSet,
    original_query: &str,
) -> Vec<ScoredDocument<'a>> {
    let mut scored: Vec<ScoredDocument<'a>> = documents
        .iter()
        .map(|document| ScoredDocument {
            document,
            score: score_document(document, tokens, original_query),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    // `sort_by` is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(TOP_K);
    scored
}
