use crate::models::IndexedDocument;

use super::tokenize::QueryTokenSet;

/// Title and content contain the raw query verbatim.
pub const PHRASE_BONUS: u32 = 50;
/// Token appears anywhere in title or content.
pub const TEXT_HIT: u32 = 1;
/// Token appears in the title.
pub const TITLE_HIT: u32 = 10;
/// Title equals the token (on top of [`TITLE_HIT`]).
pub const TITLE_EXACT: u32 = 30;
/// Page reads like a conceptual overview. Only added to pages that already
/// matched something: the in-browser widget added it flat, which let an
/// overview page that matched nothing rank with a score of 5.
pub const OVERVIEW_BONUS: u32 = 5;

const OVERVIEW_MARKERS: [&str; 2] = ["overview", "modding relevance"];

/// Additive, case-insensitive relevance of `doc` for a query.
///
/// `tokens` is the expanded token set; `original_query` is the text the
/// user typed, before tokenizing.
pub fn score_document(doc: &IndexedDocument, tokens: &QueryTokenSet, original_query: &str) -> u32 {
    let title = doc.title.to_lowercase();
    let text = format!("{} {}", title, doc.content.to_lowercase());

    let mut score = 0;

    if !original_query.trim().is_empty() && text.contains(&original_query.to_lowercase()) {
        score += PHRASE_BONUS;
    }

    for token in tokens {
        let token = token.as_str();
        if text.contains(token) {
            score += TEXT_HIT;
        }
        if title.contains(token) {
            score += TITLE_HIT;
        }
        if title == token {
            score += TITLE_EXACT;
        }
    }

    if score > 0 && OVERVIEW_MARKERS.iter().any(|marker| text.contains(marker)) {
        score += OVERVIEW_BONUS;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tokenize::{expand, tokenize};

    fn tokens(query: &str) -> QueryTokenSet {
        expand(&tokenize(query))
    }

    fn bootstrap_doc() -> IndexedDocument {
        IndexedDocument::new(
            "AwakenEcsBootstrap",
            "/api/Awaken/AwakenEcsBootstrap",
            "Overview of the ECS bootstrap system.",
        )
    }

    #[test]
    fn test_bootstrap_example() {
        let query = "how does ecs bootstrap work";
        let score = score_document(&bootstrap_doc(), &tokens(query), query);
        // "ecs": 1 + 10, "bootstrap": 1 + 10, overview: 5. No phrase, no exact title.
        assert_eq!(score, 27);
    }

    #[test]
    fn test_phrase_bonus_is_case_insensitive() {
        let doc = IndexedDocument::new("Damage", "/d", "Deals Fire Damage over time");
        let query = "FIRE damage";
        let score = score_document(&doc, &QueryTokenSet::new(), query);
        assert_eq!(score, PHRASE_BONUS);
    }

    #[test]
    fn test_phrase_bonus_spans_title_and_content() {
        let doc = IndexedDocument::new("Hero", "/h", "stats table");
        let score = score_document(&doc, &QueryTokenSet::new(), "hero stats");
        assert_eq!(score, PHRASE_BONUS);
    }

    #[test]
    fn test_blank_query_earns_no_phrase_bonus() {
        let doc = IndexedDocument::new("Hero", "/h", "stats table");
        assert_eq!(score_document(&doc, &QueryTokenSet::new(), ""), 0);
        assert_eq!(score_document(&doc, &QueryTokenSet::new(), "   "), 0);
    }

    #[test]
    fn test_exact_title_stacks_with_title_hit() {
        let doc = IndexedDocument::new("Inventory", "/i", "Holds items.");
        let set: QueryTokenSet = ["inventory".to_string()].into_iter().collect();
        // 1 (text) + 10 (title) + 30 (exact)
        assert_eq!(score_document(&doc, &set, "zzz"), 41);
    }

    #[test]
    fn test_overview_markers_boost_matching_pages() {
        let set: QueryTokenSet = ["page".to_string()].into_iter().collect();
        let plain = IndexedDocument::new("A", "/a", "a page");
        let overview = IndexedDocument::new("A", "/a", "An OVERVIEW page");
        let relevance = IndexedDocument::new("A", "/a", "## Modding Relevance page");
        assert_eq!(score_document(&plain, &set, "zzz"), TEXT_HIT);
        assert_eq!(score_document(&overview, &set, "zzz"), TEXT_HIT + OVERVIEW_BONUS);
        assert_eq!(score_document(&relevance, &set, "zzz"), TEXT_HIT + OVERVIEW_BONUS);
    }

    #[test]
    fn test_overview_alone_scores_zero() {
        let overview = IndexedDocument::new("Combat", "/c", "Overview. Modding relevance: high.");
        assert_eq!(score_document(&overview, &tokens("inventory"), "inventory"), 0);
    }

    #[test]
    fn test_synonym_reaches_content() {
        let doc = IndexedDocument::new("Progression", "/p", "experience points increase");
        let query = "xp gain";
        assert!(score_document(&doc, &tokens(query), query) > 0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let doc = IndexedDocument::new("Weather", "/w", "rain and fog");
        let query = "inventory slots";
        assert_eq!(score_document(&doc, &tokens(query), query), 0);
    }

    #[test]
    fn test_deterministic() {
        let query = "ecs bootstrap";
        let set = tokens(query);
        let first = score_document(&bootstrap_doc(), &set, query);
        for _ in 0..10 {
            assert_eq!(score_document(&bootstrap_doc(), &set, query), first);
        }
    }
}
