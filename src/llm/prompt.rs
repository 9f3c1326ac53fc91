use std::fmt::Write;

use crate::models::ScoredDocument;

pub const CONTEXT_PREAMBLE: &str = "Here is relevant information from the wiki:";
pub const NO_MATCH_CONTEXT: &str =
    "I couldn't find any specific documents matching your keywords.";

/// Render ranked pages into the context block handed to the answering
/// service. No length cap is applied here.
pub fn build_context_block(ranked: &[ScoredDocument<'_>]) -> String {
    if ranked.is_empty() {
        return NO_MATCH_CONTEXT.to_string();
    }

    let mut ctx = String::from(CONTEXT_PREAMBLE);
    ctx.push('\n');
    for (i, scored) in ranked.iter().enumerate() {
        if i > 0 {
            ctx.push_str("\n\n");
        }
        let doc = scored.document;
        // Writing into a String cannot fail.
        let _ = write!(ctx, "[Page: {}]({})\n{}", doc.title, doc.url, doc.content);
    }
    ctx
}

/// Full prompt: behavioural rules, retrieved context, then the question.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant for Tainted Grail: Fall of Avalon modding.\n\
         Use the following context to answer the user's question. If the context doesn't help, say so.\n\
         Do not hallucinate APIs that are not in the context.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         User Question: {question}\n\
         \n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexedDocument;

    fn scored(doc: &IndexedDocument, score: u32) -> ScoredDocument<'_> {
        ScoredDocument {
            document: doc,
            score,
        }
    }

    #[test]
    fn test_empty_ranking_uses_fallback() {
        assert_eq!(build_context_block(&[]), NO_MATCH_CONTEXT);
    }

    #[test]
    fn test_single_page() {
        let doc = IndexedDocument::new("Hero", "/api/Combat/Hero", "Player character.");
        let ctx = build_context_block(&[scored(&doc, 10)]);
        assert_eq!(
            ctx,
            "Here is relevant information from the wiki:\n[Page: Hero](/api/Combat/Hero)\nPlayer character."
        );
    }

    #[test]
    fn test_pages_separated_by_blank_line() {
        let a = IndexedDocument::new("A", "/a", "first");
        let b = IndexedDocument::new("B", "/b", "second");
        let ctx = build_context_block(&[scored(&a, 2), scored(&b, 1)]);
        assert!(ctx.contains("first\n\n[Page: B](/b)\nsecond"));
        assert!(ctx.find("[Page: A]").unwrap() < ctx.find("[Page: B]").unwrap());
    }

    #[test]
    fn test_full_content_is_kept() {
        let long = "x".repeat(50_000);
        let doc = IndexedDocument::new("Long", "/l", long.clone());
        assert!(build_context_block(&[scored(&doc, 1)]).ends_with(&long));
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("CTX", "how do I spawn an npc?");
        assert!(prompt.contains("Context:\nCTX\n"));
        assert!(prompt.contains("User Question: how do I spawn an npc?"));
        assert!(prompt.ends_with("Answer:"));
        assert!(prompt.find("Context:").unwrap() < prompt.find("User Question:").unwrap());
    }
}
