use std::collections::BTreeSet;

use super::synonyms::synonyms_for;

/// Tokens shorter than this (in Unicode scalar values, not UTF-16 units)
/// carry no signal and are dropped. A lone emoji counts as one.
pub const MIN_TOKEN_LEN: usize = 2;

/// Deduplicated, lowercase query vocabulary after synonym expansion.
pub type QueryTokenSet = BTreeSet<String>;

/// Lowercase `text` and split it on whitespace, dropping one-char tokens.
/// Duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Union every token with its configured synonyms.
pub fn expand<S: AsRef<str>>(tokens: &[S]) -> QueryTokenSet {
    let mut expanded = QueryTokenSet::new();
    for token in tokens {
        let token = token.as_ref();
        expanded.insert(token.to_string());
        if let Some(synonyms) = synonyms_for(token) {
            expanded.extend(synonyms.iter().map(|s| s.to_string()));
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("How does ECS\tBootstrap\n work"),
            vec!["how", "does", "ecs", "bootstrap", "work"]
        );
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(tokenize("a b cd e fgh"), vec!["cd", "fgh"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        assert_eq!(tokenize("hp HP hp"), vec!["hp", "hp", "hp"]);
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_counts_chars_not_bytes() {
        // "é" is two bytes but one char
        assert!(tokenize("é").is_empty());
        assert_eq!(tokenize("éa"), vec!["éa"]);
    }

    #[test]
    fn test_tokenize_single_emoji_is_too_short() {
        assert_eq!(tokenize("🔥 hp"), vec!["hp"]);
        assert_eq!(tokenize("🔥🔥"), vec!["🔥🔥"]);
    }

    #[test]
    fn test_expand_adds_synonyms() {
        let expanded = expand(&tokenize("xp gain"));
        for expected in ["xp", "gain", "experience", "exp", "levelup"] {
            assert!(expanded.contains(expected), "missing {expected}");
        }
        assert_eq!(expanded.len(), 5);
    }

    #[test]
    fn test_expand_is_superset_of_input() {
        let tokens = tokenize("spawn an enemy with custom hp and loot");
        let expanded = expand(&tokens);
        assert!(tokens.iter().all(|t| expanded.contains(t)));
    }

    #[test]
    fn test_expand_deduplicates() {
        // xp -> exp and exp -> xp overlap
        let expanded = expand(&["xp", "exp", "xp"]);
        assert_eq!(expanded.len(), 4);
    }

    #[test]
    fn test_expand_requires_exact_key() {
        let expanded = expand(&["ex"]);
        assert_eq!(expanded.len(), 1);
        assert!(!expanded.contains("experience"));
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand::<&str>(&[]).is_empty());
    }
}
