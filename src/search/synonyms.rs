//! Hand-curated modding vocabulary used to widen a query before matching.
//!
//! Entries are deliberately not symmetric: `save` expands to `persist`, but
//! `persist` expands to nothing.

pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("xp", &["experience", "exp", "levelup"]),
    ("exp", &["experience", "xp", "levelup"]),
    ("hp", &["health", "hitpoints", "life"]),
    ("health", &["hp", "hitpoints", "life"]),
    ("dmg", &["damage", "attack", "hurt"]),
    ("damage", &["dmg", "attack", "hurt"]),
    ("npc", &["enemy", "monster", "creature", "mob"]),
    ("enemy", &["npc", "monster", "creature", "mob"]),
    ("mob", &["enemy", "npc", "monster", "creature"]),
    ("stats", &["statistics", "attributes", "stat"]),
    ("stat", &["statistics", "attributes", "stats"]),
    ("buff", &["bonus", "boost", "modifier", "effect"]),
    ("debuff", &["penalty", "malus", "negative", "effect"]),
    ("ui", &["interface", "gui", "hud", "menu"]),
    ("gui", &["interface", "ui", "hud", "menu"]),
    ("hud", &["interface", "ui", "gui", "display"]),
    ("inv", &["inventory", "items", "bag"]),
    ("inventory", &["inv", "items", "bag", "storage"]),
    ("item", &["object", "equipment", "gear", "loot"]),
    ("equip", &["equipment", "gear", "item", "wear"]),
    ("char", &["character", "player", "hero"]),
    ("character", &["char", "player", "hero", "unit"]),
    ("lvl", &["level", "tier", "rank"]),
    ("level", &["lvl", "tier", "rank"]),
    ("mod", &["modifier", "modification", "bonus"]),
    ("multiplier", &["modifier", "bonus", "scale", "factor"]),
    ("spawn", &["create", "instantiate", "generate", "summon"]),
    ("save", &["persist", "store", "serialize"]),
    ("load", &["deserialize", "restore", "read"]),
];

/// Exact-match lookup. `"ex"` does not hit the `"exp"` entry.
pub fn synonyms_for(token: &str) -> Option<&'static [&'static str]> {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, synonyms)| *synonyms)
}
