//! Cuisine tag inference from restaurant and dish names.
//!
//! Both tables are static keyword lists. Matching is a lower-cased
//! substring test, so "Luigi's Trattoria" is tagged `italian` and
//! "Pho Saigon" is tagged `vietnamese`.

use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tag assigned when no keyword list matches.
pub const CUISINE_UNKNOWN: &str = "unknown";

/// Restaurant-name keywords per cuisine tag.
///
/// A name may match several rows ("Pizza & Sushi Bar" is both italian and
/// japanese); all matches are reported.
pub const RESTAURANT_KEYWORDS: &[(&str, &[&str])] = &[
    ("italian", &["pizza", "pasta", "italian", "trattoria", "pizzeria"]),
    ("mexican", &["taco", "burrito", "mexican", "cantina"]),
    ("chinese", &["chinese", "dim sum", "wok", "dumpling"]),
    ("japanese", &["sushi", "ramen", "japanese", "izakaya"]),
    ("indian", &["indian", "curry", "tandoori", "spice"]),
    ("thai", &["thai", "pad thai", "bangkok"]),
    ("vietnamese", &["vietnamese", "pho", "banh mi"]),
    ("american", &["burger", "grill", "american", "steak"]),
    ("french", &["french", "bistro", "cafe", "patisserie"]),
];

/// Dish-name keywords per cuisine tag. Order matters: the first matching
/// row wins.
pub const DISH_KEYWORDS: &[(&str, &[&str])] = &[
    ("italian", &["pasta", "pizza", "risotto"]),
    ("mexican", &["taco", "burrito", "enchilada"]),
    ("japanese", &["sushi", "ramen", "tempura"]),
    ("indian", &["curry", "tikka", "naan"]),
    ("thai", &["pad thai", "tom yum"]),
    ("vietnamese", &["pho", "banh mi"]),
    ("american", &["burger", "hot dog", "bbq"]),
    ("french", &["croissant", "baguette"]),
    ("korean", &["kimchi", "bibimbap"]),
    ("chinese", &["dim sum", "kung pao", "chow mein"]),
];

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Infer the set of cuisine tags for a restaurant name.
///
/// Never returns an empty set: when nothing matches the result is
/// `{"unknown"}`.
pub fn infer_cuisines(restaurant_name: &str) -> BTreeSet<String> {
    let name = restaurant_name.to_lowercase();

    let mut tags: BTreeSet<String> = RESTAURANT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(cuisine, _)| (*cuisine).to_string())
        .collect();

    if tags.is_empty() {
        tags.insert(CUISINE_UNKNOWN.to_string());
    }
    tags
}

/// Best-guess cuisine for a single dish name, or `"unknown"`.
pub fn detect_dish_cuisine(dish_name: &str) -> &'static str {
    let name = dish_name.to_lowercase();

    DISH_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(cuisine, _)| *cuisine)
        .unwrap_or(CUISINE_UNKNOWN)
}
