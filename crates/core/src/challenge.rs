//! Challenge progress tracking and evaluation.
//!
//! A challenge's raw `type` + `criteria` pair (as stored) is resolved once,
//! when the challenge is constructed, into a [`ChallengeCriteria`] variant
//! carrying a strongly-typed payload. [`evaluate_entry`] then classifies a
//! newly stored [`Entry`] against every open challenge and reports which
//! ones advanced. It is a pure function; callers persist the results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cuisine::infer_cuisines;
use crate::meal::Entry;
use crate::types::{DbId, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Valid challenge type strings (stored in `challenges.challenge_type`).
pub const TYPE_CUISINE: &str = "cuisine";
pub const TYPE_RESTAURANT: &str = "restaurant";
pub const TYPE_RATING: &str = "rating";
pub const TYPE_DISH: &str = "dish";

/// All valid challenge type strings.
pub const VALID_CHALLENGE_TYPES: &[&str] = &[TYPE_CUISINE, TYPE_RESTAURANT, TYPE_RATING, TYPE_DISH];

/// Threshold used by rating challenges whose criteria is missing or not a
/// number.
pub const DEFAULT_RATING_THRESHOLD: i16 = 8;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Closed set of challenge types. Determines which predicate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    Cuisine,
    Restaurant,
    Rating,
    Dish,
}

impl ChallengeKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_CUISINE => Ok(Self::Cuisine),
            TYPE_RESTAURANT => Ok(Self::Restaurant),
            TYPE_RATING => Ok(Self::Rating),
            TYPE_DISH => Ok(Self::Dish),
            _ => Err(format!(
                "Invalid challenge type '{s}'. Must be one of: {}",
                VALID_CHALLENGE_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cuisine => TYPE_CUISINE,
            Self::Restaurant => TYPE_RESTAURANT,
            Self::Rating => TYPE_RATING,
            Self::Dish => TYPE_DISH,
        }
    }
}

/// Typed criteria, one case per [`ChallengeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeCriteria {
    /// Lower-cased cuisine tags in stored order; matches when any inferred
    /// tag of the restaurant is listed.
    Cuisine(Vec<String>),
    /// Restaurant names or place ids in stored order, compared exactly.
    Restaurant(Vec<String>),
    /// Matches when any dish's overall rating reaches the threshold.
    Rating { threshold: i16 },
    /// Lower-cased keywords; matches when any dish name contains one.
    Dish(Vec<String>),
}

impl ChallengeCriteria {
    /// Resolve the stored string list for the given kind.
    ///
    /// Cuisine tags and dish keywords are lower-cased here so evaluation
    /// never has to. List order is kept and repeats are dropped. A rating
    /// threshold is read from the leading integer of the first element
    /// (`"9 stars"` is 9); without one it falls back to
    /// [`DEFAULT_RATING_THRESHOLD`].
    pub fn from_raw(kind: ChallengeKind, raw: &[String]) -> Self {
        match kind {
            ChallengeKind::Cuisine => {
                Self::Cuisine(dedup(raw.iter().map(|c| c.trim().to_lowercase())))
            }
            ChallengeKind::Restaurant => Self::Restaurant(dedup(raw.iter().cloned())),
            ChallengeKind::Rating => Self::Rating {
                threshold: raw
                    .first()
                    .and_then(|t| parse_leading_int(t))
                    .unwrap_or(DEFAULT_RATING_THRESHOLD),
            },
            ChallengeKind::Dish => Self::Dish(dedup(
                raw.iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty()),
            )),
        }
    }

    /// The kind this criteria belongs to.
    pub fn kind(&self) -> ChallengeKind {
        match self {
            Self::Cuisine(_) => ChallengeKind::Cuisine,
            Self::Restaurant(_) => ChallengeKind::Restaurant,
            Self::Rating { .. } => ChallengeKind::Rating,
            Self::Dish(_) => ChallengeKind::Dish,
        }
    }

    /// Back to the stored string-list form.
    pub fn to_raw(&self) -> Vec<String> {
        match self {
            Self::Cuisine(values) | Self::Restaurant(values) | Self::Dish(values) => values.clone(),
            Self::Rating { threshold } => vec![threshold.to_string()],
        }
    }

    /// Whether the entry satisfies this criteria.
    ///
    /// `cuisines` is the entry's inferred tag set, computed once per
    /// evaluation by the caller.
    fn matches(&self, entry: &Entry, cuisines: &BTreeSet<String>) -> bool {
        match self {
            Self::Cuisine(wanted) => wanted.iter().any(|tag| cuisines.contains(tag)),
            Self::Restaurant(ids) => {
                ids.contains(&entry.restaurant_name)
                    || entry
                        .place_id
                        .as_ref()
                        .is_some_and(|place_id| ids.contains(place_id))
            }
            Self::Rating { threshold } => {
                entry.dishes.iter().any(|d| d.overall_rating >= *threshold)
            }
            Self::Dish(keywords) => entry.dishes.iter().any(|d| {
                let name = d.name.to_lowercase();
                keywords.iter().any(|kw| name.contains(kw.as_str()))
            }),
        }
    }
}

/// Keep the first occurrence of each value.
fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

/// Integer prefix of `raw` after leading whitespace, with an optional sign.
/// `None` when there are no digits or the value does not fit.
fn parse_leading_int(raw: &str) -> Option<i16> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits = raw[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len() - sign_len);
    if digits == 0 {
        return None;
    }
    raw[..sign_len + digits].parse().ok()
}

impl Serialize for ChallengeCriteria {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A per-user challenge with resolved criteria.
///
/// The challenge type is not stored separately; it is always
/// `criteria.kind()`.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: DbId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub criteria: ChallengeCriteria,
    pub progress: i32,
    pub goal: i32,
    pub completed: bool,
}

impl Challenge {
    pub fn kind(&self) -> ChallengeKind {
        self.criteria.kind()
    }

    /// A challenge is complete once progress has reached the goal.
    pub fn is_complete(&self) -> bool {
        self.progress >= self.goal
    }
}

/// Wire shape of a [`Challenge`], with `type` taken from the criteria.
#[derive(Serialize)]
struct ChallengeBody<'a> {
    id: DbId,
    user_id: &'a str,
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: ChallengeKind,
    criteria: &'a ChallengeCriteria,
    progress: i32,
    goal: i32,
    completed: bool,
}

impl Serialize for Challenge {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChallengeBody {
            id: self.id,
            user_id: &self.user_id,
            name: &self.name,
            description: &self.description,
            kind: self.kind(),
            criteria: &self.criteria,
            progress: self.progress,
            goal: self.goal,
            completed: self.completed,
        }
        .serialize(serializer)
    }
}

/// Input for creating a challenge row.
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub criteria: ChallengeCriteria,
    pub goal: i32,
}

/// A single progress change produced by [`evaluate_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengeUpdate {
    pub challenge_id: DbId,
    pub progress: i32,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Advance every open challenge the entry satisfies.
///
/// Each matching challenge gains exactly one point no matter how many
/// dishes match. Challenges already at their goal are skipped. Only
/// changed challenges appear in the result, in input order.
pub fn evaluate_entry(entry: &Entry, challenges: &[Challenge]) -> Vec<ChallengeUpdate> {
    let cuisines = infer_cuisines(&entry.restaurant_name);

    challenges
        .iter()
        .filter(|c| !c.is_complete())
        .filter(|c| c.criteria.matches(entry, &cuisines))
        .map(|c| advance(c.id, c.progress, c.goal))
        .collect()
}

/// Compute the update for one point of progress.
pub fn advance(challenge_id: DbId, progress: i32, goal: i32) -> ChallengeUpdate {
    let progress = (progress + 1).min(goal);
    ChallengeUpdate {
        challenge_id,
        progress,
        completed: progress >= goal,
    }
}

/// Clamp a manually supplied progress value into `0..=goal` and derive the
/// matching `completed` flag.
pub fn clamp_progress(challenge_id: DbId, progress: i32, goal: i32) -> ChallengeUpdate {
    let progress = progress.clamp(0, goal);
    ChallengeUpdate {
        challenge_id,
        progress,
        completed: progress >= goal,
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Names of the default challenges, in seeding order.
pub const DEFAULT_CHALLENGE_NAMES: &[&str] = &[
    "Around the World",
    "Local Explorer",
    "Foodie's Choice",
    "Pasta Perfection",
];

/// The four challenges every user starts with.
pub fn default_challenges(user_id: &str) -> Vec<NewChallenge> {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();

    vec![
        NewChallenge {
            user_id: user_id.to_string(),
            name: DEFAULT_CHALLENGE_NAMES[0].to_string(),
            description: "Try 10 different international cuisines".to_string(),
            criteria: ChallengeCriteria::from_raw(
                ChallengeKind::Cuisine,
                &strings(&[
                    "italian",
                    "mexican",
                    "chinese",
                    "japanese",
                    "indian",
                    "thai",
                    "vietnamese",
                    "american",
                    "french",
                    "korean",
                ]),
            ),
            goal: 10,
        },
        NewChallenge {
            user_id: user_id.to_string(),
            name: DEFAULT_CHALLENGE_NAMES[1].to_string(),
            description: "Visit 15 different local restaurants".to_string(),
            criteria: ChallengeCriteria::Restaurant(Vec::new()),
            goal: 15,
        },
        NewChallenge {
            user_id: user_id.to_string(),
            name: DEFAULT_CHALLENGE_NAMES[2].to_string(),
            description: "Try dishes with a rating above 8".to_string(),
            criteria: ChallengeCriteria::Rating {
                threshold: DEFAULT_RATING_THRESHOLD,
            },
            goal: 10,
        },
        NewChallenge {
            user_id: user_id.to_string(),
            name: DEFAULT_CHALLENGE_NAMES[3].to_string(),
            description: "Try 5 different Italian pasta dishes".to_string(),
            criteria: ChallengeCriteria::from_raw(
                ChallengeKind::Dish,
                &strings(&[
                    "pasta",
                    "spaghetti",
                    "fettuccine",
                    "linguine",
                    "ravioli",
                    "lasagna",
                    "penne",
                ]),
            ),
            goal: 5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::meal::Dish;

    // -- Helpers --------------------------------------------------------------

    fn dish(name: &str, overall: i16) -> Dish {
        Dish {
            id: 1,
            name: name.to_string(),
            photo: None,
            overall_rating: overall,
            price_value_rating: 0,
            taste_rating: 0,
            vibe_rating: 0,
            comments: None,
            cuisine: crate::cuisine::detect_dish_cuisine(name),
        }
    }

    fn entry(restaurant: &str, dishes: Vec<Dish>) -> Entry {
        Entry {
            id: 100,
            user_id: "user-1".to_string(),
            restaurant_name: restaurant.to_string(),
            restaurant_address: "1 Main St".to_string(),
            place_id: None,
            maps_url: None,
            date_visited: Utc::now(),
            dishes,
        }
    }

    fn challenge(id: DbId, kind: ChallengeKind, criteria: &[&str], progress: i32, goal: i32) -> Challenge {
        let raw: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();
        Challenge {
            id,
            user_id: "user-1".to_string(),
            name: format!("challenge {id}"),
            description: String::new(),
            criteria: ChallengeCriteria::from_raw(kind, &raw),
            progress,
            goal,
            completed: progress >= goal,
        }
    }

    const KNOWN_CUISINES: &[&str] = &[
        "italian", "mexican", "chinese", "japanese", "indian", "thai", "vietnamese", "american",
        "french", "korean",
    ];

    // -- ChallengeKind --------------------------------------------------------

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            ChallengeKind::Cuisine,
            ChallengeKind::Restaurant,
            ChallengeKind::Rating,
            ChallengeKind::Dish,
        ] {
            assert_eq!(ChallengeKind::from_str_value(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn kind_rejects_unknown() {
        let err = ChallengeKind::from_str_value("streak").unwrap_err();
        assert!(err.contains("Invalid challenge type"));
    }

    // -- Criteria resolution --------------------------------------------------

    #[test]
    fn rating_threshold_parsed_from_first_element() {
        let criteria = ChallengeCriteria::from_raw(ChallengeKind::Rating, &["7".to_string()]);
        assert_eq!(criteria, ChallengeCriteria::Rating { threshold: 7 });
    }

    #[test]
    fn rating_threshold_defaults_when_missing() {
        let criteria = ChallengeCriteria::from_raw(ChallengeKind::Rating, &[]);
        assert_eq!(criteria, ChallengeCriteria::Rating { threshold: 8 });
    }

    #[test]
    fn rating_threshold_defaults_when_not_numeric() {
        let criteria = ChallengeCriteria::from_raw(ChallengeKind::Rating, &["high".to_string()]);
        assert_eq!(criteria, ChallengeCriteria::Rating { threshold: 8 });
    }

    #[test]
    fn rating_threshold_uses_leading_integer() {
        let threshold = |raw: &str| {
            match ChallengeCriteria::from_raw(ChallengeKind::Rating, &[raw.to_string()]) {
                ChallengeCriteria::Rating { threshold } => threshold,
                other => panic!("unexpected criteria {other:?}"),
            }
        };

        assert_eq!(threshold("7.5"), 7);
        assert_eq!(threshold("9 stars"), 9);
        assert_eq!(threshold("  6"), 6);
        assert_eq!(threshold("+5"), 5);
        assert_eq!(threshold("-"), 8);
        assert_eq!(threshold(""), 8);
        assert_eq!(threshold("99999999"), 8);
    }

    #[test]
    fn list_criteria_keep_stored_order() {
        let raw: Vec<String> = ["Thai", "italian", "thai", "French"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let criteria = ChallengeCriteria::from_raw(ChallengeKind::Cuisine, &raw);
        assert_eq!(criteria.to_raw(), vec!["thai", "italian", "french"]);

        let seeded = &default_challenges("user-1")[0].criteria;
        assert_eq!(seeded.to_raw(), KNOWN_CUISINES);
    }

    #[test]
    fn challenge_type_follows_criteria() {
        let c = challenge(3, ChallengeKind::Dish, &["ramen"], 0, 2);
        assert_eq!(c.kind(), ChallengeKind::Dish);

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "dish");
        assert_eq!(json["criteria"], serde_json::json!(["ramen"]));
    }

    #[test]
    fn dish_keywords_lower_cased() {
        let criteria = ChallengeCriteria::from_raw(
            ChallengeKind::Dish,
            &["Pasta".to_string(), " RAVIOLI ".to_string(), "".to_string()],
        );
        assert_eq!(
            criteria,
            ChallengeCriteria::Dish(vec!["pasta".to_string(), "ravioli".to_string()])
        );
    }

    #[test]
    fn criteria_kind_matches_construction() {
        for kind in [
            ChallengeKind::Cuisine,
            ChallengeKind::Restaurant,
            ChallengeKind::Rating,
            ChallengeKind::Dish,
        ] {
            assert_eq!(ChallengeCriteria::from_raw(kind, &[]).kind(), kind);
        }
    }

    #[test]
    fn criteria_serializes_as_string_list() {
        let criteria = ChallengeCriteria::Rating { threshold: 9 };
        assert_eq!(serde_json::to_value(&criteria).unwrap(), serde_json::json!(["9"]));
    }

    // -- Evaluation scenarios -------------------------------------------------

    #[test]
    fn trattoria_scenario_advances_cuisine_and_rating() {
        let e = entry("Luigi's Trattoria", vec![dish("Margherita", 9)]);
        let challenges = vec![
            challenge(1, ChallengeKind::Cuisine, KNOWN_CUISINES, 2, 10),
            challenge(2, ChallengeKind::Rating, &["8"], 3, 10),
        ];

        let updates = evaluate_entry(&e, &challenges);
        assert_eq!(
            updates,
            vec![
                ChallengeUpdate { challenge_id: 1, progress: 3, completed: false },
                ChallengeUpdate { challenge_id: 2, progress: 4, completed: false },
            ]
        );
    }

    #[test]
    fn spaghetti_scenario_completes_dish_challenge() {
        let e = entry("Corner Kitchen", vec![dish("Spaghetti Carbonara", 6)]);
        let challenges = vec![challenge(
            7,
            ChallengeKind::Dish,
            &["pasta", "spaghetti", "fettuccine", "linguine", "ravioli", "lasagna", "penne"],
            4,
            5,
        )];

        let updates = evaluate_entry(&e, &challenges);
        assert_eq!(
            updates,
            vec![ChallengeUpdate { challenge_id: 7, progress: 5, completed: true }]
        );
    }

    #[test]
    fn unknown_cuisine_is_excluded() {
        let e = entry("The Blue Door", vec![dish("House Salad", 7)]);
        let challenges = vec![challenge(1, ChallengeKind::Cuisine, KNOWN_CUISINES, 0, 10)];

        assert!(evaluate_entry(&e, &challenges).is_empty());
    }

    #[test]
    fn many_matching_dishes_advance_once() {
        let dishes = (0..6).map(|i| dish(&format!("Pizza {i}"), 10)).collect();
        let e = entry("Joe's Pizza", dishes);
        let challenges = vec![
            challenge(1, ChallengeKind::Cuisine, &["italian"], 0, 10),
            challenge(2, ChallengeKind::Rating, &["8"], 0, 10),
        ];

        let updates = evaluate_entry(&e, &challenges);
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| u.progress == 1));
    }

    #[test]
    fn completed_challenges_are_skipped() {
        let e = entry("Joe's Pizza", vec![dish("Pepperoni Pizza", 10)]);
        let challenges = vec![
            challenge(1, ChallengeKind::Cuisine, &["italian"], 10, 10),
            challenge(2, ChallengeKind::Rating, &["8"], 10, 10),
        ];

        assert!(evaluate_entry(&e, &challenges).is_empty());
    }

    #[test]
    fn restaurant_matches_name_or_place_id() {
        let mut e = entry("Sushi Express", vec![dish("Salmon Roll", 7)]);
        e.place_id = Some("place-42".to_string());
        let challenges = vec![
            challenge(1, ChallengeKind::Restaurant, &["Sushi Express"], 0, 3),
            challenge(2, ChallengeKind::Restaurant, &["place-42"], 0, 3),
            challenge(3, ChallengeKind::Restaurant, &["sushi express"], 0, 3),
        ];

        let ids: Vec<DbId> = evaluate_entry(&e, &challenges)
            .iter()
            .map(|u| u.challenge_id)
            .collect();
        // Restaurant names are compared exactly.
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_restaurant_criteria_never_matches() {
        let e = entry("Sushi Express", vec![dish("Salmon Roll", 7)]);
        let challenges = vec![challenge(1, ChallengeKind::Restaurant, &[], 0, 15)];

        assert!(evaluate_entry(&e, &challenges).is_empty());
    }

    #[test]
    fn rating_below_threshold_does_not_match() {
        let e = entry("Diner", vec![dish("Club Sandwich", 7), dish("Fries", 5)]);
        let challenges = vec![challenge(1, ChallengeKind::Rating, &["8"], 0, 10)];

        assert!(evaluate_entry(&e, &challenges).is_empty());
    }

    #[test]
    fn dish_keywords_match_case_insensitively() {
        let e = entry("Diner", vec![dish("Baked LASAGNA", 7)]);
        let challenges = vec![challenge(1, ChallengeKind::Dish, &["Lasagna"], 0, 5)];

        assert_eq!(evaluate_entry(&e, &challenges).len(), 1);
    }

    #[test]
    fn completed_flag_tracks_progress_after_every_update() {
        let e = entry("Joe's Pizza", vec![dish("Pepperoni Pizza", 9)]);
        let mut challenges = vec![
            challenge(1, ChallengeKind::Cuisine, &["italian"], 0, 3),
            challenge(2, ChallengeKind::Rating, &["8"], 1, 2),
        ];

        for _ in 0..4 {
            for update in evaluate_entry(&e, &challenges) {
                let c = challenges
                    .iter_mut()
                    .find(|c| c.id == update.challenge_id)
                    .unwrap();
                c.progress = update.progress;
                c.completed = update.completed;
            }
            for c in &challenges {
                assert!(c.progress <= c.goal);
                assert_eq!(c.completed, c.progress >= c.goal);
            }
        }
        assert!(challenges.iter().all(|c| c.completed));
    }

    // -- Helpers --------------------------------------------------------------

    #[test]
    fn clamp_progress_bounds() {
        assert_eq!(clamp_progress(1, -3, 5).progress, 0);
        assert_eq!(clamp_progress(1, 9, 5), ChallengeUpdate { challenge_id: 1, progress: 5, completed: true });
    }

    // -- Defaults -------------------------------------------------------------

    #[test]
    fn default_set_has_four_challenges() {
        let defaults = default_challenges("user-1");
        assert_eq!(defaults.len(), 4);

        let names: Vec<&str> = defaults.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CHALLENGE_NAMES);

        let kinds: Vec<ChallengeKind> = defaults.iter().map(|c| c.criteria.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ChallengeKind::Cuisine,
                ChallengeKind::Restaurant,
                ChallengeKind::Rating,
                ChallengeKind::Dish,
            ]
        );

        let goals: Vec<i32> = defaults.iter().map(|c| c.goal).collect();
        assert_eq!(goals, vec![10, 15, 10, 5]);
    }

    #[test]
    fn default_criteria_contents() {
        let defaults = default_challenges("user-1");
        assert_eq!(defaults[0].criteria.to_raw().len(), 10);
        assert!(defaults[1].criteria.to_raw().is_empty());
        assert_eq!(defaults[2].criteria.to_raw(), vec!["8".to_string()]);
        assert_eq!(defaults[3].criteria.to_raw().len(), 7);
        assert!(defaults.iter().all(|c| c.user_id == "user-1"));
    }
}
