//! Entries (restaurant visits) and the dishes rated within them.
//!
//! Entries are immutable once stored. [`NewEntry`] is the validated input
//! used to create one; [`Entry`] is what the store hands back.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest and highest value any rating may take. `0` means "not rated".
pub const MIN_RATING: i16 = 0;
pub const MAX_RATING: i16 = 10;

/// Maximum number of dishes accepted in a single entry.
pub const MAX_DISHES_PER_ENTRY: usize = 50;

/// Maximum length of a restaurant or dish name.
pub const MAX_NAME_LENGTH: u64 = 200;

// ---------------------------------------------------------------------------
// Stored entities
// ---------------------------------------------------------------------------

/// One restaurant visit with its rated dishes.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub user_id: UserId,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub place_id: Option<String>,
    pub maps_url: Option<String>,
    pub date_visited: Timestamp,
    /// Submission order is preserved.
    pub dishes: Vec<Dish>,
}

/// One rated item within an [`Entry`].
#[derive(Debug, Clone, Serialize)]
pub struct Dish {
    pub id: DbId,
    pub name: String,
    pub photo: Option<String>,
    pub overall_rating: i16,
    pub price_value_rating: i16,
    pub taste_rating: i16,
    pub vibe_rating: i16,
    pub comments: Option<String>,
    /// Cuisine hint derived from the dish name; see
    /// [`crate::cuisine::detect_dish_cuisine`].
    pub cuisine: &'static str,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Restaurant selected for a new entry (usually from a places search).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Restaurant {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub place_id: Option<String>,
    pub url: Option<String>,
}

/// A dish as submitted by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDish {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    pub photo: Option<String>,
    #[validate(range(min = 1, max = MAX_RATING))]
    pub overall_rating: i16,
    #[serde(default)]
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub price_value_rating: i16,
    #[serde(default)]
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub taste_rating: i16,
    #[serde(default)]
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub vibe_rating: i16,
    pub comments: Option<String>,
}

/// Everything needed to persist a new entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: UserId,
    pub restaurant: Restaurant,
    pub dishes: Vec<NewDish>,
}

impl NewEntry {
    /// Check the entry before any store write.
    ///
    /// Rejects a missing owner, a blank restaurant name, an empty (or
    /// oversized) dish list, and any dish with a blank name or an
    /// out-of-range rating.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::Validation("User ID is required".into()));
        }
        validate_not_blank("restaurant.name", &self.restaurant.name)?;
        validate_dish_count(self.dishes.len())?;

        self.restaurant.validate()?;
        for (index, dish) in self.dishes.iter().enumerate() {
            validate_not_blank(&format!("dishes[{index}].name"), &dish.name)?;
            dish.validate()
                .map_err(|e| CoreError::Validation(format!("dishes[{index}]: {e}")))?;
        }
        Ok(())
    }
}

/// Reject empty or whitespace-only text.
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// An entry needs at least one dish and at most [`MAX_DISHES_PER_ENTRY`].
pub fn validate_dish_count(count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "Restaurant and dishes are required".into(),
        ));
    }
    if count > MAX_DISHES_PER_ENTRY {
        return Err(CoreError::Validation(format!(
            "An entry may contain at most {MAX_DISHES_PER_ENTRY} dishes, got {count}"
        )));
    }
    Ok(())
}
