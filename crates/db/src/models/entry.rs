//! Entry and dish row models.

use platewise_core::cuisine::detect_dish_cuisine;
use platewise_core::meal::{Dish, Entry};
use platewise_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: DbId,
    pub user_id: String,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub place_id: Option<String>,
    pub maps_url: Option<String>,
    pub date_visited: Timestamp,
    pub created_at: Timestamp,
}

/// A row from the `entry_dishes` table.
#[derive(Debug, Clone, FromRow)]
pub struct DishRow {
    pub id: DbId,
    pub entry_id: DbId,
    pub position: i32,
    pub name: String,
    pub photo: Option<String>,
    pub overall_rating: i16,
    pub price_value_rating: i16,
    pub taste_rating: i16,
    pub vibe_rating: i16,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl EntryRow {
    /// Attach the entry's dishes (already in `position` order).
    pub fn into_entry(self, dishes: Vec<DishRow>) -> Entry {
        Entry {
            id: self.id,
            user_id: self.user_id,
            restaurant_name: self.restaurant_name,
            restaurant_address: self.restaurant_address,
            place_id: self.place_id,
            maps_url: self.maps_url,
            date_visited: self.date_visited,
            dishes: dishes.into_iter().map(DishRow::into_dish).collect(),
        }
    }
}

impl DishRow {
    pub fn into_dish(self) -> Dish {
        let cuisine = detect_dish_cuisine(&self.name);
        Dish {
            id: self.id,
            name: self.name,
            photo: self.photo,
            overall_rating: self.overall_rating,
            price_value_rating: self.price_value_rating,
            taste_rating: self.taste_rating,
            vibe_rating: self.vibe_rating,
            comments: self.comments,
            cuisine,
        }
    }
}
