//! Repository for the `entries` and `entry_dishes` tables.
//!
//! Entries are append-only: there is no update or delete.

use std::collections::HashMap;

use platewise_core::meal::{Entry, NewEntry};
use platewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::entry::{DishRow, EntryRow};

/// Column list for `entries` queries.
const ENTRY_COLUMNS: &str = "\
    id, user_id, restaurant_name, restaurant_address, place_id, maps_url, \
    date_visited, created_at";

/// Column list for `entry_dishes` queries.
const DISH_COLUMNS: &str = "\
    id, entry_id, position, name, photo, overall_rating, price_value_rating, \
    taste_rating, vibe_rating, comments, created_at";

/// Default number of entries returned by [`EntryRepo::list_recent`].
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Maximum number of entries returned by [`EntryRepo::list_recent`].
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Provides create and read operations for entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert an entry and its dishes in one transaction, returning the
    /// stored entry with assigned ids and visit timestamp.
    ///
    /// The caller is expected to have run [`NewEntry::validate`].
    pub async fn create(pool: &PgPool, input: &NewEntry) -> Result<Entry, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO entries (user_id, restaurant_name, restaurant_address, place_id, maps_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, EntryRow>(&query)
            .bind(&input.user_id)
            .bind(input.restaurant.name.trim())
            .bind(input.restaurant.address.trim())
            .bind(non_empty(input.restaurant.place_id.as_deref()))
            .bind(non_empty(input.restaurant.url.as_deref()))
            .fetch_one(&mut *tx)
            .await?;

        let dish_query = format!(
            "INSERT INTO entry_dishes \
                 (entry_id, position, name, photo, overall_rating, price_value_rating, \
                  taste_rating, vibe_rating, comments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {DISH_COLUMNS}"
        );
        let mut dishes = Vec::with_capacity(input.dishes.len());
        for (position, dish) in input.dishes.iter().enumerate() {
            let row = sqlx::query_as::<_, DishRow>(&dish_query)
                .bind(entry.id)
                .bind(position as i32)
                .bind(dish.name.trim())
                .bind(non_empty(dish.photo.as_deref()))
                .bind(dish.overall_rating)
                .bind(dish.price_value_rating)
                .bind(dish.taste_rating)
                .bind(dish.vibe_rating)
                .bind(non_empty(dish.comments.as_deref()))
                .fetch_one(&mut *tx)
                .await?;
            dishes.push(row);
        }

        tx.commit().await?;

        Ok(entry.into_entry(dishes))
    }

    /// Find one entry owned by `user_id`.
    ///
    /// Returns `None` if the entry does not exist or belongs to someone else.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1 AND user_id = $2");
        let Some(entry) = sqlx::query_as::<_, EntryRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let mut dishes = Self::load_dishes(pool, &[entry.id]).await?;
        let entry_dishes = dishes.remove(&entry.id).unwrap_or_default();
        Ok(Some(entry.into_entry(entry_dishes)))
    }

    /// Most recent entries for a user, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_RECENT_LIMIT`] and is clamped to
    /// `1..=MAX_RECENT_LIMIT`.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let limit = clamp_limit(limit);

        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries \
             WHERE user_id = $1 \
             ORDER BY date_visited DESC, id DESC \
             LIMIT $2"
        );
        let entries = sqlx::query_as::<_, EntryRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
        let mut dishes = Self::load_dishes(pool, &ids).await?;

        Ok(entries
            .into_iter()
            .map(|e| {
                let entry_dishes = dishes.remove(&e.id).unwrap_or_default();
                e.into_entry(entry_dishes)
            })
            .collect())
    }

    /// Load dishes for a set of entries, grouped by entry id, each group in
    /// submission order.
    async fn load_dishes(
        pool: &PgPool,
        entry_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<DishRow>>, sqlx::Error> {
        if entry_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT {DISH_COLUMNS} FROM entry_dishes \
             WHERE entry_id = ANY($1) \
             ORDER BY entry_id, position"
        );
        let rows = sqlx::query_as::<_, DishRow>(&query)
            .bind(entry_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<DishRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.entry_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

/// Clamp a requested page size into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}

/// Optional text columns store `NULL` rather than empty strings.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), DEFAULT_RECENT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-4)), 1);
        assert_eq!(clamp_limit(Some(20)), 20);
        assert_eq!(clamp_limit(Some(10_000)), MAX_RECENT_LIMIT);
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" abc ")), Some("abc"));
    }
}
