//! Repository for the `challenges` table.

use platewise_core::challenge::{default_challenges, Challenge, ChallengeUpdate, NewChallenge};
use platewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::challenge::ChallengeRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, challenge_type, criteria, \
                       progress, goal, completed, created_at, updated_at";

/// Provides CRUD operations for per-user challenges.
pub struct ChallengeRepo;

impl ChallengeRepo {
    /// All challenges for a user, in creation order.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE user_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, ChallengeRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        rows.into_iter().map(into_domain).collect()
    }

    /// Find one challenge owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
    ) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, ChallengeRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .map(into_domain)
            .transpose()
    }

    /// Point update of progress and completion on a challenge owned by
    /// `user_id`.
    ///
    /// The table's check constraints reject a `completed` flag that
    /// disagrees with `progress >= goal`, or progress outside `0..=goal`.
    /// Returns the updated challenge, or `None` if the user has no
    /// challenge with this id.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        update: &ChallengeUpdate,
    ) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!(
            "UPDATE challenges SET progress = $2, completed = $3 \
             WHERE id = $1 AND user_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChallengeRow>(&query)
            .bind(update.challenge_id)
            .bind(update.progress)
            .bind(update.completed)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .map(into_domain)
            .transpose()
    }

    /// Optimistic write of an evaluated update.
    ///
    /// Only applies if the row's progress still equals `expected_progress`
    /// (the value the update was computed from). Returns `false` when
    /// another writer got there first.
    pub async fn apply_update(
        pool: &PgPool,
        update: &ChallengeUpdate,
        expected_progress: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE challenges SET progress = $2, completed = $3 \
             WHERE id = $1 AND progress = $4",
        )
        .bind(update.challenge_id)
        .bind(update.progress)
        .bind(update.completed)
        .bind(expected_progress)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a batch of challenges in one transaction.
    ///
    /// A challenge whose `(user_id, name)` already exists is skipped.
    /// Returns the number of rows actually inserted.
    pub async fn create_batch(pool: &PgPool, challenges: &[NewChallenge]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for challenge in challenges {
            let result = sqlx::query(
                "INSERT INTO challenges (user_id, name, description, challenge_type, criteria, goal) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (user_id, name) DO NOTHING",
            )
            .bind(&challenge.user_id)
            .bind(&challenge.name)
            .bind(&challenge.description)
            .bind(challenge.criteria.kind().as_str())
            .bind(challenge.criteria.to_raw())
            .bind(challenge.goal)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Return the user's challenges, seeding the default set first if the
    /// user has none.
    ///
    /// Safe to call repeatedly or concurrently: the unique `(user_id, name)`
    /// constraint keeps the default set from being duplicated.
    pub async fn ensure_defaults(pool: &PgPool, user_id: &str) -> Result<Vec<Challenge>, sqlx::Error> {
        let existing = Self::list_by_user(pool, user_id).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let inserted = Self::create_batch(pool, &default_challenges(user_id)).await?;
        tracing::info!(user_id, inserted, "Seeded default challenges");

        Self::list_by_user(pool, user_id).await
    }
}

/// Convert a row, surfacing an unknown stored type as a decode error.
fn into_domain(row: ChallengeRow) -> Result<Challenge, sqlx::Error> {
    Challenge::try_from(row).map_err(|e| sqlx::Error::Decode(e.into()))
}
