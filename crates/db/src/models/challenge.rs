//! Challenge row model.

use platewise_core::challenge::{Challenge, ChallengeCriteria, ChallengeKind};
use platewise_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `challenges` table, criteria still in stored form.
#[derive(Debug, Clone, FromRow)]
pub struct ChallengeRow {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub challenge_type: String,
    pub criteria: Vec<String>,
    pub progress: i32,
    pub goal: i32,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ChallengeRow> for Challenge {
    type Error = String;

    /// Resolve the stored type string and criteria list into typed criteria.
    fn try_from(row: ChallengeRow) -> Result<Self, Self::Error> {
        let kind = ChallengeKind::from_str_value(&row.challenge_type)?;
        Ok(Challenge {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            criteria: ChallengeCriteria::from_raw(kind, &row.criteria),
            progress: row.progress,
            goal: row.goal,
            completed: row.completed,
        })
    }
}
