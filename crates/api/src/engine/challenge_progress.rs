//! Applies challenge progress for a saved entry.
//!
//! Runs after the entry is persisted. Storage failures here are logged and
//! swallowed so they never fail the entry request; the caller only learns
//! which updates were actually written.

use platewise_core::challenge::{evaluate_entry, Challenge, ChallengeUpdate};
use platewise_core::meal::Entry;
use platewise_db::repositories::ChallengeRepo;
use sqlx::PgPool;

/// Evaluate `entry` against its owner's challenges and write the results.
///
/// Seeds the default challenges first if the owner has none. Each write is
/// conditional on the progress it was computed from; on a lost race the
/// challenge is reloaded and re-evaluated once.
pub async fn apply_entry(pool: &PgPool, entry: &Entry) -> Vec<ChallengeUpdate> {
    let challenges = match ChallengeRepo::ensure_defaults(pool, &entry.user_id).await {
        Ok(challenges) => challenges,
        Err(e) => {
            tracing::error!(
                user_id = %entry.user_id,
                entry_id = entry.id,
                error = %e,
                "Failed to load challenges for evaluation",
            );
            return Vec::new();
        }
    };

    let mut applied = Vec::new();
    for update in evaluate_entry(entry, &challenges) {
        let Some(current) = challenges.iter().find(|c| c.id == update.challenge_id) else {
            continue;
        };
        if let Some(written) = write(pool, entry, current, update).await {
            applied.push(written);
        }
    }

    if !applied.is_empty() {
        tracing::info!(
            user_id = %entry.user_id,
            entry_id = entry.id,
            updated = applied.len(),
            "Challenge progress applied",
        );
    }
    applied
}

/// Write one update, retrying once against a fresh read on conflict.
async fn write(
    pool: &PgPool,
    entry: &Entry,
    current: &Challenge,
    update: ChallengeUpdate,
) -> Option<ChallengeUpdate> {
    if try_apply(pool, &update, current.progress).await? {
        return Some(update);
    }

    let fresh = match ChallengeRepo::find_by_id(pool, &entry.user_id, current.id).await {
        Ok(Some(fresh)) => fresh,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!(challenge_id = current.id, error = %e, "Failed to reload challenge");
            return None;
        }
    };

    // Completed (or no longer matching) after the concurrent write.
    let retry = evaluate_entry(entry, std::slice::from_ref(&fresh)).pop()?;

    if try_apply(pool, &retry, fresh.progress).await? {
        return Some(retry);
    }
    tracing::warn!(
        challenge_id = fresh.id,
        entry_id = entry.id,
        "Challenge update lost a second concurrent write, dropping",
    );
    None
}

/// `None` on storage error (already logged).
async fn try_apply(pool: &PgPool, update: &ChallengeUpdate, expected: i32) -> Option<bool> {
    match ChallengeRepo::apply_update(pool, update, expected).await {
        Ok(written) => Some(written),
        Err(e) => {
            tracing::error!(
                challenge_id = update.challenge_id,
                error = %e,
                "Failed to write challenge progress",
            );
            None
        }
    }
}
