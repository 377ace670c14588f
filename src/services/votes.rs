use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::db::PollStore;
use crate::utils::error::{AppError, AppResult};

/// Records one vote for `choice_id`. Every call counts; nothing is deduplicated.
pub async fn record_vote(store: &dyn PollStore, choice_id: ObjectId) -> AppResult<()> {
    if !store.increment_votes(choice_id).await? {
        return Err(AppError::NotFound("Choice not found".to_string()));
    }

    debug!(choice = %choice_id, "Vote recorded");
    Ok(())
}
