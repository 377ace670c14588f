use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database, IndexModel,
};
use tracing::{debug, info};

use crate::db::PollStore;
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::{AppError, AppResult};

const POLLS: &str = "polls";
const CHOICES: &str = "choices";

pub struct MongoPollStore {
    polls: Collection<Poll>,
    choices: Collection<Choice>,
}

impl MongoPollStore {
    pub fn new(db: &Database) -> Self {
        Self {
            polls: db.collection::<Poll>(POLLS),
            choices: db.collection::<Choice>(CHOICES),
        }
    }

    /// Indexes for the listing sort, seed lookups and the per-poll choice scan
    /// the results feed runs on every refresh. Creating an existing index is a no-op.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.polls
            .create_index(IndexModel::builder().keys(doc! { "pub_date": -1 }).build())
            .await?;
        self.polls
            .create_index(IndexModel::builder().keys(doc! { "question": 1 }).build())
            .await?;
        self.choices
            .create_index(IndexModel::builder().keys(doc! { "poll_id": 1, "_id": 1 }).build())
            .await?;

        info!("MongoDB indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl PollStore for MongoPollStore {
    fn backend_tag(&self) -> &'static str {
        "mongo"
    }

    async fn latest_polls(&self, limit: usize) -> AppResult<Vec<Poll>> {
        let limit = i64::try_from(limit)
            .map_err(|_| AppError::InternalError(format!("Poll limit {} out of range", limit)))?;

        let cursor = self
            .polls
            .find(doc! {})
            .sort(doc! { "pub_date": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.polls.find_one(doc! { "_id": poll_id }).await?)
    }

    async fn find_poll_by_question(&self, question: &str) -> AppResult<Option<Poll>> {
        Ok(self.polls.find_one(doc! { "question": question }).await?)
    }

    async fn choices_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Choice>> {
        // ObjectIds are generated client-side in creation order.
        let cursor = self
            .choices
            .find(doc! { "poll_id": poll_id })
            .sort(doc! { "_id": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn increment_votes(&self, choice_id: ObjectId) -> AppResult<bool> {
        let update_result = self
            .choices
            .update_one(
                doc! { "_id": choice_id },
                doc! { "$inc": { "votes": 1_i64 } },
            )
            .await?;

        debug!(
            choice = %choice_id,
            matched = update_result.matched_count,
            "Vote increment applied"
        );

        if update_result.matched_count == 0 {
            return Ok(false);
        }
        if update_result.modified_count == 0 {
            return Err(AppError::DatabaseError(
                "Failed to increment vote for choice".to_string(),
            ));
        }
        Ok(true)
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls.insert_one(poll).await?;
        Ok(())
    }

    async fn insert_choice(&self, choice: &Choice) -> AppResult<()> {
        self.choices.insert_one(choice).await?;
        Ok(())
    }
}
