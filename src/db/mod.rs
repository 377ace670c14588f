use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::AppResult;

pub mod connection;
pub mod memory_store;
pub mod mongo_store;
pub mod seed;

/// Repository over polls and their choices. Handlers only ever reach the data
/// through this trait, so every backend must keep `increment_votes` atomic.
#[async_trait]
pub trait PollStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// Most recently published polls first, at most `limit` of them.
    async fn latest_polls(&self, limit: usize) -> AppResult<Vec<Poll>>;

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>>;

    /// Exact match on the stored (trimmed) question text.
    async fn find_poll_by_question(&self, question: &str) -> AppResult<Option<Poll>>;

    /// Choices of a poll in insertion order.
    async fn choices_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Choice>>;

    /// Adds one vote to the choice. Returns `false` when no such choice exists.
    async fn increment_votes(&self, choice_id: ObjectId) -> AppResult<bool>;

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()>;

    async fn insert_choice(&self, choice: &Choice) -> AppResult<()>;
}

pub async fn init_store(config: &Config) -> AppResult<Arc<dyn PollStore>> {
    let store: Arc<dyn PollStore> = match config.store {
        StoreBackend::Mongo => {
            let database = connection::init_db(config).await?;
            let store = mongo_store::MongoPollStore::new(&database);
            store.ensure_indexes().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => Arc::new(memory_store::InMemoryPollStore::default()),
    };

    info!(backend = store.backend_tag(), "Poll store ready");
    Ok(store)
}
