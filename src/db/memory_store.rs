use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::db::PollStore;
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::AppResult;

#[derive(Default)]
struct Tables {
    polls: Vec<Poll>,
    choices: Vec<Choice>,
}

/// Process-local store. Everything lives behind one lock, so an increment
/// can never interleave with another write.
#[derive(Default)]
pub struct InMemoryPollStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl PollStore for InMemoryPollStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn latest_polls(&self, limit: usize) -> AppResult<Vec<Poll>> {
        let tables = self.tables.read().await;
        let mut polls = tables.polls.clone();
        polls.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        polls.truncate(limit);
        Ok(polls)
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        let tables = self.tables.read().await;
        Ok(tables.polls.iter().find(|p| p.id == poll_id).cloned())
    }

    async fn find_poll_by_question(&self, question: &str) -> AppResult<Option<Poll>> {
        let tables = self.tables.read().await;
        Ok(tables.polls.iter().find(|p| p.question == question).cloned())
    }

    async fn choices_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Choice>> {
        let tables = self.tables.read().await;
        Ok(tables
            .choices
            .iter()
            .filter(|c| c.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn increment_votes(&self, choice_id: ObjectId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.choices.iter_mut().find(|c| c.id == choice_id) {
            Some(choice) => {
                choice.votes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.tables.write().await.polls.push(poll.clone());
        Ok(())
    }

    async fn insert_choice(&self, choice: &Choice) -> AppResult<()> {
        self.tables.write().await.choices.push(choice.clone());
        Ok(())
    }
}
