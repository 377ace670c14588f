use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::db::PollStore;
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceTally {
    pub choice_text: String,
    pub votes: i64,
}

/// Snapshot of a poll and its choices as read from the store.
#[derive(Debug, Clone)]
pub struct PollResults {
    pub poll: Poll,
    pub choices: Vec<Choice>,
    pub total_votes: i64,
}

impl PollResults {
    pub fn breakdown(&self) -> Vec<ChoiceTally> {
        self.choices
            .iter()
            .map(|choice| ChoiceTally {
                choice_text: choice.choice_text.clone(),
                votes: choice.votes,
            })
            .collect()
    }
}

pub fn total_votes(choices: &[Choice]) -> i64 {
    choices.iter().map(|c| c.votes).sum()
}

pub async fn poll_results(store: &dyn PollStore, poll_id: ObjectId) -> AppResult<PollResults> {
    let poll = store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let choices = store.choices_for_poll(poll.id).await?;
    let total_votes = total_votes(&choices);

    Ok(PollResults {
        poll,
        choices,
        total_votes,
    })
}
