use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::poll_models::Choice;
use crate::services::results::{ChoiceTally, PollResults};
use crate::utils::error::{AppError, AppResult};

pub const MISSING_CHOICE: &str = "You didn't select a choice.";
pub const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Urlencoded vote form: `choice` is required and must name an existing choice.
#[derive(Deserialize, Debug, Default)]
pub struct VoteForm {
    #[serde(default)]
    pub choice: Option<String>,
}

impl VoteForm {
    /// Checks presence and shape only; the choice may belong to any poll.
    pub fn choice_id(&self) -> AppResult<ObjectId> {
        let raw = self
            .choice
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::ValidationError(MISSING_CHOICE.to_string()))?;

        ObjectId::parse_str(raw).map_err(|_| AppError::ValidationError(INVALID_CHOICE.to_string()))
    }

    /// Full check: the choice must be one of `choices`, the target poll's own.
    pub fn validate_for(&self, choices: &[Choice]) -> AppResult<ObjectId> {
        let choice_id = self.choice_id()?;

        if !choices.iter().any(|c| c.id == choice_id) {
            return Err(AppError::ValidationError(INVALID_CHOICE.to_string()));
        }
        Ok(choice_id)
    }
}

#[derive(Serialize, Debug)]
pub struct ResultsResponse {
    pub results: Vec<ChoiceTally>,
    pub total_votes: i64,
}

impl From<&PollResults> for ResultsResponse {
    fn from(results: &PollResults) -> Self {
        Self {
            results: results.breakdown(),
            total_votes: results.total_votes,
        }
    }
}
