use mongodb::bson::oid::ObjectId;

use crate::utils::error::{AppError, AppResult};

pub mod cast_vote;
pub mod get_poll;
pub mod get_results;
pub mod models;
pub mod polls;

/// Path ids that are not valid ObjectIds can never match a record.
pub(crate) fn parse_poll_id(poll_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(poll_id).map_err(|_| AppError::NotFound("Poll not found".to_string()))
}
