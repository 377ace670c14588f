use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::{models::ResultsResponse, parse_poll_id};
use crate::services::results::poll_results;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// JSON tally the detail page re-polls to refresh its counters.
pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ResultsResponse>> {
    let poll_obj_id = parse_poll_id(&poll_id)?;
    let results = poll_results(state.store.as_ref(), poll_obj_id).await?;

    Ok(Json(ResultsResponse::from(&results)))
}
