use axum::{extract::State, response::Html};

use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::views;

pub const LATEST_POLLS_LIMIT: usize = 5;

pub async fn list_polls(State(state): State<AppState>) -> AppResult<Html<String>> {
    let polls = state.store.latest_polls(LATEST_POLLS_LIMIT).await?;

    Ok(Html(views::index_page(&polls)))
}
