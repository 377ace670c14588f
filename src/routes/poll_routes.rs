use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{cast_vote, get_poll, get_results};
use crate::state::AppState;

pub fn poll_page_routes(state: AppState) -> Router {
    Router::new()
        .route("/:poll_id", get(get_poll::get_poll).post(get_poll::vote_on_poll))
        .route("/:poll_id/vote", post(cast_vote::cast_vote).get(cast_vote::cast_vote))
        .with_state(state)
}

pub fn poll_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/:poll_id/results", get(get_results::get_results))
        .with_state(state)
}
