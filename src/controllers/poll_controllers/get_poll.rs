use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::controllers::poll_controllers::{models::VoteForm, parse_poll_id};
use crate::services::{results::poll_results, votes::record_vote};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::flash::{set_flash, take_flash, Flash};
use crate::utils::redirect::{found, poll_detail_path};
use crate::views::{detail_page, DetailView};

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let poll_obj_id = parse_poll_id(&poll_id)?;
    let results = poll_results(state.store.as_ref(), poll_obj_id).await?;
    let (jar, flash) = take_flash(jar, poll_obj_id);

    let html = detail_page(&DetailView {
        results: &results,
        form_error: None,
        flash,
        refresh_interval_secs: state.refresh_interval_secs,
    });

    Ok((jar, Html(html)))
}

/// Form submission on the detail page. The choice has to belong to this poll;
/// otherwise the page is rendered again with the validation message.
pub async fn vote_on_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<VoteForm>, FormRejection>,
) -> AppResult<Response> {
    let poll_obj_id = parse_poll_id(&poll_id)?;
    let results = poll_results(state.store.as_ref(), poll_obj_id).await?;
    let form = form.map(|Form(f)| f).unwrap_or_default();

    match form.validate_for(&results.choices) {
        Ok(choice_id) => {
            record_vote(state.store.as_ref(), choice_id).await?;
            info!(poll = %poll_obj_id, choice = %choice_id, "Vote accepted");

            let jar = set_flash(jar, Flash::Voted, poll_obj_id);
            let location = poll_detail_path(&poll_obj_id.to_hex());
            Ok((jar, found(&location)).into_response())
        }
        Err(AppError::ValidationError(message)) => {
            let html = detail_page(&DetailView {
                results: &results,
                form_error: Some(&message),
                flash: None,
                refresh_interval_secs: state.refresh_interval_secs,
            });
            Ok(Html(html).into_response())
        }
        Err(e) => Err(e),
    }
}
