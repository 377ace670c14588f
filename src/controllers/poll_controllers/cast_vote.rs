use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::Method,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::controllers::poll_controllers::{models::VoteForm, parse_poll_id};
use crate::services::votes::record_vote;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::flash::{set_flash, Flash};
use crate::utils::redirect::{found, poll_detail_path};

/// Standalone vote endpoint. The choice is not checked against the poll in
/// the path, and every outcome other than an unknown poll or a store failure
/// ends in a redirect to the poll page.
pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    method: Method,
    jar: CookieJar,
    form: Result<Form<VoteForm>, FormRejection>,
) -> AppResult<Response> {
    let poll_obj_id = parse_poll_id(&poll_id)?;
    let poll = state
        .store
        .find_poll(poll_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let location = poll_detail_path(&poll.id.to_hex());

    let outcome = if method != Method::POST {
        Err(AppError::ValidationError("Votes must be submitted with POST".to_string()))
    } else {
        match form {
            Ok(Form(form)) => match form.choice_id() {
                Ok(choice_id) => record_vote(state.store.as_ref(), choice_id)
                    .await
                    .map(|()| choice_id),
                Err(e) => Err(e),
            },
            Err(rejection) => Err(AppError::ValidationError(rejection.body_text())),
        }
    };

    match outcome {
        Ok(choice_id) => {
            info!(poll = %poll.id, choice = %choice_id, "Vote accepted");
            Ok((set_flash(jar, Flash::Voted, poll.id), found(&location)).into_response())
        }
        Err(e @ (AppError::ValidationError(_) | AppError::NotFound(_))) => {
            warn!(poll = %poll.id, error = %e, "Vote rejected");
            let jar = set_flash(jar, Flash::InvalidChoice, poll.id);
            Ok((jar, found(&location)).into_response())
        }
        Err(e) => Err(e),
    }
}
