use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};

/// Plain `302 Found`. axum's `Redirect` only offers 303, 307 and 308.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

pub fn poll_detail_path(poll_id: &str) -> String {
    format!("/polls/{}", poll_id)
}
