use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::controllers::{health, poll_controllers::polls};
use crate::state::AppState;

pub mod poll_routes;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(polls::list_polls))
        .route("/health", get(health::health))
        .with_state(state.clone())
        .nest("/polls", poll_routes::poll_page_routes(state.clone()))
        .nest("/api/polls", poll_routes::poll_api_routes(state))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
            Request, StatusCode,
        },
        response::Response,
    };
    use chrono::{Duration, TimeZone, Utc};
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;
    use tower::ServiceExt;

    use super::app;
    use crate::db::{memory_store::InMemoryPollStore, seed::create_poll, PollStore};
    use crate::models::poll_models::{Choice, Poll};
    use crate::state::AppState;

    struct Fixture {
        router: axum::Router,
        store: Arc<InMemoryPollStore>,
        poll: Poll,
        choices: Vec<Choice>,
    }

    async fn favorite_color() -> Fixture {
        let store = Arc::new(InMemoryPollStore::default());
        let (poll, choices) = create_poll(
            store.as_ref(),
            "Favorite color?",
            Utc::now(),
            &["Red".to_string(), "Blue".to_string()],
        )
        .await
        .unwrap();
        let router = app(AppState::new(store.clone(), 5));
        Fixture {
            router,
            store,
            poll,
            choices,
        }
    }

    async fn send(router: &axum::Router, req: Request<Body>) -> Response {
        router.clone().oneshot(req).await.unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn set_cookies(resp: &Response) -> Vec<String> {
        resp.headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    async fn votes_of(store: &InMemoryPollStore, poll_id: ObjectId) -> Vec<i64> {
        store
            .choices_for_poll(poll_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.votes)
            .collect()
    }

    #[tokio::test]
    async fn vote_then_results_reflect_it() {
        let fx = favorite_color().await;
        let detail = format!("/polls/{}", fx.poll.id.to_hex());
        let blue = fx.choices[1].id.to_hex();

        let resp = send(&fx.router, form_post(&detail, &format!("choice={}", blue))).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[LOCATION], detail.as_str());
        assert!(set_cookies(&resp).iter().any(|c| c.starts_with("flash=voted")));

        let results_uri = format!("/api/polls/{}/results", fx.poll.id.to_hex());
        let resp = send(&fx.router, get_req(&results_uri)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(
            body,
            json!({
                "results": [
                    {"choice_text": "Red", "votes": 0},
                    {"choice_text": "Blue", "votes": 1}
                ],
                "total_votes": 1
            })
        );
    }

    #[tokio::test]
    async fn index_shows_five_newest_polls() {
        let store = Arc::new(InMemoryPollStore::default());
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        for i in 0..7 {
            create_poll(store.as_ref(), &format!("Question {}", i), base + Duration::hours(i), &[])
                .await
                .unwrap();
        }
        let router = app(AppState::new(store, 5));

        let resp = send(&router, get_req("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;

        let positions: Vec<usize> = (2..7)
            .rev()
            .map(|i| html.find(&format!("Question {}<", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!html.contains("Question 0<"));
        assert!(!html.contains("Question 1<"));
    }

    #[tokio::test]
    async fn unknown_or_malformed_poll_is_404() {
        let fx = favorite_color().await;
        let missing = ObjectId::new().to_hex();

        for uri in [
            format!("/polls/{}", missing),
            "/polls/not-a-poll".to_string(),
            format!("/api/polls/{}/results", missing),
        ] {
            let resp = send(&fx.router, get_req(&uri)).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        }

        let choice = format!("choice={}", fx.choices[0].id.to_hex());
        for uri in [format!("/polls/{}", missing), format!("/polls/{}/vote", missing)] {
            let resp = send(&fx.router, form_post(&uri, &choice)).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "POST {}", uri);
        }
        assert_eq!(votes_of(&fx.store, fx.poll.id).await, vec![0, 0]);
    }

    #[tokio::test]
    async fn detail_form_without_choice_is_redisplayed() {
        let fx = favorite_color().await;
        let detail = format!("/polls/{}", fx.poll.id.to_hex());

        let resp = send(&fx.router, form_post(&detail, "")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains("You didn&#x27;t select a choice."));
        assert!(html.contains("<form method=\"post\""));
        assert_eq!(votes_of(&fx.store, fx.poll.id).await, vec![0, 0]);
    }

    #[tokio::test]
    async fn detail_form_rejects_choice_of_another_poll() {
        let fx = favorite_color().await;
        let soup = ["Soup".to_string()];
        let (_, other_choices) = create_poll(fx.store.as_ref(), "Lunch?", Utc::now(), &soup)
            .await
            .unwrap();
        let detail = format!("/polls/{}", fx.poll.id.to_hex());

        let resp = send(
            &fx.router,
            form_post(&detail, &format!("choice={}", other_choices[0].id.to_hex())),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("Select a valid choice."));
        assert_eq!(fx.store.choices_for_poll(other_choices[0].poll_id).await.unwrap()[0].votes, 0);
    }

    #[tokio::test]
    async fn vote_endpoint_records_and_redirects() {
        let fx = favorite_color().await;
        let poll_hex = fx.poll.id.to_hex();
        let vote = format!("/polls/{}/vote", poll_hex);
        let red = format!("choice={}", fx.choices[0].id.to_hex());

        for _ in 0..3 {
            let resp = send(&fx.router, form_post(&vote, &red)).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(resp.headers()[LOCATION], format!("/polls/{}", poll_hex).as_str());
        }
        assert_eq!(votes_of(&fx.store, fx.poll.id).await, vec![3, 0]);
    }

    #[tokio::test]
    async fn vote_endpoint_redirects_on_failure_and_flags_it() {
        let fx = favorite_color().await;
        let poll_hex = fx.poll.id.to_hex();
        let vote = format!("/polls/{}/vote", poll_hex);

        let bad_requests = vec![
            form_post(&vote, ""),
            form_post(&vote, "choice=garbage"),
            form_post(&vote, &format!("choice={}", ObjectId::new().to_hex())),
            get_req(&format!("{}?choice={}", vote, fx.choices[0].id.to_hex())),
        ];

        for req in bad_requests {
            let resp = send(&fx.router, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(resp.headers()[LOCATION], format!("/polls/{}", poll_hex).as_str());
            assert!(set_cookies(&resp).iter().any(|c| c.starts_with("flash=invalid_choice")));
        }
        assert_eq!(votes_of(&fx.store, fx.poll.id).await, vec![0, 0]);
    }

    #[tokio::test]
    async fn vote_endpoint_does_not_scope_choice_to_poll() {
        let fx = favorite_color().await;
        let soup = ["Soup".to_string()];
        let (lunch, lunch_choices) = create_poll(fx.store.as_ref(), "Lunch?", Utc::now(), &soup)
            .await
            .unwrap();

        let resp = send(
            &fx.router,
            form_post(
                &format!("/polls/{}/vote", fx.poll.id.to_hex()),
                &format!("choice={}", lunch_choices[0].id.to_hex()),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(votes_of(&fx.store, lunch.id).await, vec![1]);
        assert_eq!(votes_of(&fx.store, fx.poll.id).await, vec![0, 0]);
    }

    #[tokio::test]
    async fn flash_is_rendered_once_then_cleared() {
        let fx = favorite_color().await;
        let req = Request::builder()
            .uri(format!("/polls/{}", fx.poll.id.to_hex()))
            .header(COOKIE, format!("flash=voted.{}", fx.poll.id.to_hex()))
            .body(Body::empty())
            .unwrap();

        let resp = send(&fx.router, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(set_cookies(&resp)
            .iter()
            .any(|c| c.starts_with("flash=") && c.contains("Max-Age=0")));
        assert!(body_string(resp).await.contains("Thank you for voting!"));

        let resp = send(&fx.router, get_req(&format!("/polls/{}", fx.poll.id.to_hex()))).await;
        assert!(!body_string(resp).await.contains("Thank you for voting!"));
    }

    #[tokio::test]
    async fn flash_waits_for_the_poll_it_belongs_to() {
        let fx = favorite_color().await;
        let (lunch, _) = create_poll(fx.store.as_ref(), "Lunch?", Utc::now(), &[])
            .await
            .unwrap();
        let color_page = format!("/polls/{}", fx.poll.id.to_hex());

        let resp = send(
            &fx.router,
            form_post(&color_page, &format!("choice={}", fx.choices[0].id.to_hex())),
        )
        .await;
        let cookie = set_cookies(&resp)
            .into_iter()
            .find(|c| c.starts_with("flash="))
            .unwrap();
        let cookie = cookie.split(';').next().unwrap().to_string();

        let page_with_cookie = |uri: String| {
            Request::builder()
                .uri(uri)
                .header(COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap()
        };

        let lunch_page = format!("/polls/{}", lunch.id.to_hex());
        let resp = send(&fx.router, page_with_cookie(lunch_page)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(set_cookies(&resp).is_empty());
        assert!(!body_string(resp).await.contains("Thank you for voting!"));

        let resp = send(&fx.router, page_with_cookie(color_page.clone())).await;
        assert!(body_string(resp).await.contains("Thank you for voting!"));
    }

    #[tokio::test]
    async fn results_of_poll_without_choices() {
        let store = Arc::new(InMemoryPollStore::default());
        let (poll, _) = create_poll(store.as_ref(), "Anyone?", Utc::now(), &[]).await.unwrap();
        let router = app(AppState::new(store, 5));

        let results_uri = format!("/api/polls/{}/results", poll.id.to_hex());
        let resp = send(&router, get_req(&results_uri)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body, json!({"results": [], "total_votes": 0}));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let fx = favorite_color().await;
        let resp = send(&fx.router, get_req("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
