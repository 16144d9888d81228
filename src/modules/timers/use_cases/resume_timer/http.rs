use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.resume_timer.handle(id).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod resume_timer_http_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::shared::infrastructure::entry_store::EntryStore;
    use crate::shell::state::AppState;
    use crate::test_support::fixtures::{closed_entry, entry_started_at, ts};

    use super::handle;

    async fn app_with_paused_entry() -> (Router, Uuid) {
        let state = AppState::in_memory();
        let entry = state
            .store
            .insert_new(entry_started_at("worker-0001", ts("2026-03-02T08:00:00Z")))
            .await
            .unwrap();
        state.pause_timer.handle(entry.id).await.unwrap();
        let app = Router::new()
            .route("/timers/{id}/resume", post(handle))
            .with_state(state);
        (app, entry.id)
    }

    #[tokio::test]
    async fn it_should_return_200_with_the_resumed_entry() {
        let (app, id) = app_with_paused_entry().await;

        let response = app
            .oneshot(
                Request::post(format!("/timers/{id}/resume"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["state"], "active");
        assert!(json["pause_intervals"][0]["resumed_at"].is_string());
    }

    #[tokio::test]
    async fn it_should_return_409_when_resuming_a_closed_entry() {
        let state = AppState::in_memory();
        let closed = state
            .store
            .insert_new(closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T16:00:00Z"),
            ))
            .await
            .unwrap();
        let app = Router::new()
            .route("/timers/{id}/resume", post(handle))
            .with_state(state);

        let response = app
            .oneshot(
                Request::post(format!("/timers/{}/resume", closed.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "invalid_state");
    }
}
