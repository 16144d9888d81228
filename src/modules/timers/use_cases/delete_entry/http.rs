use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.delete_entry.handle(id).await {
        Ok(removed) => Json(json!({ "deleted": true, "entry_id": removed.id })).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod delete_entry_http_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::delete,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::shared::infrastructure::entry_store::EntryStore;
    use crate::shell::state::AppState;
    use crate::test_support::fixtures::{entry_started_at, ts};

    use super::handle;

    async fn app_with_entry() -> (Router, Uuid) {
        let state = AppState::in_memory();
        let entry = state
            .store
            .insert_new(entry_started_at("worker-0001", ts("2026-03-02T08:00:00Z")))
            .await
            .unwrap();
        let app = Router::new()
            .route("/timers/{id}", delete(handle))
            .with_state(state);
        (app, entry.id)
    }

    #[tokio::test]
    async fn it_should_return_200_with_a_confirmation() {
        let (app, id) = app_with_entry().await;

        let response = app
            .oneshot(
                Request::delete(format!("/timers/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["deleted"], true);
        assert_eq!(json["entry_id"], id.to_string());
    }

    #[tokio::test]
    async fn it_should_return_404_on_a_repeated_delete() {
        let (app, id) = app_with_entry().await;
        let request = || {
            Request::delete(format!("/timers/{id}"))
                .body(Body::empty())
                .unwrap()
        };

        app.clone().oneshot(request()).await.unwrap();
        let repeat = app.oneshot(request()).await.unwrap();

        assert_eq!(repeat.status(), StatusCode::NOT_FOUND);
    }
}
