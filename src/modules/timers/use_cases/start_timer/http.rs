use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::timers::core::entry::Checkpoint;
use crate::modules::timers::use_cases::start_timer::handler::StartTimer;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimerBody {
    pub worker_id: String,
    pub project_ref: Option<String>,
    pub task_ref: Option<String>,
    #[serde(default)]
    pub description: String,
    pub start: Checkpoint,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StartTimer {
        worker_id: body.worker_id,
        project_ref: body.project_ref,
        task_ref: body.task_ref,
        description: body.description,
        start: body.start,
    };

    match state.start_timer.handle(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod start_timer_http_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::AppState;

    use super::handle;

    fn app() -> Router {
        Router::new()
            .route("/timers", post(handle))
            .with_state(AppState::in_memory())
    }

    fn start_request() -> Request<Body> {
        let body = r#"{
            "worker_id": "worker-0001",
            "project_ref": "project-0007",
            "description": "Fence repair",
            "start": {"time": "2026-03-02T08:00:00Z", "location_label": "Barn 3", "coordinates": null}
        }"#;
        Request::post("/timers")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn it_should_return_201_with_the_created_entry() {
        let response = app().oneshot(start_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["state"], "active");
        assert!(json.get("id").is_some());
    }

    #[tokio::test]
    async fn it_should_return_409_when_a_timer_is_already_running() {
        let app = app();
        let first = app.clone().oneshot(start_request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app.oneshot(start_request()).await.unwrap();

        assert_eq!(second.status(), StatusCode::CONFLICT);
        let bytes = second.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "conflict");
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("already running")
        );
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json() {
        let response = app()
            .oneshot(
                Request::post("/timers")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
