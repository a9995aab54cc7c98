use axum::routing::{get, post};
use axum::Router;

use super::state::ApiState;
use super::{health, meetings, summary, transcript};

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/agenda", post(meetings::create_meeting))
        .route("/api/meetings", get(meetings::list_meetings))
        .route(
            "/api/meetings/{id}",
            get(meetings::get_meeting)
                .put(meetings::update_meeting)
                .delete(meetings::delete_meeting),
        )
        .route("/api/summary", post(summary::generate_summary))
        .route("/api/transcript", post(transcript::request_upload_url))
        .route("/api/transcript/confirm", post(transcript::confirm_upload))
        .route("/api/transcript/view", get(transcript::request_view_url))
        .with_state(state)
}
