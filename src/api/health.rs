use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::state::ApiState;
use crate::database::StoreError;

#[derive(Serialize)]
pub struct ComponentStatus {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentStatus {
    fn up() -> Self {
        Self {
            status: "up".to_string(),
            error: None,
        }
    }
    fn down(e: impl ToString) -> Self {
        Self {
            status: "down".to_string(),
            error: Some(e.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: ComponentStatus,
}

pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    let database = match state.db.with_connection(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(StoreError::from)
    }) {
        Ok(_) => ComponentStatus::up(),
        Err(e) => ComponentStatus::down(e),
    };

    let status = if database.status == "up" { "up" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        database,
    })
}
