// Summary workflow handler
//
// Generates a summary from meeting notes, extracts the action items section
// and persists notes + summary + action items in one update. The repository
// recomputes the status from the notes as part of that update.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::meetings::MeetingResponse;
use super::state::ApiState;
use crate::database::models::MeetingUpdate;
use crate::error::ApiError;
use crate::generation::extract_action_items;

const NOTES_MAX: usize = 10000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/summary
pub async fn generate_summary(
    State(state): State<ApiState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<MeetingResponse>, ApiError> {
    let (meeting_id, notes) = match (req.meeting_id, req.notes) {
        (Some(id), Some(notes)) if !id.is_empty() && !notes.is_empty() => (id, notes),
        _ => {
            return Err(ApiError::Validation(
                "Meeting ID and notes are required".to_string(),
            ))
        }
    };
    if notes.chars().count() > NOTES_MAX {
        return Err(ApiError::Validation(
            "Invalid input: notes too long (max 10000 characters)".to_string(),
        ));
    }

    // The meeting must exist before spending a generation call on it
    state
        .db
        .get_meeting(&meeting_id)?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    let summary = state.generation.generate_summary(&notes).await;
    let action_items = extract_action_items(&summary);

    let meeting = state.db.update_meeting(
        &meeting_id,
        &MeetingUpdate {
            notes: Some(notes),
            summary: Some(summary),
            action_items: Some(action_items),
            ..Default::default()
        },
    )?;

    Ok(Json(MeetingResponse { meeting }))
}
