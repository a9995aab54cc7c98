// Transcript workflow handlers
//
// Upload URL issuance, upload confirmation, and view URL issuance. The
// object key is transcripts/{meetingId}/{fileName}; replacing an existing
// transcript reuses its key so the old object is overwritten in place.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::meetings::SuccessResponse;
use super::state::ApiState;
use crate::database::models::MeetingUpdate;
use crate::error::ApiError;
use crate::transfer::{transcript_key, validate_file_name};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub replace_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub transcript_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadRequest {
    #[serde(default)]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub transcript_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUrlResponse {
    pub view_url: String,
}

/// POST /api/transcript - issue a presigned upload URL
pub async fn request_upload_url(
    State(state): State<ApiState>,
    Json(req): Json<UploadUrlRequest>,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let (meeting_id, file_name) = match (req.meeting_id, req.file_name) {
        (Some(id), Some(name)) if !id.is_empty() && !name.is_empty() => (id, name),
        _ => {
            return Err(ApiError::Validation(
                "Meeting ID and file name are required".to_string(),
            ))
        }
    };
    validate_file_name(&file_name)?;

    state
        .db
        .get_meeting(&meeting_id)?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    // Reuse the old key when replacing so the previous object is overwritten
    let key = req
        .replace_key
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| transcript_key(&meeting_id, &file_name));

    let upload_url = state.transfer.issue_upload_url(&key).await?;
    let transcript_url = state.object_store.public_url(&key);

    Ok(Json(UploadUrlResponse {
        upload_url,
        transcript_url,
    }))
}

/// POST /api/transcript/confirm - persist the uploaded transcript URL
pub async fn confirm_upload(
    State(state): State<ApiState>,
    Json(req): Json<ConfirmUploadRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let (meeting_id, transcript_url) = match (req.meeting_id, req.transcript_url) {
        (Some(id), Some(url)) if !id.is_empty() && !url.is_empty() => (id, url),
        _ => {
            return Err(ApiError::Validation(
                "Meeting ID and transcript URL are required".to_string(),
            ))
        }
    };

    state.db.update_meeting(
        &meeting_id,
        &MeetingUpdate {
            transcript_url: Some(transcript_url),
            ..Default::default()
        },
    )?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/transcript/view?key= - issue a presigned view URL
pub async fn request_view_url(
    State(state): State<ApiState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewUrlResponse>, ApiError> {
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::Validation("Key parameter is required".to_string()))?;

    let view_url = state.transfer.issue_view_url(&key).await?;
    Ok(Json(ViewUrlResponse { view_url }))
}
