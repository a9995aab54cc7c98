// Meeting CRUD handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::state::ApiState;
use crate::database::models::{Meeting, MeetingUpdate};
use crate::database::ListCursor;
use crate::error::ApiError;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX_CREATE: usize = 1000;
pub const DESCRIPTION_MAX_UPDATE: usize = 500;
pub const TOPICS_MAX: usize = 5000;
const DEFAULT_TITLE: &str = "Untitled Meeting";
const DEFAULT_LIST_LIMIT: usize = 20;
const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting: Meeting,
}

#[derive(Debug, Serialize)]
pub struct CreateMeetingResponse {
    pub meeting: Meeting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeetingsResponse {
    pub meetings: Vec<Meeting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub has_more: bool,
}

fn validate_create(
    req: CreateMeetingRequest,
) -> Result<(String, Option<String>, String), ApiError> {
    let title = match req.title {
        None => DEFAULT_TITLE.to_string(),
        Some(t) => {
            if t.is_empty() || t.chars().count() > TITLE_MAX {
                return Err(ApiError::Validation(
                    "Invalid input: title must be 1-200 characters".to_string(),
                ));
            }
            t
        }
    };

    let description = req.description.unwrap_or_default();
    if description.chars().count() > DESCRIPTION_MAX_CREATE {
        return Err(ApiError::Validation(
            "Invalid input: description too long (max 1000 characters)".to_string(),
        ));
    }

    let topics = req
        .topics
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Topics are required".to_string()))?;
    if topics.chars().count() > TOPICS_MAX {
        return Err(ApiError::Validation(
            "Invalid input: topics too long (max 5000 characters)".to_string(),
        ));
    }

    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };
    Ok((title, description, topics))
}

fn validate_update(update: &MeetingUpdate) -> Result<(), ApiError> {
    if let Some(ref title) = update.title {
        if title.is_empty() || title.chars().count() > TITLE_MAX {
            return Err(ApiError::Validation(
                "Invalid input: title must be 1-200 characters".to_string(),
            ));
        }
    }
    if let Some(ref description) = update.description {
        if description.chars().count() > DESCRIPTION_MAX_UPDATE {
            return Err(ApiError::Validation(
                "Invalid input: description too long (max 500 characters)".to_string(),
            ));
        }
    }
    if let Some(ref transcript_url) = update.transcript_url {
        if Url::parse(transcript_url).is_err() {
            return Err(ApiError::Validation(
                "Invalid input: transcriptUrl must be a valid URL".to_string(),
            ));
        }
    }
    Ok(())
}

/// POST /api/agenda - create a meeting with a generated agenda.
///
/// Generation failures are absorbed into the fallback template. A storage
/// failure after successful generation does not discard the user-visible
/// work: the generated meeting is returned with a warning instead.
pub async fn create_meeting(
    State(state): State<ApiState>,
    Json(req): Json<CreateMeetingRequest>,
) -> Result<Json<CreateMeetingResponse>, ApiError> {
    let (title, description, topics) = validate_create(req)?;

    let agenda = state.generation.generate_agenda(&topics).await;
    let meeting = Meeting::new(
        Uuid::new_v4().to_string(),
        title,
        description,
        topics,
        agenda,
    );

    match state.db.create_meeting(&meeting) {
        Ok(stored) => Ok(Json(CreateMeetingResponse {
            meeting: stored,
            warning: None,
        })),
        Err(e) => {
            log::error!("failed to persist generated meeting {}: {}", meeting.id, e);
            Ok(Json(CreateMeetingResponse {
                meeting,
                warning: Some(
                    "Meeting was generated but could not be saved to database".to_string(),
                ),
            }))
        }
    }
}

/// GET /api/meetings - paginated listing
pub async fn list_meetings(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListMeetingsResponse>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let cursor = match query.cursor {
        Some(token) => Some(
            ListCursor::decode(&token)
                .map_err(|e| ApiError::Validation(format!("Invalid cursor: {e}")))?,
        ),
        None => None,
    };

    let page = state.db.list_meetings(limit, cursor)?;
    Ok(Json(ListMeetingsResponse {
        meetings: page.meetings,
        cursor: page.cursor.map(|c| c.encode()),
        has_more: page.has_more,
    }))
}

/// GET /api/meetings/{id}
pub async fn get_meeting(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MeetingResponse>, ApiError> {
    let meeting = state
        .db
        .get_meeting(&id)?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;
    Ok(Json(MeetingResponse { meeting }))
}

/// PUT /api/meetings/{id} - partial update
pub async fn update_meeting(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(update): Json<MeetingUpdate>,
) -> Result<Json<MeetingResponse>, ApiError> {
    validate_update(&update)?;
    let meeting = state.db.update_meeting(&id, &update)?;
    Ok(Json(MeetingResponse { meeting }))
}

/// DELETE /api/meetings/{id}
pub async fn delete_meeting(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db.delete_meeting(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(
        title: Option<&str>,
        description: Option<&str>,
        topics: Option<&str>,
    ) -> CreateMeetingRequest {
        CreateMeetingRequest {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            topics: topics.map(str::to_string),
        }
    }

    #[test]
    fn create_defaults_title_and_drops_empty_description() {
        let (title, description, topics) =
            validate_create(create_request(None, None, Some("A\nB"))).unwrap();
        assert_eq!(title, "Untitled Meeting");
        assert_eq!(description, None);
        assert_eq!(topics, "A\nB");
    }

    #[test]
    fn create_requires_topics() {
        assert!(validate_create(create_request(Some("T"), None, None)).is_err());
        assert!(validate_create(create_request(Some("T"), None, Some(""))).is_err());
    }

    #[test]
    fn create_bounds_title_and_topics() {
        let long_title = "t".repeat(201);
        assert!(validate_create(create_request(Some(&long_title), None, Some("A"))).is_err());

        let long_topics = "x".repeat(5001);
        assert!(validate_create(create_request(None, None, Some(&long_topics))).is_err());

        let max_topics = "x".repeat(5000);
        assert!(validate_create(create_request(None, None, Some(&max_topics))).is_ok());
    }

    #[test]
    fn update_validates_field_bounds() {
        assert!(validate_update(&MeetingUpdate {
            title: Some(String::new()),
            ..Default::default()
        })
        .is_err());

        assert!(validate_update(&MeetingUpdate {
            description: Some("d".repeat(501)),
            ..Default::default()
        })
        .is_err());

        assert!(validate_update(&MeetingUpdate {
            transcript_url: Some("not a url".to_string()),
            ..Default::default()
        })
        .is_err());

        assert!(validate_update(&MeetingUpdate {
            notes: Some("free-form notes".to_string()),
            transcript_url: Some("https://bucket.s3.us-east-1.amazonaws.com/k".to_string()),
            ..Default::default()
        })
        .is_ok());
    }
}
