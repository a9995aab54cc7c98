// Database models - Meeting
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a meeting, derived from the presence of notes.
///
/// `InProgress` sorts before `Complete` in listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    InProgress,
    Complete,
}

impl MeetingStatus {
    /// Derive the status from the notes field: complete iff notes are
    /// present and non-blank after trimming.
    pub fn derive(notes: Option<&str>) -> Self {
        match notes {
            Some(n) if !n.trim().is_empty() => MeetingStatus::Complete,
            _ => MeetingStatus::InProgress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::InProgress => "in_progress",
            MeetingStatus::Complete => "complete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(MeetingStatus::InProgress),
            "complete" => Some(MeetingStatus::Complete),
            _ => None,
        }
    }
}

impl ToSql for MeetingStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for MeetingStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        MeetingStatus::parse(s).ok_or(FromSqlError::InvalidType)
    }
}

/// A meeting record
///
/// Wire names are camelCase to match the JSON contract of the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub topics: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
    pub status: MeetingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Meeting {
    /// Build a fresh meeting from the agenda-generation workflow.
    /// Timestamps are set to now; status starts as in_progress.
    pub fn new(
        id: String,
        title: String,
        description: Option<String>,
        topics: String,
        agenda: String,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            title,
            description,
            topics,
            agenda: Some(agenda),
            notes: None,
            summary: None,
            action_items: None,
            transcript_url: None,
            status: MeetingStatus::InProgress,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial field set that can be applied to a meeting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeetingUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<String>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub action_items: Option<String>,
    #[serde(default)]
    pub transcript_url: Option<String>,
}

impl MeetingUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.topics.is_none()
            && self.agenda.is_none()
            && self.notes.is_none()
            && self.summary.is_none()
            && self.action_items.is_none()
            && self.transcript_url.is_none()
    }
}
