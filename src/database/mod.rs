// Database module
//
// SQLite-backed persistence for meetings. The manager owns the connection,
// migrations keep the schema current, and the meetings repository implements
// the five-operation gateway contract (create/get/list/update/delete).

pub mod manager;
pub mod meetings_repo;
pub mod migrations;
pub mod models;

pub use manager::DatabaseManager;
pub use meetings_repo::{BranchCursor, BranchKey, ListCursor, MeetingPage};

/// Runtime storage failure classes.
///
/// `NotFound` and `EmptyUpdate` are caller-visible outcomes (4xx); `Backend`
/// and `LockPoisoned` are storage faults (5xx). Configuration problems are
/// caught earlier, at `DatabaseManager::new`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Meeting with ID {0} not found")]
    NotFound(String),
    #[error("No updates provided")]
    EmptyUpdate,
    #[error("database error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("database connection lock poisoned")]
    LockPoisoned,
}
