// HTTP API module

pub mod health;
pub mod meetings;
pub mod router;
pub mod state;
pub mod summary;
pub mod transcript;

pub use router::router;
pub use state::ApiState;
