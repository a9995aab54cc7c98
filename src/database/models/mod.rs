// Database models

mod meeting;

pub use meeting::{Meeting, MeetingStatus, MeetingUpdate};
