// Meeting Tool - agenda, notes and transcript API
//
// A CRUD service around a single Meeting entity:
// - Agenda generation from a topic list (LLM-backed, with a local fallback)
// - Notes and summary workflow (summary + action item extraction)
// - Transcript upload/download via presigned object-store URLs

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod generation;
pub mod transfer;
