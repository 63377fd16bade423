//! Core data models for the AR sculptures service.
//!
//! These entities describe sculpture metadata records and the JSON shapes the
//! HTTP surface exchanges. They map to the database via `sqlx::FromRow` and
//! serialize as camelCase JSON via `serde`.

pub mod sculpture;
