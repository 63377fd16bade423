//! HTTP handlers, grouped by resource.

pub mod file_handlers;
pub mod health_handlers;
pub mod sculpture_handlers;
