//! Service layer: the object-store abstraction, the asset gateway built on
//! top of it, and the sculpture record lifecycle composing both.

pub mod asset_gateway;
pub mod object_store;
pub mod s3_store;
pub mod sculpture_service;

#[cfg(test)]
pub mod memory_store;
