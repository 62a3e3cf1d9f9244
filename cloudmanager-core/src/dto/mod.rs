//! Data Transfer Objects for the Cloud Manager API
//!
//! This module contains the wire envelopes wrapped around domain types
//! (HAL `_embedded` lists) and small response bodies that have no domain
//! counterpart.

pub mod execution;
pub mod log;
pub mod pipeline;
