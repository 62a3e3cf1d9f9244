//! Core domain types
//!
//! This module contains the structures returned by the Cloud Manager API.
//! They are immutable snapshots: every call to the client fetches fresh
//! copies and nothing here holds a reference back to the client.

pub mod execution;
pub mod link;
pub mod pipeline;
pub mod step;
