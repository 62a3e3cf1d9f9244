//! Cloud Manager Core
//!
//! Core types and pure logic for the Cloud Manager pipeline client.
//!
//! This crate contains:
//! - Domain types: Pipelines, executions and their step states as returned by the API
//! - DTOs: HAL envelopes and small response bodies used on the wire
//! - Resolution: locating the actionable step of an execution and picking the link to act on

pub mod domain;
pub mod dto;
pub mod error;
pub mod resolve;

pub use error::ResolveError;
