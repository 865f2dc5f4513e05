//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into per-request page flows.
//! - Keep HTTP/rendering layers decoupled from storage details.

pub mod coordinator;
