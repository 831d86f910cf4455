//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into roster-level operations.
//! - Keep callers decoupled from backend details.

pub mod roster_service;
