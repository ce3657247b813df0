//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`stage::PipelineStage`]: the stages of a deck-building run

pub mod error;
pub mod stage;
