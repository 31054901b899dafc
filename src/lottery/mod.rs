//! Fairpot application orchestrator with clean module layout.
//!
//! This module provides:
//! - `core`: Fairpot struct and initialization
//! - `tasks`: Async task orchestration with tokio::spawn, plus the
//!   testable "*_once" round operations
//! - `tests`: Unit tests for the round operations

pub mod core;
pub mod tasks;

// Re-export main types and structs
pub use self::core::Fairpot;

#[cfg(test)]
mod tests;
