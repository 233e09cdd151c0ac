//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapters for the ledger and cost schedule
//! - Host: the skill catalog and an in-memory simulated player
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod host;
pub mod http;
pub mod persistence;
pub mod state;
