//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and schema reset (db)
//! - Sample data loaded on every start (seed)
//! - Configuration loading (config)
//! - Repository implementations (repositories)

pub mod config;
pub mod db;
pub mod repositories;
pub mod seed;

pub use repositories::*;
