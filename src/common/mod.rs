//! Common types and utilities shared across bidtree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and runtime [`Config`]
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
pub mod error;
mod node_id;

pub use config::Config;
pub use error::{Error, Result};
pub use node_id::NodeId;
