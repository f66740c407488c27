//! envconf
//!
//! Resolves named configuration files into environment-specific trees.
//! Exports the core components for embedding and integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
