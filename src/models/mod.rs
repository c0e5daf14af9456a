// src/models/mod.rs

//! Domain models for documentation extraction.
//!
//! This module contains all data structures used throughout the crate,
//! organized by their primary purpose.

mod config;
mod note;
mod options;
mod package;

// Re-export all public types
pub use config::{Config, LoggingConfig, SearcherConfig};
pub use note::{Comment, Note};
pub use options::{CasePolicy, DuplicateCheck, ParseOptions};
pub use package::{Example, Function, Method, Package, Type, Variable};
