//! Homestead CMS Kernel Library
//!
//! Serializes author-edited content block trees into the JSON documents the
//! headless frontend consumes. The `homestead` binary wraps these services
//! for snapshot inspection.

pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod services;
