//! GitHub adapters for resolving repository references
//!
//! This module provides:
//! - HTTP client shared foundation
//! - Page matching rules for the GitHub web UI
//! - The reference resolver trait and its GitHub implementation

mod client;
pub mod markup;
mod resolver;

pub use client::HttpClient;
pub use resolver::{GitHubResolver, ReferenceResolver};
