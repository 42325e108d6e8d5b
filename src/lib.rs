//! ccup - custom component updater library
//!
//! This library provides the core functionality for keeping GitHub-hosted
//! custom components of a local installation up to date:
//! - Reference list parsing
//! - Release, branch and tag resolution from GitHub pages
//! - Selective component installation with version records
//! - Outdated report with a time-limited cache

pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod installer;
pub mod orchestrator;
pub mod output;
pub mod progress;
