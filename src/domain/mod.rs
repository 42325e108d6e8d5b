//! Core domain models for ccup
//!
//! This module contains the fundamental types used throughout the application:
//! - Repository references read from the reference list
//! - Resolved versions produced by the resolver
//! - Update outcomes and the outdated report

mod reference;
mod report;
mod resolved;

pub use reference::{parse_references, RepositoryReference};
pub use report::{
    OutdatedEntry, OutdatedReport, ReferenceResult, SkipReason, UpdateOutcome, UNKNOWN_VERSION,
};
pub use resolved::{ComponentLayout, ReferenceKind, ResolvedVersion};
