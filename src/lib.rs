//! Declarative Microsoft Intune device-management components.
//!
//! Each resource provider wraps the Graph API calls for one policy kind
//! (macOS compliance policy, settings-catalog configuration policy, custom
//! configuration profile, assignment, platform restrictions, corporate
//! device identifiers) behind a uniform create/update/delete/diff contract,
//! and the composite components wire policies to their assignments with the
//! correct ordering.

pub mod components;
pub mod config;
pub mod devices;
pub mod error;
pub mod graph;
pub mod provider;

pub use error::{IntuneError, Result};
pub use graph::GraphClient;
pub use provider::{CreateResult, DiffResult, ReadResult, ResourceProvider, UpdateResult};
