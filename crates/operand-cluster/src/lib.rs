//! # Operand Cluster
//!
//! Cluster-facing helpers for operand reconcilers.
//!
//! This crate provides:
//! - Operator settings read from environment variables
//! - API resource discovery checks (does a kind exist, is it namespaced)
//! - String list comparison and bounded waiting on spawned tasks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod discovery;
pub mod util;

pub use config::OperatorSettings;
pub use discovery::{
    resource_exists, resource_namespaced, ApiResource, ApiResourceList, Discovery,
    DiscoveryError, StaticDiscovery,
};
pub use util::{contains, string_slice_content_equal, wait_timeout};
