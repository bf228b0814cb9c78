//! # Operand Core
//!
//! Spec merging and channel version comparison for operand.
//!
//! This crate provides:
//! - A JSON document model for custom resource specs
//! - Deep merge of a default spec template into a user-changed spec
//! - Channel version parsing and ordering (`v1.2` style strings)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod merge;
pub mod version;

pub use document::{decode, DecodeError, Document, DocumentRole};
pub use merge::{merge_cr, merge_documents, try_merge_cr};
pub use version::{compare_channel_version, ChannelVersion, VersionError};
