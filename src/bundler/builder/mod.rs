//! Release orchestration and coordination.
//!
//! [`ReleaseBuilder`] runs the publish → package pipeline for each target
//! runtime and collects a [`ReleaseReport`] with one [`BundledArtifact`]
//! (size and SHA-256 included) per produced file.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 checksum calculation for artifacts
//! - [`orchestrator`] - [`ReleaseBuilder`] and report types

pub mod checksum;
mod orchestrator;

pub use orchestrator::{
    BundledArtifact, PlatformFailure, ReleaseBuilder, ReleaseKind, ReleaseReport,
};
