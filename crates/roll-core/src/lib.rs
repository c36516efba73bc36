//! # roll-core
//!
//! Core types and error types for Rollcall.
//!
//! This crate provides the foundational types shared across all Rollcall crates:
//! - Parsed credits documents and their builder
//! - The contributor timeline produced by aggregation
//! - The inclusion policy consulted by every credits parser
//! - Release metadata and the chronological release catalog
//! - Markup document model and per-release dialect profiles
//! - Contributor name cleaning
//! - Cross-cutting error types

pub mod credits;
pub mod dialect;
pub mod errors;
pub mod markup;
pub mod names;
pub mod policy;
pub mod release;
pub mod timeline;

pub use credits::{CreditsBuilder, CreditsDocument, RoleMap};
pub use dialect::{
    DialectProfiles, MarkupDialect, MarkupStyle, SizeCodedProfile, StyleCodedProfile,
    SubReleaseMarker,
};
pub use errors::CoreError;
pub use markup::{MarkupDocument, MarkupLine, MarkupPayload};
pub use names::clean_name;
pub use policy::InclusionPolicy;
pub use release::{ReleaseCatalog, ReleaseMetadata};
pub use timeline::{ContributionTimeline, ReleaseRoles};
