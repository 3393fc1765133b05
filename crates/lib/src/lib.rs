//! manisync-lib: Core types and logic for manisync
//!
//! This crate provides the pieces of the manifest metadata synchronizer:
//! - `patch`: the field patch engine that rewrites or inserts metadata
//!   elements inside a manifest document
//! - `plan`: the update plan mapping document paths to their desired
//!   metadata records
//! - `apply`: the driver that loads, patches, and conditionally rewrites
//!   each document named by a plan

pub mod apply;
pub mod patch;
pub mod plan;
