//! Core domain types for cratewise: queries, recommended crates, and
//! normalization of raw backend payloads.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod display;
pub mod normalize;
pub mod query;
pub mod types;
