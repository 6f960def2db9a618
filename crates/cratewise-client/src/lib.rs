//! HTTP client for a cratewise recommendation backend.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
