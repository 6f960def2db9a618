//! cratewise CLI library — the recommendation workflow and its terminal front end.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod classify;
pub mod commands;
pub mod config;
pub mod notify;
pub mod recommender;
pub mod render;
pub mod state;
