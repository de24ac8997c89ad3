// src/lib.rs
//! travelpulse: aggregates travel places and community posts into ranked
//! trending feeds, actionable tips, and recent stories for a destination.

pub mod api;
pub mod cache;
pub mod config;
pub mod dedupe;
pub mod geo;
pub mod heuristics;
pub mod pacing;
pub mod scoring;
pub mod stories;
pub mod tips;
pub mod trending;

pub mod sources;

pub use api::{create_router, AppState};
pub use trending::Aggregator;
