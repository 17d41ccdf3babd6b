//! Unsupervised topic labeling and sentiment scoring for batches of
//! business reviews.
//!
//! One entry point, [`analyze`]: takes a batch of raw review strings plus an
//! [`AnalyzeConfig`] and returns per-review sentiment/labels and per-category
//! averages. The pipeline is stateless across calls and deterministic for a
//! fixed seed. Fetching reviews, persistence, and job orchestration are the
//! caller's problem.

pub mod aggregate;
pub mod assign;
pub mod cluster;
pub mod config;
pub mod error;
pub mod labels;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod sentiment;
pub mod stopwords;
pub mod topics;
pub mod vectorize;

pub use config::AnalyzeConfig;
pub use error::AnalyzeError;
pub use models::{Analysis, CategorySummary, ReviewAnalysis, NOISE_CLUSTER};
pub use pipeline::analyze;
