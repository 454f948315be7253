//! Server crate for the cinematch recommendation engine.
//!
//! This crate contains the service that owns a catalog snapshot and runs
//! the recommendation strategies off the async executor.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::{RecommendationService, RecommendationSet};
