//! Remote CRUD API for exercises and workouts.

mod client;
mod error;

pub use client::{ApiClient, HealthStatus};
pub use error::ApiError;
