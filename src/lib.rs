//! e-ICT School Equipment Booking System
//!
//! A Rust implementation of the e-ICT equipment booking server, providing a
//! REST JSON API for reserving shared ICT assets (laptops, tablets,
//! projectors, drones), approving and returning bookings, and summarizing
//! usage for the dashboard.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod sync;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
