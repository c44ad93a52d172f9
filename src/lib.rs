//! Roadblocks - Banner Selection Service
//!
//! This library provides the roadblock engine for a news platform: the
//! full-screen promotional banners shown to visitors, and the rules that
//! decide which one (if any) a visitor sees on a given request.
//!
//! # Features
//!
//! - Eligibility by schedule window, recurrence, device, page and login state
//! - Priority ranking that favours bounded campaigns over open-ended ones
//! - Per-visitor dismissal cookies scoped to each banner's recurrence period
//! - Administrative CRUD for banners
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Selection**: The pure selection engine
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod selection;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
