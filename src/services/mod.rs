//! Business logic services

pub mod auth_service;
pub mod roadblock_service;

pub use auth_service::{AuthService, Claims, ClaimsMetadata};
pub use roadblock_service::RoadblockService;
