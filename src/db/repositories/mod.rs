//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod roadblock_repo;

pub use roadblock_repo::{RoadblockRepository, RoadblockStore};

#[cfg(test)]
pub use roadblock_repo::MockRoadblockStore;
