//! Roadblock service

use uuid::Uuid;

use crate::{
    db::repositories::RoadblockStore,
    error::{AppError, AppResult},
    handlers::roadblocks::request::{CreateRoadblockRequest, UpdateRoadblockRequest},
    models::Roadblock,
    selection::{self, Dismissals, Selection, SelectionContext},
    utils::validate_network,
};

/// Roadblock service
pub struct RoadblockService;

impl RoadblockService {
    /// Pick the banner a visitor on `network` should see right now
    pub async fn select_for_network(
        store: &dyn RoadblockStore,
        network: &str,
        ctx: &SelectionContext,
        dismissals: &Dismissals,
    ) -> AppResult<Option<Selection>> {
        let network =
            validate_network(network).map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

        let candidates = store.find_all_by_network(network).await.inspect_err(|e| {
            tracing::error!(network = %network, error = %e, "Failed to load roadblocks");
        })?;

        let selected = selection::select(&candidates, ctx, dismissals);

        match &selected {
            Some(chosen) => tracing::debug!(
                network = %network,
                candidates = candidates.len(),
                roadblock_id = %chosen.roadblock.id,
                priority = chosen.priority,
                "Roadblock selected"
            ),
            None => tracing::debug!(
                network = %network,
                candidates = candidates.len(),
                dismissals = dismissals.len(),
                "No roadblock to show"
            ),
        }

        Ok(selected)
    }

    /// List every banner, newest first
    pub async fn list(store: &dyn RoadblockStore) -> AppResult<Vec<Roadblock>> {
        store.list_all().await
    }

    /// Get a banner by ID
    pub async fn get(store: &dyn RoadblockStore, id: Uuid) -> AppResult<Roadblock> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Roadblock not found".to_string()))
    }

    /// Create a banner
    pub async fn create(
        store: &dyn RoadblockStore,
        payload: CreateRoadblockRequest,
    ) -> AppResult<Roadblock> {
        let roadblock = store.create(payload.into_new_roadblock()).await?;

        tracing::info!(
            roadblock_id = %roadblock.id,
            repeat = %roadblock.repeat,
            "Roadblock created"
        );

        Ok(roadblock)
    }

    /// Apply a partial update
    pub async fn update(
        store: &dyn RoadblockStore,
        id: Uuid,
        payload: UpdateRoadblockRequest,
    ) -> AppResult<Roadblock> {
        // A new start or end must still form an ordered window with the stored half
        if payload.changes_window() {
            let existing = Self::get(store, id).await?;
            let start = payload.start_date.unwrap_or(existing.start_date);
            let end = match payload.end_date {
                Some(end) => end,
                None => existing.end_date,
            };

            if end.is_some_and(|end| end < start) {
                return Err(AppError::Validation(
                    "End date must be on or after the start date".to_string(),
                ));
            }
        }

        let roadblock = store
            .update(id, payload.into_changes())
            .await?
            .ok_or_else(|| AppError::NotFound("Roadblock not found".to_string()))?;

        tracing::info!(roadblock_id = %id, "Roadblock updated");

        Ok(roadblock)
    }

    /// Delete a banner
    pub async fn delete(store: &dyn RoadblockStore, id: Uuid) -> AppResult<()> {
        if !store.delete(id).await? {
            return Err(AppError::NotFound("Roadblock not found".to_string()));
        }

        tracing::info!(roadblock_id = %id, "Roadblock deleted");

        Ok(())
    }
}
