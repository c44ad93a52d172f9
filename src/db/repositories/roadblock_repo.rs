//! Roadblock repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{NewRoadblock, Roadblock, RoadblockChanges, RoadblockRow},
};

/// Storage of roadblock banners
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoadblockStore: Send + Sync {
    /// Every banner tagged `"all"` or tagged with `network`, newest first.
    /// No eligibility filtering happens here.
    async fn find_all_by_network(&self, network: &str) -> AppResult<Vec<Roadblock>>;

    /// Every banner, newest first
    async fn list_all(&self) -> AppResult<Vec<Roadblock>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Roadblock>>;

    async fn create(&self, roadblock: NewRoadblock) -> AppResult<Roadblock>;

    /// Apply a partial update; `None` when no banner has this id
    async fn update(&self, id: Uuid, changes: RoadblockChanges) -> AppResult<Option<Roadblock>>;

    /// Remove a banner; `false` when no banner has this id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed roadblock store
#[derive(Clone)]
pub struct RoadblockRepository {
    pool: PgPool,
}

impl RoadblockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert rows for a listing, skipping any row this build cannot read
    fn decode_all(rows: Vec<RoadblockRow>) -> Vec<Roadblock> {
        rows.into_iter()
            .filter_map(|row| {
                let id = row.id;
                match Roadblock::try_from(row) {
                    Ok(roadblock) => Some(roadblock),
                    Err(e) => {
                        tracing::warn!(roadblock_id = %id, error = %e, "Skipping malformed roadblock");
                        None
                    }
                }
            })
            .collect()
    }

    fn decode_one(row: RoadblockRow) -> AppResult<Roadblock> {
        let id = row.id;
        Roadblock::try_from(row)
            .map_err(|e| AppError::Database(format!("roadblock {id} is malformed: {e}")))
    }
}

#[async_trait]
impl RoadblockStore for RoadblockRepository {
    async fn find_all_by_network(&self, network: &str) -> AppResult<Vec<Roadblock>> {
        let rows = sqlx::query_as::<_, RoadblockRow>(
            r#"
            SELECT * FROM roadblocks
            WHERE networks = '"all"'::jsonb
               OR networks @> jsonb_build_array($1::text)
            ORDER BY created_at DESC
            "#,
        )
        .bind(network)
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::decode_all(rows))
    }

    async fn list_all(&self) -> AppResult<Vec<Roadblock>> {
        let rows = sqlx::query_as::<_, RoadblockRow>(
            r#"SELECT * FROM roadblocks ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::decode_all(rows))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Roadblock>> {
        let row = sqlx::query_as::<_, RoadblockRow>(r#"SELECT * FROM roadblocks WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::decode_one).transpose()
    }

    async fn create(&self, roadblock: NewRoadblock) -> AppResult<Roadblock> {
        let row = sqlx::query_as::<_, RoadblockRow>(
            r#"
            INSERT INTO roadblocks (
                link, image_url, image_public_id, close_button_delay, banner_time_delay,
                repeat, networks, location, devices, hide_for_logged_in,
                start_date, end_date, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&roadblock.link)
        .bind(&roadblock.image.url)
        .bind(&roadblock.image.public_id)
        .bind(roadblock.close_button_delay)
        .bind(roadblock.banner_time_delay)
        .bind(roadblock.repeat.as_str())
        .bind(roadblock.networks.to_json())
        .bind(roadblock.location.as_str())
        .bind(roadblock.devices.as_str())
        .bind(roadblock.hide_for_logged_in)
        .bind(roadblock.start_date)
        .bind(roadblock.end_date)
        .bind(roadblock.is_active)
        .fetch_one(&self.pool)
        .await?;

        Self::decode_one(row)
    }

    async fn update(&self, id: Uuid, changes: RoadblockChanges) -> AppResult<Option<Roadblock>> {
        let (image_url, image_public_id) = match changes.image {
            Some(image) => (Some(image.url), Some(image.public_id)),
            None => (None, None),
        };
        let replace_end_date = changes.end_date.is_some();
        let end_date = changes.end_date.flatten();

        let row = sqlx::query_as::<_, RoadblockRow>(
            r#"
            UPDATE roadblocks
            SET
                link = COALESCE($2, link),
                image_url = COALESCE($3, image_url),
                image_public_id = COALESCE($4, image_public_id),
                close_button_delay = COALESCE($5, close_button_delay),
                banner_time_delay = COALESCE($6, banner_time_delay),
                repeat = COALESCE($7, repeat),
                networks = COALESCE($8, networks),
                location = COALESCE($9, location),
                devices = COALESCE($10, devices),
                hide_for_logged_in = COALESCE($11, hide_for_logged_in),
                start_date = COALESCE($12, start_date),
                end_date = CASE WHEN $13 THEN $14 ELSE end_date END,
                is_active = COALESCE($15, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.link)
        .bind(image_url)
        .bind(image_public_id)
        .bind(changes.close_button_delay)
        .bind(changes.banner_time_delay)
        .bind(changes.repeat.as_ref().map(|r| r.as_str().to_string()))
        .bind(changes.networks.as_ref().map(|n| n.to_json()))
        .bind(changes.location.map(|l| l.as_str()))
        .bind(changes.devices.map(|d| d.as_str()))
        .bind(changes.hide_for_logged_in)
        .bind(changes.start_date)
        .bind(replace_end_date)
        .bind(end_date)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::decode_one).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM roadblocks WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
