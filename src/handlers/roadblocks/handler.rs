//! Roadblock handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::Roadblock,
    selection::Selection,
    services::RoadblockService,
    state::AppState,
};

use super::{
    request::{CreateRoadblockRequest, UpdateRoadblockRequest, Visitor},
    response::{DataResponse, DeleteResponse},
};

type IdPath = WithRejection<Path<Uuid>, AppError>;
type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Select the banner to show on a network
pub async fn select_roadblock(
    State(state): State<AppState>,
    WithRejection(Path(network), _): WithRejection<Path<String>, AppError>,
    visitor: Visitor,
) -> AppResult<Json<DataResponse<Option<Selection>>>> {
    let selected = RoadblockService::select_for_network(
        state.roadblocks(),
        &network,
        &visitor.context,
        &visitor.dismissals,
    )
    .await?;

    Ok(Json(DataResponse::ok(selected)))
}

/// List all banners
pub async fn list_roadblocks(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<DataResponse<Vec<Roadblock>>>> {
    auth_user.require_admin()?;

    let roadblocks = RoadblockService::list(state.roadblocks()).await?;
    Ok(Json(DataResponse::ok(roadblocks)))
}

/// Create a banner
pub async fn create_roadblock(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateRoadblockRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Roadblock>>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let roadblock = RoadblockService::create(state.roadblocks(), payload).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::ok(roadblock))))
}

/// Get a specific banner
pub async fn get_roadblock(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    WithRejection(Path(id), _): IdPath,
) -> AppResult<Json<DataResponse<Roadblock>>> {
    let roadblock = RoadblockService::get(state.roadblocks(), id).await?;
    Ok(Json(DataResponse::ok(roadblock)))
}

/// Update a banner
pub async fn update_roadblock(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateRoadblockRequest>,
) -> AppResult<Json<DataResponse<Roadblock>>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let roadblock = RoadblockService::update(state.roadblocks(), id, payload).await?;
    Ok(Json(DataResponse::ok(roadblock)))
}

/// Delete a banner
pub async fn delete_roadblock(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    WithRejection(Path(id), _): IdPath,
) -> AppResult<Json<DeleteResponse>> {
    auth_user.require_admin()?;

    RoadblockService::delete(state.roadblocks(), id).await?;
    Ok(Json(DeleteResponse::default()))
}
