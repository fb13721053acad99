use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::WeatherSearchError;
use crate::models::{FIELDS_REQUIRED, FavoriteEntry, FavoriteParams};

const LIST_FAILED: &str = "Failed to fetch favorites";
const ADD_FAILED: &str = "Failed to add favorite";
const DELETE_FAILED: &str = "Failed to delete favorite";

#[derive(Debug, Serialize)]
pub(super) struct Deleted {
    success: bool,
}

pub(super) async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<FavoriteEntry>>, ApiError> {
    let favorites = state.store.list().await.map_err(ApiError::with(LIST_FAILED))?;
    Ok(Json(favorites))
}

pub(super) async fn add_favorite(
    State(state): State<AppState>,
    body: Result<Json<FavoriteParams>, JsonRejection>,
) -> Result<Json<FavoriteEntry>, ApiError> {
    let Json(params) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected favorite body");
        ApiError::new(WeatherSearchError::validation(FIELDS_REQUIRED), ADD_FAILED)
    })?;

    let (city, state_name) = params.require().map_err(ApiError::with(ADD_FAILED))?;
    tracing::info!(city = %city, state = %state_name, "Adding favorite");

    let entry = state
        .store
        .add(&city, &state_name)
        .await
        .map_err(ApiError::with(ADD_FAILED))?;

    Ok(Json(entry))
}

pub(super) async fn delete_favorite(
    State(state): State<AppState>,
    query: Result<Query<FavoriteParams>, QueryRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected favorite query");
        ApiError::new(WeatherSearchError::validation(FIELDS_REQUIRED), DELETE_FAILED)
    })?;
    let (city, state_name) = params.require().map_err(ApiError::with(DELETE_FAILED))?;
    tracing::info!(city = %city, state = %state_name, "Deleting favorite");

    state
        .store
        .remove(&city, &state_name)
        .await
        .map_err(ApiError::with(DELETE_FAILED))?;

    Ok(Json(Deleted { success: true }))
}
