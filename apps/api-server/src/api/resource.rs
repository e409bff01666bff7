//! CRUD endpoints shared by every entity collection.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use entities::Entity;
use resource_store::ResourceRepository;

use crate::error::ServerResult;
use crate::state::{AppState, SharedState};

/// Creates a record.
pub async fn create<E>(
    State(state): State<SharedState>,
    Json(base): Json<E::Base>,
) -> ServerResult<(StatusCode, Json<E>)>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    let record = state.repository::<E>().create(base).await?;

    tracing::info!(collection = E::COLLECTION, id = record.id(), "{} created", E::NAME);

    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists all records.
pub async fn list<E>(State(state): State<SharedState>) -> ServerResult<Json<Vec<E>>>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    Ok(Json(state.repository::<E>().list().await?))
}

/// Gets a record by ID.
pub async fn get<E>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<E>>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    Ok(Json(state.repository::<E>().get(id).await?))
}

/// Updates the fields present in the request body.
pub async fn update<E>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(patch): Json<E::Patch>,
) -> ServerResult<Json<E>>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    let record = state.repository::<E>().update(id, patch).await?;

    tracing::info!(collection = E::COLLECTION, id, "{} updated", E::NAME);

    Ok(Json(record))
}

/// Deletes a record.
pub async fn delete<E>(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode>
where
    E: Entity,
    AppState: AsRef<ResourceRepository<E>>,
{
    state.repository::<E>().delete(id).await?;

    tracing::info!(collection = E::COLLECTION, id, "{} deleted", E::NAME);

    Ok(StatusCode::NO_CONTENT)
}
