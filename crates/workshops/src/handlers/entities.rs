//! CRUD handlers shared by every entity kind.
//!
//! Mounted once per kind, e.g. under `/api/workshops`:
//!
//! - `GET    /{client_id}`      - all records of the client
//! - `POST   /{client_id}`      - create, id is minted server side
//! - `GET    /{client_id}/{id}` - one record or 404
//! - `PUT    /{client_id}/{id}` - full replacement
//! - `DELETE /{client_id}/{id}` - delete, missing records included

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};

use workshops_core::entity::Entity;
use workshops_core::storage::Repository;

use crate::{handlers::AppError, state::AppState};

/// Routes for one entity kind, relative to its mount point.
pub fn routes<E>() -> Router<AppState>
where
    E: Entity + Serialize + DeserializeOwned,
    Arc<dyn Repository<E>>: FromRef<AppState>,
{
    Router::new()
        .route("/{client_id}", get(list::<E>).post(create::<E>))
        .route(
            "/{client_id}/{id}",
            get(read::<E>).put(update::<E>).delete(delete::<E>),
        )
}

/// List every record of a client.
pub async fn list<E>(
    State(repository): State<Arc<dyn Repository<E>>>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<E>>, AppError>
where
    E: Entity + Serialize,
{
    let records = repository.read_all(&client_id).await?;
    Ok(Json(records))
}

/// Create a record under a freshly minted id.
pub async fn create<E>(
    State(repository): State<Arc<dyn Repository<E>>>,
    Path(client_id): Path<String>,
    Json(mut record): Json<E>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity + Serialize,
{
    record.set_key(client_id, String::new());
    let created = repository.create(record).await?;

    tracing::info!(
        kind = E::KIND,
        client_id = created.client_id(),
        id = created.id(),
        "Created record"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a single record.
pub async fn read<E>(
    State(repository): State<Arc<dyn Repository<E>>>,
    Path((client_id, id)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    E: Entity + Serialize,
{
    let response = match repository.read(&client_id, &id).await? {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

/// Replace a record wholesale.
pub async fn update<E>(
    State(repository): State<Arc<dyn Repository<E>>>,
    Path((client_id, id)): Path<(String, String)>,
    Json(mut record): Json<E>,
) -> Result<StatusCode, AppError>
where
    E: Entity,
{
    record.set_key(client_id, id);
    repository.update(record).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a record.
pub async fn delete<E>(
    State(repository): State<Arc<dyn Repository<E>>>,
    Path((client_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError>
where
    E: Entity,
{
    repository.delete(&client_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
