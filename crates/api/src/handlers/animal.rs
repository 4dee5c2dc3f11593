//! Handlers for the `/animals` resource.
//!
//! Reads return [`AnimalView`]: the animal joined with its species and
//! category names. Create echoes the stored [`AnimalRecord`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fauna_core::error::CoreError;
use fauna_db::id::DbId;
use fauna_db::models::animal::{
    AnimalListParams, AnimalRecord, AnimalView, CreateAnimal, UpdateAnimal,
};
use fauna_db::models::UpdateOutcome;
use fauna_db::repositories::AnimalRepo;

use super::path_id;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::response::{ErrorBody, SuccessResponse};
use crate::state::AppState;

/// GET /api/animals
#[utoipa::path(
    get,
    path = "/api/animals",
    tag = "animals",
    params(AnimalListParams),
    responses(
        (status = 200, body = [AnimalView]),
        (status = 500, body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AnimalListParams>,
) -> AppResult<Json<Vec<AnimalView>>> {
    let animals = AnimalRepo::list(&state.db, &params.to_query()).await?;
    Ok(Json(animals.into_iter().map(AnimalView::from).collect()))
}

/// GET /api/animals/{id}
#[utoipa::path(
    get,
    path = "/api/animals/{id}",
    tag = "animals",
    params(("id" = String, Path, description = "Animal ID")),
    responses(
        (status = 200, body = AnimalView),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnimalView>> {
    let id = path_id(&id)?;
    let animal = AnimalRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(animal.into()))
}

/// POST /api/animals
#[utoipa::path(
    post,
    path = "/api/animals",
    tag = "animals",
    request_body = CreateAnimal,
    responses(
        (status = 201, body = AnimalRecord),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAnimal>,
) -> AppResult<(StatusCode, Json<AnimalRecord>)> {
    let animal = input.into_document(DbId::new())?;
    AnimalRepo::create(&state.db, &animal).await?;

    tracing::info!(animal_id = %animal.id, "Animal created");

    Ok((StatusCode::CREATED, Json(animal.into())))
}

/// PATCH /api/animals/{id}
#[utoipa::path(
    patch,
    path = "/api/animals/{id}",
    tag = "animals",
    params(("id" = String, Path, description = "Animal ID")),
    request_body = UpdateAnimal,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateAnimal>,
) -> AppResult<Json<SuccessResponse>> {
    let id = path_id(&id)?;
    let fields = input.to_set_document()?;

    match AnimalRepo::update(&state.db, id, fields).await? {
        UpdateOutcome::Matched => {
            tracing::info!(animal_id = %id, "Animal updated");
            Ok(Json(SuccessResponse::with_message(
                "Animal updated successfully",
            )))
        }
        UpdateOutcome::Missing => Err(not_found(id)),
    }
}

/// DELETE /api/animals/{id}
///
/// Succeeds whether or not the animal existed.
#[utoipa::path(
    delete,
    path = "/api/animals/{id}",
    tag = "animals",
    params(("id" = String, Path, description = "Animal ID")),
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    let id = path_id(&id)?;
    let deleted = AnimalRepo::delete(&state.db, id).await?;

    tracing::info!(animal_id = %id, deleted, "Animal delete requested");

    Ok(Json(SuccessResponse::ok()))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Animal",
        id: id.to_hex(),
    })
}
