//! Handlers for the `/species` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fauna_core::error::CoreError;
use fauna_db::id::DbId;
use fauna_db::models::species::{CreateSpecies, SpeciesListParams, SpeciesView, UpdateSpecies};
use fauna_db::models::UpdateOutcome;
use fauna_db::repositories::SpeciesRepo;

use super::path_id;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::response::{ErrorBody, SuccessResponse};
use crate::state::AppState;

/// GET /api/species
#[utoipa::path(
    get,
    path = "/api/species",
    tag = "species",
    params(SpeciesListParams),
    responses(
        (status = 200, body = [SpeciesView]),
        (status = 400, body = ErrorBody),
        (status = 500, body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SpeciesListParams>,
) -> AppResult<Json<Vec<SpeciesView>>> {
    let query = params.to_query()?;
    let species = SpeciesRepo::list(&state.db, &query).await?;
    Ok(Json(species.into_iter().map(SpeciesView::from).collect()))
}

/// GET /api/species/{id}
#[utoipa::path(
    get,
    path = "/api/species/{id}",
    tag = "species",
    params(("id" = String, Path, description = "Species ID")),
    responses(
        (status = 200, body = SpeciesView),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SpeciesView>> {
    let id = path_id(&id)?;
    let species = SpeciesRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(species.into()))
}

/// POST /api/species
#[utoipa::path(
    post,
    path = "/api/species",
    tag = "species",
    request_body = CreateSpecies,
    responses(
        (status = 201, body = SpeciesView),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSpecies>,
) -> AppResult<(StatusCode, Json<SpeciesView>)> {
    let species = input.into_document(DbId::new())?;
    SpeciesRepo::create(&state.db, &species).await?;

    tracing::info!(species_id = %species.id, "Species created");

    Ok((StatusCode::CREATED, Json(species.into())))
}

/// PATCH /api/species/{id}
#[utoipa::path(
    patch,
    path = "/api/species/{id}",
    tag = "species",
    params(("id" = String, Path, description = "Species ID")),
    request_body = UpdateSpecies,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateSpecies>,
) -> AppResult<Json<SuccessResponse>> {
    let id = path_id(&id)?;
    let fields = input.to_set_document()?;

    match SpeciesRepo::update(&state.db, id, fields).await? {
        UpdateOutcome::Matched => {
            tracing::info!(species_id = %id, "Species updated");
            Ok(Json(SuccessResponse::with_message(
                "Species updated successfully",
            )))
        }
        UpdateOutcome::Missing => Err(not_found(id)),
    }
}

/// DELETE /api/species/{id}
///
/// Succeeds whether or not the species existed. Animals referencing it
/// keep their dangling reference.
#[utoipa::path(
    delete,
    path = "/api/species/{id}",
    tag = "species",
    params(("id" = String, Path, description = "Species ID")),
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
    let deleted = SpeciesRepo::delete(&state.db, id).await?;

    tracing::info!(species_id = %id, deleted, "Species delete requested");

    Ok(Json(SuccessResponse::ok()))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Species",
        id: id.to_hex(),
    })
}
