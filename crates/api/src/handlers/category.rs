//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fauna_core::error::CoreError;
use fauna_db::id::DbId;
use fauna_db::models::category::{
    CategoryListParams, CategoryView, CreateCategory, UpdateCategory,
};
use fauna_db::models::UpdateOutcome;
use fauna_db::repositories::CategoryRepo;

use super::path_id;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::response::{ErrorBody, SuccessResponse};
use crate::state::AppState;

/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    params(CategoryListParams),
    responses(
        (status = 200, body = [CategoryView]),
        (status = 500, body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryListParams>,
) -> AppResult<Json<Vec<CategoryView>>> {
    let categories = CategoryRepo::list(&state.db, &params.to_query()).await?;
    Ok(Json(categories.into_iter().map(CategoryView::from).collect()))
}

/// GET /api/categories/{id}
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, body = CategoryView),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryView>> {
    let id = path_id(&id)?;
    let category = CategoryRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category.into()))
}

/// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, body = CategoryView),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<CategoryView>)> {
    let category = input.into_document(DbId::new());
    CategoryRepo::create(&state.db, &category).await?;

    tracing::info!(category_id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PATCH /api/categories/{id}
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<SuccessResponse>> {
    let id = path_id(&id)?;
    let fields = input.to_set_document()?;

    match CategoryRepo::update(&state.db, id, fields).await? {
        UpdateOutcome::Matched => {
            tracing::info!(category_id = %id, "Category updated");
            Ok(Json(SuccessResponse::with_message(
                "Category updated successfully",
            )))
        }
        UpdateOutcome::Missing => Err(not_found(id)),
    }
}

/// DELETE /api/categories/{id}
///
/// Succeeds whether or not the category existed.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = String, Path, description = "Category ID")),
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
    let deleted = CategoryRepo::delete(&state.db, id).await?;

    tracing::info!(category_id = %id, deleted, "Category delete requested");

    Ok(Json(SuccessResponse::ok()))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: id.to_hex(),
    })
}
