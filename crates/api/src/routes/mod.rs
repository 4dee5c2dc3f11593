pub mod animal;
pub mod category;
pub mod docs;
pub mod health;
pub mod species;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /animals                 list (filter, sort, page), create
/// /animals/{id}            get (joined), update, delete
///
/// /species                 list (filter, sort, page), create
/// /species/{id}            get, update, delete
///
/// /categories              list (filter, sort, page), create
/// /categories/{id}         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/animals", animal::router())
        .nest("/species", species::router())
        .nest("/categories", category::router())
}
