//! Generated OpenAPI description of the `/api` surface.

use fauna_db::models::animal::{AnimalRecord, AnimalView, CreateAnimal, UpdateAnimal};
use fauna_db::models::category::{CategoryView, CreateCategory, UpdateCategory};
use fauna_db::models::point::Point;
use fauna_db::models::species::{CreateSpecies, SpeciesView, UpdateSpecies};
use utoipa::OpenApi;

use crate::handlers::{animal, category, species};
use crate::response::{ErrorBody, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fauna API",
        description = "Animals, species and categories with filtering, sorting and pagination."
    ),
    paths(
        animal::list,
        animal::get_by_id,
        animal::create,
        animal::update,
        animal::delete,
        species::list,
        species::get_by_id,
        species::create,
        species::update,
        species::delete,
        category::list,
        category::get_by_id,
        category::create,
        category::update,
        category::delete,
    ),
    components(schemas(
        Point,
        AnimalView,
        AnimalRecord,
        CreateAnimal,
        UpdateAnimal,
        SpeciesView,
        CreateSpecies,
        UpdateSpecies,
        CategoryView,
        CreateCategory,
        UpdateCategory,
        SuccessResponse,
        ErrorBody,
    )),
    tags(
        (name = "animals", description = "Animals joined with species and category"),
        (name = "species", description = "Species and their category"),
        (name = "categories", description = "Top-level categories"),
    )
)]
pub struct ApiDoc;
