//! Repository for the `species` collection.

use mongodb::bson::Document;
use mongodb::Collection;

use crate::id::DbId;
use crate::models::species::Species;
use crate::models::UpdateOutcome;
use crate::query::ListQuery;
use crate::{Db, SPECIES};

/// Provides CRUD operations for species.
pub struct SpeciesRepo;

impl SpeciesRepo {
    fn collection(db: &Db) -> Collection<Species> {
        db.collection(SPECIES)
    }

    /// List species matching the query, in sort order.
    pub async fn list(db: &Db, query: &ListQuery) -> Result<Vec<Species>, mongodb::error::Error> {
        super::find_page(db, &Self::collection(db), query).await
    }

    /// Find a species by its ID.
    pub async fn find_by_id(db: &Db, id: DbId) -> Result<Option<Species>, mongodb::error::Error> {
        super::find_by_id(db, &Self::collection(db), id).await
    }

    /// Insert a new species document.
    pub async fn create(db: &Db, species: &Species) -> Result<(), mongodb::error::Error> {
        Self::collection(db).insert_one(species).await?;
        Ok(())
    }

    /// Set the given fields on a species.
    pub async fn update(
        db: &Db,
        id: DbId,
        fields: Document,
    ) -> Result<UpdateOutcome, mongodb::error::Error> {
        super::set_fields(&Self::collection(db), id, fields).await
    }

    /// Delete a species. Animals referencing it are left untouched.
    pub async fn delete(db: &Db, id: DbId) -> Result<bool, mongodb::error::Error> {
        super::delete_by_id(&Self::collection(db), id).await
    }
}
