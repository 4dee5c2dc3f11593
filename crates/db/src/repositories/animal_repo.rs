//! Repository for the `animals` collection.
//!
//! Reads go through the join pipeline in [`crate::query`] so every animal
//! comes back with its species and category names resolved.

use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::Collection;

use crate::id::DbId;
use crate::models::animal::{Animal, JoinedAnimal};
use crate::models::UpdateOutcome;
use crate::query::{animal_by_id_pipeline, animal_list_pipeline, ListQuery};
use crate::{Db, ANIMALS};

/// Provides CRUD operations for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    fn collection(db: &Db) -> Collection<Animal> {
        db.collection(ANIMALS)
    }

    async fn aggregate(
        db: &Db,
        pipeline: Vec<Document>,
    ) -> Result<Vec<JoinedAnimal>, mongodb::error::Error> {
        db.collection::<Document>(ANIMALS)
            .aggregate(pipeline)
            .max_time(db.max_time())
            .await?
            .with_type::<JoinedAnimal>()
            .try_collect()
            .await
    }

    /// List animals joined with species and category, filtered, sorted and paged.
    pub async fn list(
        db: &Db,
        query: &ListQuery,
    ) -> Result<Vec<JoinedAnimal>, mongodb::error::Error> {
        if query.page.is_empty() {
            return Ok(Vec::new());
        }
        Self::aggregate(db, animal_list_pipeline(query)).await
    }

    /// Find one joined animal by its ID.
    pub async fn find_by_id(
        db: &Db,
        id: DbId,
    ) -> Result<Option<JoinedAnimal>, mongodb::error::Error> {
        let rows = Self::aggregate(db, animal_by_id_pipeline(id)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a new animal document.
    pub async fn create(db: &Db, animal: &Animal) -> Result<(), mongodb::error::Error> {
        Self::collection(db).insert_one(animal).await?;
        Ok(())
    }

    /// Set the given fields on an animal.
    pub async fn update(
        db: &Db,
        id: DbId,
        fields: Document,
    ) -> Result<UpdateOutcome, mongodb::error::Error> {
        super::set_fields(&Self::collection(db), id, fields).await
    }

    /// Delete an animal.
    pub async fn delete(db: &Db, id: DbId) -> Result<bool, mongodb::error::Error> {
        super::delete_by_id(&Self::collection(db), id).await
    }
}
