//! Repository for the `categories` collection.

use mongodb::bson::Document;
use mongodb::Collection;

use crate::id::DbId;
use crate::models::category::Category;
use crate::models::UpdateOutcome;
use crate::query::ListQuery;
use crate::{Db, CATEGORIES};

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    fn collection(db: &Db) -> Collection<Category> {
        db.collection(CATEGORIES)
    }

    /// List categories matching the query, in sort order.
    pub async fn list(db: &Db, query: &ListQuery) -> Result<Vec<Category>, mongodb::error::Error> {
        super::find_page(db, &Self::collection(db), query).await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(db: &Db, id: DbId) -> Result<Option<Category>, mongodb::error::Error> {
        super::find_by_id(db, &Self::collection(db), id).await
    }

    /// Insert a new category document.
    pub async fn create(db: &Db, category: &Category) -> Result<(), mongodb::error::Error> {
        Self::collection(db).insert_one(category).await?;
        Ok(())
    }

    /// Set the given fields on a category.
    pub async fn update(
        db: &Db,
        id: DbId,
        fields: Document,
    ) -> Result<UpdateOutcome, mongodb::error::Error> {
        super::set_fields(&Self::collection(db), id, fields).await
    }

    /// Delete a category. Species referencing it are left untouched.
    pub async fn delete(db: &Db, id: DbId) -> Result<bool, mongodb::error::Error> {
        super::delete_by_id(&Self::collection(db), id).await
    }
}
