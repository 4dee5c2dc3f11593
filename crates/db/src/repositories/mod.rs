//! Repository layer: one zero-sized struct per collection with async
//! associated functions taking the shared [`Db`](crate::Db) handle.

mod animal_repo;
mod category_repo;
mod species_repo;

pub use animal_repo::AnimalRepo;
pub use category_repo::CategoryRepo;
pub use species_repo::SpeciesRepo;

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::de::DeserializeOwned;

use crate::id::DbId;
use crate::models::UpdateOutcome;
use crate::query::ListQuery;
use crate::Db;

/// Filtered, sorted, paginated `find`. Empty pages never reach the server.
async fn find_page<T>(
    db: &Db,
    collection: &Collection<T>,
    query: &ListQuery,
) -> Result<Vec<T>, mongodb::error::Error>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    if query.page.is_empty() {
        return Ok(Vec::new());
    }

    collection
        .find(query.filter.clone())
        .sort(query.sort_document())
        .skip(query.page.skip)
        .limit(query.page.limit)
        .max_time(db.max_time())
        .await?
        .try_collect()
        .await
}

async fn find_by_id<T>(
    db: &Db,
    collection: &Collection<T>,
    id: DbId,
) -> Result<Option<T>, mongodb::error::Error>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    collection
        .find_one(doc! { "_id": id })
        .max_time(db.max_time())
        .await
}

/// Apply a `$set` of the given fields.
///
/// An empty field set still reports whether the document exists, since the
/// server rejects an empty `$set`.
async fn set_fields<T>(
    collection: &Collection<T>,
    id: DbId,
    fields: Document,
) -> Result<UpdateOutcome, mongodb::error::Error>
where
    T: Send + Sync,
{
    let filter = doc! { "_id": id };
    let matched = if fields.is_empty() {
        collection.count_documents(filter).limit(1).await?
    } else {
        collection
            .update_one(filter, doc! { "$set": fields })
            .await?
            .matched_count
    };

    Ok(if matched > 0 {
        UpdateOutcome::Matched
    } else {
        UpdateOutcome::Missing
    })
}

/// Delete at most one document. Returns whether one was removed.
async fn delete_by_id<T>(collection: &Collection<T>, id: DbId) -> Result<bool, mongodb::error::Error>
where
    T: Send + Sync,
{
    let result = collection.delete_one(doc! { "_id": id }).await?;
    Ok(result.deleted_count > 0)
}
