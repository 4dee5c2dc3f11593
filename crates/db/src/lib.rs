//! Document-store access for animals, species and categories.
//!
//! The [`Db`] handle is constructed once at startup and cloned into every
//! request; there is no process-wide store state.

pub mod id;
pub mod models;
pub mod query;
pub mod repositories;

use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database, IndexModel};

/// Collection holding animal documents.
pub const ANIMALS: &str = "animals";

/// Collection holding species documents.
pub const SPECIES: &str = "species";

/// Collection holding category documents.
pub const CATEGORIES: &str = "categories";

/// Cloneable handle to the logical database.
///
/// Carries the server-side time limit attached to read commands so a query
/// never outlives the HTTP request that issued it.
#[derive(Debug, Clone)]
pub struct Db {
    database: Database,
    max_time: Duration,
}

impl Db {
    pub fn new(database: Database, max_time: Duration) -> Self {
        Self { database, max_time }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn max_time(&self) -> Duration {
        self.max_time
    }

    pub(crate) fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }
}

/// Resolve a connection string and select the named database.
///
/// The driver connects lazily; use [`health_check`] to verify reachability.
pub async fn connect(uri: &str, database: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database))
}

/// Round-trip a `ping` command.
pub async fn health_check(db: &Db) -> Result<(), mongodb::error::Error> {
    db.database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Create the secondary indexes the list and join queries rely on.
///
/// Index creation is idempotent, so this runs on every startup.
pub async fn ensure_indexes(db: &Db) -> Result<(), mongodb::error::Error> {
    let plan: [(&str, &[&str]); 3] = [
        (ANIMALS, &["animal_name", "species"]),
        (SPECIES, &["species_name", "category"]),
        (CATEGORIES, &["category_name"]),
    ];

    for (collection, fields) in plan {
        let models: Vec<IndexModel> = fields
            .iter()
            .map(|field| {
                let mut keys = Document::new();
                keys.insert(*field, 1);
                IndexModel::builder().keys(keys).build()
            })
            .collect();

        db.collection::<Document>(collection)
            .create_indexes(models)
            .await?;
        tracing::debug!(collection, "Indexes ensured");
    }

    Ok(())
}
