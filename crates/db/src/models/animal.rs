//! Animal documents, DTOs and the joined listing view.

use fauna_core::error::CoreError;
use fauna_core::listing::{contains_pattern, Page, Sort};
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::id::{parse_id, parse_optional_ref, DbId};
use crate::models::point::Point;
use crate::models::{from_bson_datetime, lenient_i64, to_bson_datetime};
use crate::query::{contains_filter, ListQuery, CATEGORY_INFO, SPECIES_INFO};

/// Default sort key for animal listings.
pub const ANIMAL_NAME_FIELD: &str = "animal_name";

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

/// A document in the `animals` collection.
///
/// `species` references `species._id` without any integrity guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    #[serde(rename = "_id")]
    pub id: DbId,
    #[serde(default)]
    pub animal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

/// Output row of the join pipeline: species and category are resolved names.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinedAnimal {
    #[serde(rename = "_id")]
    pub id: DbId,
    #[serde(default)]
    pub animal_name: String,
    #[serde(default)]
    pub birthdate: Option<bson::DateTime>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<Point>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /api/animals`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAnimal {
    #[serde(default)]
    pub animal_name: String,
    pub birthdate: Option<chrono::DateTime<chrono::Utc>>,
    /// Hex id of the species.
    pub species: Option<String>,
    pub location: Option<Point>,
}

impl CreateAnimal {
    pub fn into_document(self, id: DbId) -> Result<Animal, CoreError> {
        let species = parse_optional_ref(self.species.as_deref(), "species ID")?;
        Ok(Animal {
            id,
            animal_name: self.animal_name,
            birthdate: self.birthdate.map(to_bson_datetime),
            species,
            location: self.location,
        })
    }
}

/// Body of `PATCH /api/animals/{id}`. Only present, non-empty fields are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAnimal {
    pub animal_name: Option<String>,
    pub birthdate: Option<chrono::DateTime<chrono::Utc>>,
    pub species: Option<String>,
    pub location: Option<Point>,
}

impl UpdateAnimal {
    /// Fields for the `$set` stage. A malformed species id is a validation error.
    pub fn to_set_document(&self) -> Result<Document, CoreError> {
        let mut set = Document::new();
        if let Some(name) = self.animal_name.as_deref().filter(|s| !s.is_empty()) {
            set.insert("animal_name", name);
        }
        if let Some(birthdate) = self.birthdate {
            set.insert("birthdate", to_bson_datetime(birthdate));
        }
        if let Some(location) = self.location.as_ref().filter(|p| p.is_complete()) {
            set.insert("location", location.to_document());
        }
        if let Some(raw) = self.species.as_deref().filter(|s| !s.is_empty()) {
            set.insert("species", parse_id(raw, "species ID")?);
        }
        Ok(set)
    }
}

/// JSON form of a stored animal, as echoed by create.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnimalRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub animal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<chrono::DateTime<chrono::Utc>>,
    /// Hex id of the species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

impl From<Animal> for AnimalRecord {
    fn from(a: Animal) -> Self {
        Self {
            id: a.id.to_hex(),
            animal_name: a.animal_name,
            birthdate: a.birthdate.and_then(from_bson_datetime),
            species: a.species.map(|s| s.to_hex()),
            location: a.location,
        }
    }
}

/// JSON form of an animal joined with its species and category names.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnimalView {
    #[serde(rename = "_id")]
    pub id: String,
    pub animal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<chrono::DateTime<chrono::Utc>>,
    /// Species name, absent when the reference does not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Category name, absent when either reference does not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

impl From<JoinedAnimal> for AnimalView {
    fn from(a: JoinedAnimal) -> Self {
        Self {
            id: a.id.to_hex(),
            animal_name: a.animal_name,
            birthdate: a.birthdate.and_then(from_bson_datetime),
            species: a.species,
            category: a.category,
            location: a.location,
        }
    }
}

/// Query parameters for `GET /api/animals`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnimalListParams {
    /// Case-insensitive substring match on the animal name.
    pub animal_name: Option<String>,
    /// Case-insensitive substring match on the joined species name.
    pub species_name: Option<String>,
    /// Case-insensitive substring match on the joined category name.
    pub category_name: Option<String>,
    /// Field of the flattened record to sort by (default `animal_name`).
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Page size (default 10).
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    /// Records to skip (default 0).
    #[serde(default, deserialize_with = "lenient_i64")]
    pub skip: Option<i64>,
}

impl AnimalListParams {
    /// The match runs on the joined shape, so species and category filters
    /// address the lookup fields rather than the projected names.
    pub fn to_query(&self) -> ListQuery {
        let mut filter = Document::new();
        if let Some(pattern) = contains_pattern(self.animal_name.as_deref()) {
            filter.insert(ANIMAL_NAME_FIELD, contains_filter(&pattern));
        }
        if let Some(pattern) = contains_pattern(self.species_name.as_deref()) {
            filter.insert(
                format!("{SPECIES_INFO}.species_name"),
                contains_filter(&pattern),
            );
        }
        if let Some(pattern) = contains_pattern(self.category_name.as_deref()) {
            filter.insert(
                format!("{CATEGORY_INFO}.category_name"),
                contains_filter(&pattern),
            );
        }

        ListQuery {
            filter,
            sort: Sort::resolve(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                ANIMAL_NAME_FIELD,
            ),
            page: Page::resolve(self.limit, self.skip),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn create_keeps_absent_fields_absent() {
        let animal = CreateAnimal {
            animal_name: "Leo".into(),
            ..Default::default()
        }
        .into_document(DbId::new())
        .unwrap();
        let stored = bson::to_document(&animal).unwrap();
        assert!(stored.contains_key("_id"));
        assert!(!stored.contains_key("species"));
        assert!(!stored.contains_key("birthdate"));
    }

    #[test]
    fn create_rejects_malformed_species() {
        let input = CreateAnimal {
            species: Some("lion".into()),
            ..Default::default()
        };
        assert_matches!(
            input.into_document(DbId::new()),
            Err(CoreError::Validation(msg)) if msg == "Invalid species ID format"
        );
    }

    #[test]
    fn record_echoes_birthdate_and_species_hex() {
        let species = DbId::new();
        let born = chrono::Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let record = AnimalRecord::from(
            CreateAnimal {
                animal_name: "Leo".into(),
                birthdate: Some(born),
                species: Some(species.to_hex()),
                location: None,
            }
            .into_document(DbId::new())
            .unwrap(),
        );
        assert_eq!(record.birthdate, Some(born));
        assert_eq!(record.species, Some(species.to_hex()));
    }

    #[test]
    fn update_blank_fields_are_left_alone() {
        let update = UpdateAnimal {
            animal_name: Some(String::new()),
            species: Some(String::new()),
            ..Default::default()
        };
        assert!(update.to_set_document().unwrap().is_empty());
    }

    #[test]
    fn update_sets_location_only_when_complete() {
        let update = UpdateAnimal {
            location: Some(Point {
                kind: "Point".into(),
                coordinates: vec![36.8, -1.3],
            }),
            ..Default::default()
        };
        let set = update.to_set_document().unwrap();
        assert_eq!(set.get_document("location").unwrap().get_str("type").unwrap(), "Point");
    }

    #[test]
    fn list_query_targets_joined_fields() {
        let params = AnimalListParams {
            species_name: Some("lion".into()),
            category_name: Some("mamm".into()),
            ..Default::default()
        };
        let query = params.to_query();
        assert!(query.filter.contains_key("species_info.species_name"));
        assert!(query.filter.contains_key("category_info.category_name"));
        assert!(!query.filter.contains_key("animal_name"));
    }

    #[test]
    fn joined_row_without_species_omits_names() {
        let id = DbId::new();
        let row: JoinedAnimal =
            bson::from_document(bson::doc! { "_id": id, "animal_name": "Stray" }).unwrap();
        let json = serde_json::to_value(AnimalView::from(row)).unwrap();
        assert_eq!(json["_id"], id.to_hex());
        assert!(json.get("species").is_none());
        assert!(json.get("category").is_none());
    }
}
