//! Species documents and DTOs.

use fauna_core::error::CoreError;
use fauna_core::listing::{contains_pattern, Page, Sort};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::id::{parse_id, parse_optional_ref, DbId};
use crate::models::lenient_i64;
use crate::models::point::Point;
use crate::query::{contains_filter, ListQuery};

/// Default sort key for species listings.
pub const SPECIES_NAME_FIELD: &str = "species_name";

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

/// A document in the `species` collection.
///
/// `category` references `categories._id` without any integrity guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    #[serde(rename = "_id")]
    pub id: DbId,
    #[serde(default)]
    pub species_name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /api/species`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateSpecies {
    #[serde(default)]
    pub species_name: String,
    #[serde(default)]
    pub image: String,
    /// Hex id of the parent category.
    pub category: Option<String>,
    pub location: Option<Point>,
}

impl CreateSpecies {
    pub fn into_document(self, id: DbId) -> Result<Species, CoreError> {
        let category = parse_optional_ref(self.category.as_deref(), "category ID")?;
        Ok(Species {
            id,
            species_name: self.species_name,
            image: self.image,
            category,
            location: self.location,
        })
    }
}

/// Body of `PATCH /api/species/{id}`. Only present, non-empty fields are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSpecies {
    pub species_name: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub location: Option<Point>,
}

impl UpdateSpecies {
    /// Fields for the `$set` stage. A malformed category id is a validation error.
    pub fn to_set_document(&self) -> Result<Document, CoreError> {
        let mut set = Document::new();
        if let Some(name) = self.species_name.as_deref().filter(|s| !s.is_empty()) {
            set.insert("species_name", name);
        }
        if let Some(image) = self.image.as_deref().filter(|s| !s.is_empty()) {
            set.insert("image", image);
        }
        if let Some(location) = self.location.as_ref().filter(|p| p.is_complete()) {
            set.insert("location", location.to_document());
        }
        if let Some(raw) = self.category.as_deref().filter(|s| !s.is_empty()) {
            set.insert("category", parse_id(raw, "category ID")?);
        }
        Ok(set)
    }
}

/// JSON form of a species.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SpeciesView {
    #[serde(rename = "_id")]
    pub id: String,
    pub species_name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

impl From<Species> for SpeciesView {
    fn from(s: Species) -> Self {
        Self {
            id: s.id.to_hex(),
            species_name: s.species_name,
            image: s.image,
            category: s.category.map(|c| c.to_hex()),
            location: s.location,
        }
    }
}

/// Query parameters for `GET /api/species`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpeciesListParams {
    /// Case-insensitive substring match on the species name.
    pub species_name: Option<String>,
    /// Exact match on the parent category id.
    pub category_id: Option<String>,
    /// Field to sort by (default `species_name`).
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

impl SpeciesListParams {
    pub fn to_query(&self) -> Result<ListQuery, CoreError> {
        let mut filter = Document::new();
        if let Some(pattern) = contains_pattern(self.species_name.as_deref()) {
            filter.insert(SPECIES_NAME_FIELD, contains_filter(&pattern));
        }
        if let Some(category) = parse_optional_ref(self.category_id.as_deref(), "category ID")? {
            filter.insert("category", category);
        }

        Ok(ListQuery {
            filter,
            sort: Sort::resolve(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                SPECIES_NAME_FIELD,
            ),
            page: Page::resolve(self.limit, self.skip),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fauna_core::listing::SortDirection;

    use super::*;

    const CAT: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    #[test]
    fn create_parses_category_reference() {
        let input = CreateSpecies {
            species_name: "Lion".into(),
            category: Some(CAT.into()),
            ..Default::default()
        };
        let doc = input.into_document(DbId::new()).unwrap();
        assert_eq!(doc.category.unwrap().to_hex(), CAT);
    }

    #[test]
    fn create_rejects_malformed_category() {
        let input = CreateSpecies {
            category: Some("not-an-id".into()),
            ..Default::default()
        };
        assert_matches!(
            input.into_document(DbId::new()),
            Err(CoreError::Validation(msg)) if msg == "Invalid category ID format"
        );
    }

    #[test]
    fn update_writes_only_supplied_fields() {
        let update = UpdateSpecies {
            species_name: Some("Tiger".into()),
            image: Some(String::new()),
            category: None,
            location: Some(Point {
                kind: "Point".into(),
                coordinates: vec![1.0],
            }),
        };
        let set = update.to_set_document().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("species_name").unwrap(), "Tiger");
    }

    #[test]
    fn update_rejects_malformed_category() {
        let update = UpdateSpecies {
            category: Some("123".into()),
            ..Default::default()
        };
        assert_matches!(update.to_set_document(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn list_query_with_category_and_sort() {
        let params = SpeciesListParams {
            category_id: Some(CAT.into()),
            sort_by: Some("image".into()),
            sort_order: Some("desc".into()),
            limit: Some(2),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.filter.get_object_id("category").unwrap().to_hex(), CAT);
        assert_eq!(query.sort.field, "image");
        assert_eq!(query.sort.direction, SortDirection::Desc);
        assert_eq!(query.page.limit, 2);
    }

    #[test]
    fn list_query_rejects_malformed_category_id() {
        let params = SpeciesListParams {
            category_id: Some("zzz".into()),
            ..Default::default()
        };
        assert_matches!(params.to_query(), Err(CoreError::Validation(_)));
    }
}
