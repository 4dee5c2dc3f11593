//! Category documents and DTOs.

use fauna_core::error::CoreError;
use fauna_core::listing::{contains_pattern, Page, Sort};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::id::DbId;
use crate::models::lenient_i64;
use crate::query::{contains_filter, ListQuery};

/// Default sort key for category listings.
pub const CATEGORY_NAME_FIELD: &str = "category_name";

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

/// A document in the `categories` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: DbId,
    #[serde(default)]
    pub category_name: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCategory {
    #[serde(default)]
    pub category_name: String,
}

impl CreateCategory {
    pub fn into_document(self, id: DbId) -> Category {
        Category {
            id,
            category_name: self.category_name,
        }
    }
}

/// Body of `PATCH /api/categories/{id}`. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub category_name: Option<String>,
}

impl UpdateCategory {
    /// Fields for the `$set` stage.
    pub fn to_set_document(&self) -> Result<Document, CoreError> {
        let mut set = Document::new();
        if let Some(name) = self.category_name.as_deref().filter(|s| !s.is_empty()) {
            set.insert("category_name", name);
        }
        Ok(set)
    }
}

/// JSON form of a category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryView {
    #[serde(rename = "_id")]
    pub id: String,
    pub category_name: String,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        Self {
            id: c.id.to_hex(),
            category_name: c.category_name,
        }
    }
}

/// Query parameters for `GET /api/categories`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryListParams {
    /// Case-insensitive substring match on the category name.
    pub category_name: Option<String>,
    /// Field to sort by (default `category_name`).
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

impl CategoryListParams {
    pub fn to_query(&self) -> ListQuery {
        let mut filter = Document::new();
        if let Some(pattern) = contains_pattern(self.category_name.as_deref()) {
            filter.insert(CATEGORY_NAME_FIELD, contains_filter(&pattern));
        }

        ListQuery {
            filter,
            sort: Sort::resolve(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                CATEGORY_NAME_FIELD,
            ),
            page: Page::resolve(self.limit, self.skip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_skips_empty_name() {
        let update = UpdateCategory {
            category_name: Some(String::new()),
        };
        assert!(update.to_set_document().unwrap().is_empty());
    }

    #[test]
    fn update_sets_supplied_name() {
        let update = UpdateCategory {
            category_name: Some("Felines".into()),
        };
        let set = update.to_set_document().unwrap();
        assert_eq!(set.get_str("category_name").unwrap(), "Felines");
    }

    #[test]
    fn list_query_filters_case_insensitively() {
        let params = CategoryListParams {
            category_name: Some("mamm".into()),
            ..Default::default()
        };
        let query = params.to_query();
        let cond = query.filter.get_document("category_name").unwrap();
        assert_eq!(cond.get_str("$regex").unwrap(), "mamm");
        assert_eq!(cond.get_str("$options").unwrap(), "i");
        assert_eq!(query.sort.field, "category_name");
        assert_eq!(query.page, Page { limit: 10, skip: 0 });
    }

    #[test]
    fn unparsable_paging_falls_back_to_defaults() {
        let params: CategoryListParams =
            serde_json::from_value(serde_json::json!({ "limit": "ten", "skip": "" })).unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.skip, None);
        assert_eq!(params.to_query().page, Page { limit: 10, skip: 0 });
    }

    #[test]
    fn numeric_paging_strings_are_parsed() {
        let params: CategoryListParams =
            serde_json::from_value(serde_json::json!({ "limit": "3", "skip": "6" })).unwrap();
        assert_eq!(params.to_query().page, Page { limit: 3, skip: 6 });
    }

    #[test]
    fn view_renders_hex_id() {
        let id = DbId::new();
        let view = CategoryView::from(CreateCategory {
            category_name: "Birds".into(),
        }
        .into_document(id));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["_id"], id.to_hex());
        assert_eq!(json["category_name"], "Birds");
    }
}
