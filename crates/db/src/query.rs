//! Filter, sort and aggregation-pipeline builders.
//!
//! Everything here is pure: it turns resolved list parameters into BSON so
//! the exact documents sent to the server can be asserted in unit tests.

use fauna_core::listing::{Page, Sort};
use mongodb::bson::{doc, Bson, Document};

use crate::id::DbId;
use crate::{CATEGORIES, SPECIES};

/// Field the species lookup lands in before projection.
pub const SPECIES_INFO: &str = "species_info";

/// Field the category lookup lands in before projection.
pub const CATEGORY_INFO: &str = "category_info";

/// A resolved list request: filter, single-key sort and page window.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Document,
    pub sort: Sort,
    pub page: Page,
}

impl ListQuery {
    pub fn sort_document(&self) -> Document {
        sort_document(&self.sort)
    }
}

/// Case-insensitive regex condition for an already-escaped pattern.
pub fn contains_filter(pattern: &str) -> Bson {
    Bson::Document(doc! { "$regex": pattern, "$options": "i" })
}

pub fn sort_document(sort: &Sort) -> Document {
    let mut d = Document::new();
    d.insert(sort.field.clone(), sort.direction.as_i32());
    d
}

// ---------------------------------------------------------------------------
// Animal join pipeline
// ---------------------------------------------------------------------------

/// Left-join species and, through it, categories.
///
/// Both unwinds preserve animals whose reference is missing or dangling.
fn join_stages() -> [Document; 4] {
    [
        doc! {
            "$lookup": {
                "from": SPECIES,
                "localField": "species",
                "foreignField": "_id",
                "as": SPECIES_INFO,
            }
        },
        doc! {
            "$unwind": {
                "path": format!("${SPECIES_INFO}"),
                "preserveNullAndEmptyArrays": true,
            }
        },
        doc! {
            "$lookup": {
                "from": CATEGORIES,
                "localField": format!("{SPECIES_INFO}.category"),
                "foreignField": "_id",
                "as": CATEGORY_INFO,
            }
        },
        doc! {
            "$unwind": {
                "path": format!("${CATEGORY_INFO}"),
                "preserveNullAndEmptyArrays": true,
            }
        },
    ]
}

/// Flatten a joined animal into `_id, animal_name, birthdate, species,
/// category, location` where `species` and `category` are names.
fn project_stage() -> Document {
    doc! {
        "$project": {
            "_id": 1,
            "animal_name": 1,
            "birthdate": 1,
            "species": format!("${SPECIES_INFO}.species_name"),
            "category": format!("${CATEGORY_INFO}.category_name"),
            "location": 1,
        }
    }
}

/// Pipeline for `GET /api/animals`.
///
/// Stage order: join, match, project, sort, skip, limit. The match runs
/// before projection so it can see `species_info.*` and `category_info.*`.
/// Callers short-circuit empty pages; `$limit` must be positive.
pub fn animal_list_pipeline(query: &ListQuery) -> Vec<Document> {
    let filter = query.filter.clone();
    let sort = query.sort_document();
    let skip = query.page.skip as i64;
    let limit = query.page.limit;

    let mut pipeline: Vec<Document> = join_stages().into_iter().collect();
    pipeline.push(doc! { "$match": filter });
    pipeline.push(project_stage());
    pipeline.push(doc! { "$sort": sort });
    pipeline.push(doc! { "$skip": skip });
    pipeline.push(doc! { "$limit": limit });
    pipeline
}

/// Pipeline for `GET /api/animals/{id}`: match first, then join and project.
pub fn animal_by_id_pipeline(id: DbId) -> Vec<Document> {
    let mut pipeline = vec![doc! { "$match": { "_id": id } }];
    pipeline.extend(join_stages());
    pipeline.push(project_stage());
    pipeline
}

#[cfg(test)]
mod tests {
    use fauna_core::listing::SortDirection;

    use super::*;

    fn stage_names(pipeline: &[Document]) -> Vec<&str> {
        pipeline
            .iter()
            .map(|stage| stage.keys().next().unwrap().as_str())
            .collect()
    }

    fn sample_query() -> ListQuery {
        ListQuery {
            filter: doc! { "animal_name": contains_filter("leo") },
            sort: Sort {
                field: "animal_name".into(),
                direction: SortDirection::Desc,
            },
            page: Page { limit: 5, skip: 10 },
        }
    }

    #[test]
    fn list_pipeline_stage_order() {
        let pipeline = animal_list_pipeline(&sample_query());
        assert_eq!(
            stage_names(&pipeline),
            [
                "$lookup", "$unwind", "$lookup", "$unwind", "$match", "$project", "$sort",
                "$skip", "$limit"
            ]
        );
    }

    #[test]
    fn unwinds_preserve_missing_joins() {
        let pipeline = animal_list_pipeline(&sample_query());
        for stage in pipeline.iter().filter(|s| s.contains_key("$unwind")) {
            let unwind = stage.get_document("$unwind").unwrap();
            assert!(unwind.get_bool("preserveNullAndEmptyArrays").unwrap());
        }
    }

    #[test]
    fn category_lookup_goes_through_species() {
        let pipeline = animal_list_pipeline(&sample_query());
        let lookup = pipeline[2].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "categories");
        assert_eq!(lookup.get_str("localField").unwrap(), "species_info.category");
    }

    #[test]
    fn sort_skip_limit_carry_query_values() {
        let pipeline = animal_list_pipeline(&sample_query());
        assert_eq!(
            pipeline[6].get_document("$sort").unwrap(),
            &doc! { "animal_name": -1 }
        );
        assert_eq!(pipeline[7].get_i64("$skip").unwrap(), 10);
        assert_eq!(pipeline[8].get_i64("$limit").unwrap(), 5);
    }

    #[test]
    fn projection_flattens_joined_names() {
        let pipeline = animal_list_pipeline(&sample_query());
        let project = pipeline[5].get_document("$project").unwrap();
        assert_eq!(project.get_str("species").unwrap(), "$species_info.species_name");
        assert_eq!(project.get_str("category").unwrap(), "$category_info.category_name");
    }

    #[test]
    fn by_id_pipeline_matches_first() {
        let id = DbId::new();
        let pipeline = animal_by_id_pipeline(id);
        assert_eq!(
            stage_names(&pipeline),
            ["$match", "$lookup", "$unwind", "$lookup", "$unwind", "$project"]
        );
        assert_eq!(
            pipeline[0].get_document("$match").unwrap(),
            &doc! { "_id": id }
        );
    }
}
