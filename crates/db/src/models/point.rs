//! GeoJSON-style point shared by species and animals.

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A `{ "type": "Point", "coordinates": [lng, lat] }` value.
///
/// Stored verbatim on create; only the shape check in [`Point::is_complete`]
/// gates whether an update writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Point {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Point {
    /// A type tag plus exactly one coordinate pair.
    pub fn is_complete(&self) -> bool {
        !self.kind.is_empty() && self.coordinates.len() == 2
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "type": self.kind.as_str(),
            "coordinates": self.coordinates.clone(),
        }
    }
}
