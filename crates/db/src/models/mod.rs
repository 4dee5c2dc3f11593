pub mod animal;
pub mod category;
pub mod point;
pub mod species;

use fauna_core::types::Timestamp;
use mongodb::bson;
use serde::{Deserialize, Deserializer};

/// Convert an API timestamp to the store's millisecond datetime.
pub fn to_bson_datetime(ts: Timestamp) -> bson::DateTime {
    bson::DateTime::from_millis(ts.timestamp_millis())
}

/// Convert a stored datetime back to an API timestamp.
///
/// Returns `None` for values outside chrono's representable range.
pub fn from_bson_datetime(dt: bson::DateTime) -> Option<Timestamp> {
    Timestamp::from_timestamp_millis(dt.timestamp_millis())
}

/// Read a paging number from the query string, treating an empty or
/// unparsable value as absent so the default applies.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.trim().parse().ok()))
}

/// Outcome of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A document with the id exists (whether or not a field changed).
    Matched,
    /// No document has the id.
    Missing,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn datetime_conversion_keeps_millisecond_precision() {
        let ts = chrono::Utc
            .with_ymd_and_hms(2019, 7, 14, 8, 30, 0)
            .unwrap();
        let back = from_bson_datetime(to_bson_datetime(ts)).unwrap();
        assert_eq!(back, ts);
    }
}
