//! Filtering, sorting and pagination primitives shared by every list endpoint.
//!
//! Kept free of store types so the rules (default page size, how a sort
//! direction is read, how a name filter becomes a pattern) are stated once
//! and tested without a database.

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// A resolved `skip`/`limit` window.
///
/// Applied after filtering and sorting. A non-positive limit yields an empty
/// page rather than an unbounded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub skip: u64,
}

impl Page {
    /// Build a page from raw query values. Negative `skip` is floored at zero.
    pub fn resolve(limit: Option<i64>, skip: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            skip: skip.unwrap_or(0).max(0) as u64,
        }
    }

    /// True when the window cannot contain any record.
    pub fn is_empty(&self) -> bool {
        self.limit <= 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any casing) sorts descending; anything else, including no
    /// value at all, sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Numeric form understood by the document store (`1` / `-1`).
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// A single-key sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Resolve `sort_by` / `sort_order` query values.
    ///
    /// Without `sort_by` the result is ascending on `default_field` and
    /// `sort_order` is ignored. The field name is passed through verbatim.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>, default_field: &str) -> Self {
        match sort_by.filter(|s| !s.is_empty()) {
            Some(field) => Self {
                field: field.to_string(),
                direction: SortDirection::parse(sort_order),
            },
            None => Self {
                field: default_field.to_string(),
                direction: SortDirection::Asc,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Turn a user-supplied name filter into a substring pattern.
///
/// Regex metacharacters are escaped so `a.b` matches the literal text.
/// Returns `None` for absent or empty input (no filter).
pub fn contains_pattern(input: Option<&str>) -> Option<String> {
    input.filter(|s| !s.is_empty()).map(regex::escape)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Page ----------------------------------------------------------------

    #[test]
    fn page_defaults_to_ten_from_zero() {
        assert_eq!(Page::resolve(None, None), Page { limit: 10, skip: 0 });
        assert_eq!(Page::default(), Page { limit: 10, skip: 0 });
    }

    #[test]
    fn page_keeps_explicit_values() {
        assert_eq!(Page::resolve(Some(3), Some(6)), Page { limit: 3, skip: 6 });
    }

    #[test]
    fn page_floors_negative_skip() {
        assert_eq!(Page::resolve(None, Some(-4)).skip, 0);
    }

    #[test]
    fn zero_or_negative_limit_is_empty() {
        assert!(Page::resolve(Some(0), None).is_empty());
        assert!(Page::resolve(Some(-1), None).is_empty());
        assert!(!Page::resolve(Some(1), None).is_empty());
    }

    // -- Sort ----------------------------------------------------------------

    #[test]
    fn sort_defaults_to_name_field_ascending() {
        let sort = Sort::resolve(None, Some("desc"), "animal_name");
        assert_eq!(sort.field, "animal_name");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn empty_sort_by_falls_back_to_default() {
        let sort = Sort::resolve(Some(""), None, "species_name");
        assert_eq!(sort.field, "species_name");
    }

    #[test]
    fn explicit_sort_by_honours_direction() {
        let sort = Sort::resolve(Some("birthdate"), Some("DESC"), "animal_name");
        assert_eq!(sort.field, "birthdate");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.direction.as_i32(), -1);
    }

    #[test]
    fn unknown_sort_order_is_ascending() {
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(None).as_i32(), 1);
    }

    // -- contains_pattern ----------------------------------------------------

    #[test]
    fn pattern_is_none_for_missing_or_empty_input() {
        assert_eq!(contains_pattern(None), None);
        assert_eq!(contains_pattern(Some("")), None);
    }

    #[test]
    fn pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern(Some("leo")).as_deref(), Some("leo"));
        assert_eq!(contains_pattern(Some("a.b*")).as_deref(), Some(r"a\.b\*"));
    }
}
