//! # Per-Column Metadata
//!
//! Each column of a frame block carries a distinct-value count and an
//! optional missing-value marker. Both fields default to "absent" and the
//! default state is detected explicitly so the serializer can elide
//! metadata entirely when every column is at its default.

/// Distinct-count and missing-value marker for a single column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMetadata {
    num_distinct: u64,
    mv_value: Option<String>,
}

impl ColumnMetadata {
    /// Creates metadata with a distinct count and no missing-value marker.
    pub fn new(num_distinct: u64) -> Self {
        Self {
            num_distinct,
            mv_value: None,
        }
    }

    /// Creates metadata with a distinct count and a missing-value marker.
    pub fn with_mv_value(num_distinct: u64, mv_value: Option<String>) -> Self {
        Self {
            num_distinct,
            mv_value,
        }
    }

    /// Returns the distinct-value count.
    pub fn num_distinct(&self) -> u64 {
        self.num_distinct
    }

    /// Sets the distinct-value count.
    pub fn set_num_distinct(&mut self, num_distinct: u64) {
        self.num_distinct = num_distinct;
    }

    /// Returns the missing-value marker, if any.
    pub fn mv_value(&self) -> Option<&str> {
        self.mv_value.as_deref()
    }

    /// Sets the missing-value marker.
    pub fn set_mv_value(&mut self, mv_value: Option<String>) {
        self.mv_value = mv_value;
    }

    /// True iff both sub-fields are at their default. Default metadata is
    /// elided on the wire.
    pub fn is_default(&self) -> bool {
        self.num_distinct == 0 && self.mv_value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_detection_requires_both_fields() {
        assert!(ColumnMetadata::default().is_default());
        assert!(!ColumnMetadata::new(3).is_default());
        assert!(!ColumnMetadata::with_mv_value(0, Some("NA".to_owned())).is_default());
        assert!(ColumnMetadata::with_mv_value(0, None).is_default());
    }
}
