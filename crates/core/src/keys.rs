//! Single-table key design.
//!
//! Every entity kind shares one table keyed by `(partitionKey, sortKey)`.
//! The partition key is the tenant (client) id and the sort key is the
//! entity tag followed by the entity id, e.g. `WORKSHOP#<id>`.
//!
//! This module is the only place that knows the tag strings. Everything
//! else goes through [`build_key`], [`with_tag`] and [`strip_tag`].

use std::fmt;

/// Name of the partition key attribute.
pub const PARTITION_KEY: &str = "partitionKey";

/// Name of the sort key attribute.
pub const SORT_KEY: &str = "sortKey";

// ============================================================================
// Entity tags
// ============================================================================

/// Kind of entity stored in the table.
///
/// Each variant owns a tag that prefixes the sort key of its rows. Tags end
/// with `#`, which never appears in a generated id, and no tag is a prefix of
/// another, so decoding a sort key is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Workshop,
    Location,
    Organizer,
}

impl EntityTag {
    /// Every known tag.
    pub const ALL: [EntityTag; 3] = [EntityTag::Workshop, EntityTag::Location, EntityTag::Organizer];

    /// The sort-key prefix for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            EntityTag::Workshop => "WORKSHOP#",
            EntityTag::Location => "LOCATION#",
            EntityTag::Organizer => "ORGANIZER#",
        }
    }

    /// Decodes a sort key into its tag and bare id.
    ///
    /// Returns `None` when the value does not start with a known tag.
    pub fn from_sort_key(sort_key: &str) -> Option<(EntityTag, &str)> {
        Self::ALL
            .iter()
            .find_map(|tag| sort_key.strip_prefix(tag.prefix()).map(|id| (*tag, id)))
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Storage-layer addressing pair for a single row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub partition_key: String,
    pub sort_key: String,
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.sort_key)
    }
}

/// Builds the key of an entity row.
///
/// Pattern: `(<partition>, <tag><id>)`
pub fn build_key(partition: &str, tag: EntityTag, id: &str) -> TableKey {
    TableKey {
        partition_key: partition.to_string(),
        sort_key: with_tag(tag, id),
    }
}

/// Prepends the tag to a bare id.
///
/// Pattern: `<tag><id>`
pub fn with_tag(tag: EntityTag, id: &str) -> String {
    format!("{}{id}", tag.prefix())
}

/// Removes a single leading occurrence of the tag.
///
/// Values that do not carry the tag are returned unchanged.
pub fn strip_tag(value: &str, tag: EntityTag) -> &str {
    value.strip_prefix(tag.prefix()).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key() {
        let key = build_key("C1", EntityTag::Workshop, "abc");
        assert_eq!(key.partition_key, "C1");
        assert_eq!(key.sort_key, "WORKSHOP#abc");
    }

    #[test]
    fn test_with_tag() {
        assert_eq!(with_tag(EntityTag::Location, "L1"), "LOCATION#L1");
        assert_eq!(with_tag(EntityTag::Organizer, "O1"), "ORGANIZER#O1");
    }

    #[test]
    fn test_strip_tag_removes_leading_tag() {
        assert_eq!(strip_tag("WORKSHOP#abc", EntityTag::Workshop), "abc");
        assert_eq!(
            strip_tag(&with_tag(EntityTag::Organizer, "x-Y_9"), EntityTag::Organizer),
            "x-Y_9"
        );
    }

    #[test]
    fn test_strip_tag_without_tag_is_identity() {
        assert_eq!(strip_tag("abc", EntityTag::Workshop), "abc");
        assert_eq!(strip_tag("LOCATION#abc", EntityTag::Workshop), "LOCATION#abc");
        assert_eq!(strip_tag("", EntityTag::Workshop), "");
    }

    #[test]
    fn test_strip_tag_removes_only_one_occurrence() {
        assert_eq!(
            strip_tag("WORKSHOP#WORKSHOP#abc", EntityTag::Workshop),
            "WORKSHOP#abc"
        );
    }

    #[test]
    fn test_tags_are_disjoint_prefixes() {
        for a in EntityTag::ALL {
            for b in EntityTag::ALL {
                if a != b {
                    assert!(
                        !a.prefix().starts_with(b.prefix()),
                        "{a} must not start with {b}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_from_sort_key() {
        assert_eq!(
            EntityTag::from_sort_key("LOCATION#L1"),
            Some((EntityTag::Location, "L1"))
        );
        assert_eq!(
            EntityTag::from_sort_key("WORKSHOP#"),
            Some((EntityTag::Workshop, ""))
        );
        assert_eq!(EntityTag::from_sort_key("USER#1"), None);
    }

    #[test]
    fn test_table_key_display() {
        let key = build_key("C1", EntityTag::Location, "L1");
        assert_eq!(key.to_string(), "C1/LOCATION#L1");
    }
}
