//! Entity kinds stored in the shared table and their stored/domain mappers.
//!
//! Each kind has two shapes:
//!
//! - the domain record (`Workshop`, `Location`), tag-free and caller facing;
//! - the stored record (`WorkshopDto`, `LocationDto`), one table row with
//!   every id carrying its entity tag.
//!
//! The [`Entity`] implementations are the only code that applies or removes
//! tag prefixes.

mod location;
mod workshop;

pub use location::{Location, LocationDto};
pub use workshop::{Workshop, WorkshopDto};

use chrono::NaiveDateTime;

use crate::keys::{strip_tag, with_tag, EntityTag, TableKey};

/// A domain record that lives in the shared table.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable kind, e.g. `Workshop`.
    const KIND: &'static str;

    /// Tag prefixing the sort key of every row of this kind.
    const TAG: EntityTag;

    /// Stored (tag-prefixed) form of the record.
    type Stored: StoredRecord;

    /// Tenant the record belongs to (the partition key).
    fn client_id(&self) -> &str;

    /// Bare id of the record.
    fn id(&self) -> &str;

    /// Sets the tenant and bare id.
    fn set_key(&mut self, client_id: String, id: String);

    fn created_on(&self) -> Option<NaiveDateTime>;

    /// Sets both audit timestamps.
    fn set_audit(&mut self, created_on: Option<NaiveDateTime>, last_updated_on: NaiveDateTime);

    /// Domain to stored: prepends every tag.
    fn to_stored(&self) -> Self::Stored;

    /// Stored to domain: strips every tag.
    fn from_stored(stored: Self::Stored) -> Self;
}

/// A stored row, addressable by its table key.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    fn key(&self) -> TableKey;
}

/// Tags an optional foreign-key id. Blank ids are treated as absent.
fn tag_reference(tag: EntityTag, id: Option<&str>) -> Option<String> {
    id.filter(|id| !id.is_empty()).map(|id| with_tag(tag, id))
}

/// Strips the tag from an optional stored foreign key. Blank values are treated as absent.
fn untag_reference(tag: EntityTag, value: Option<&str>) -> Option<String> {
    value
        .map(|value| strip_tag(value, tag))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_reference() {
        assert_eq!(
            tag_reference(EntityTag::Location, Some("L1")).as_deref(),
            Some("LOCATION#L1")
        );
        assert_eq!(tag_reference(EntityTag::Location, Some("")), None);
        assert_eq!(tag_reference(EntityTag::Location, None), None);
    }

    #[test]
    fn test_untag_reference() {
        assert_eq!(
            untag_reference(EntityTag::Organizer, Some("ORGANIZER#O1")).as_deref(),
            Some("O1")
        );
        assert_eq!(untag_reference(EntityTag::Organizer, Some("ORGANIZER#")), None);
        assert_eq!(untag_reference(EntityTag::Organizer, Some("")), None);
        assert_eq!(untag_reference(EntityTag::Organizer, None), None);
    }
}
