//! Attribute conversion functions.
//!
//! Pure functions for converting between attribute maps and stored records.
//! These are testable in isolation without DynamoDB access.
//!
//! Formats: dates `YYYY-MM-DD`, times `HH:MM:SS`, timestamps ISO local
//! without zone, durations as numbers. Absent optionals are omitted.

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use workshops_core::entity::{LocationDto, WorkshopDto};
use workshops_core::keys::{EntityTag, TableKey, PARTITION_KEY, SORT_KEY};
use workshops_core::storage::StoreError;

use super::Item;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Conversion between a stored record and a table row.
pub trait ItemCodec: Sized {
    fn to_item(&self) -> Item;

    fn from_item(item: &Item) -> Result<Self, StoreError>;
}

// ============================================================================
// Workshop conversions
// ============================================================================

impl ItemCodec for WorkshopDto {
    fn to_item(&self) -> Item {
        let mut item = Item::new();

        // Keys
        insert_key(&mut item, &self.partition_key, &self.sort_key);

        // Data
        insert_optional_string(&mut item, "locationId", self.location_id.as_deref());
        insert_optional_string(&mut item, "organizerId", self.organizer_id.as_deref());
        item.insert("name".to_string(), AttributeValue::S(self.name.clone()));
        item.insert(
            "category".to_string(),
            AttributeValue::S(self.category.clone()),
        );
        insert_optional_string(&mut item, "description", self.description.as_deref());
        item.insert(
            "workshopDate".to_string(),
            AttributeValue::S(self.workshop_date.format(DATE_FORMAT).to_string()),
        );
        item.insert(
            "startTime".to_string(),
            AttributeValue::S(self.start_time.format(TIME_FORMAT).to_string()),
        );
        item.insert(
            "duration".to_string(),
            AttributeValue::N(self.duration.to_string()),
        );

        // Audit
        insert_optional_datetime(&mut item, "createdOn", self.created_on);
        insert_optional_datetime(&mut item, "lastUpdatedOn", self.last_updated_on);

        item
    }

    fn from_item(item: &Item) -> Result<Self, StoreError> {
        Ok(Self {
            partition_key: get_string(item, PARTITION_KEY)?,
            sort_key: get_sort_key(item, EntityTag::Workshop)?,
            location_id: get_optional_string(item, "locationId"),
            organizer_id: get_optional_string(item, "organizerId"),
            name: get_string(item, "name")?,
            category: get_string(item, "category")?,
            description: get_optional_string(item, "description"),
            workshop_date: get_date(item, "workshopDate")?,
            start_time: get_time(item, "startTime")?,
            duration: get_u32(item, "duration")?,
            created_on: get_optional_datetime(item, "createdOn")?,
            last_updated_on: get_optional_datetime(item, "lastUpdatedOn")?,
        })
    }
}

// ============================================================================
// Location conversions
// ============================================================================

impl ItemCodec for LocationDto {
    fn to_item(&self) -> Item {
        let mut item = Item::new();

        insert_key(&mut item, &self.partition_key, &self.sort_key);

        item.insert("name".to_string(), AttributeValue::S(self.name.clone()));
        insert_optional_string(&mut item, "street", self.street.as_deref());
        insert_optional_string(&mut item, "city", self.city.as_deref());
        insert_optional_string(&mut item, "state", self.state.as_deref());
        insert_optional_string(&mut item, "zipCode", self.zip_code.as_deref());

        insert_optional_datetime(&mut item, "createdOn", self.created_on);
        insert_optional_datetime(&mut item, "lastUpdatedOn", self.last_updated_on);

        item
    }

    fn from_item(item: &Item) -> Result<Self, StoreError> {
        Ok(Self {
            partition_key: get_string(item, PARTITION_KEY)?,
            sort_key: get_sort_key(item, EntityTag::Location)?,
            name: get_string(item, "name")?,
            street: get_optional_string(item, "street"),
            city: get_optional_string(item, "city"),
            state: get_optional_string(item, "state"),
            zip_code: get_optional_string(item, "zipCode"),
            created_on: get_optional_datetime(item, "createdOn")?,
            last_updated_on: get_optional_datetime(item, "lastUpdatedOn")?,
        })
    }
}

// ============================================================================
// Key helpers
// ============================================================================

/// Builds the key-only attribute map used by GetItem and DeleteItem.
#[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
pub fn key_to_item(key: &TableKey) -> Item {
    let mut item = Item::new();
    insert_key(&mut item, &key.partition_key, &key.sort_key);
    item
}

/// Reads the table key out of a row.
pub fn item_key(item: &Item) -> Result<TableKey, StoreError> {
    Ok(TableKey {
        partition_key: get_string(item, PARTITION_KEY)?,
        sort_key: get_string(item, SORT_KEY)?,
    })
}

/// Get the sort key of a row that must belong to `tag` and carry an id.
fn get_sort_key(item: &Item, tag: EntityTag) -> Result<String, StoreError> {
    let sort_key = get_string(item, SORT_KEY)?;
    match EntityTag::from_sort_key(&sort_key) {
        Some((found, id)) if found == tag && !id.is_empty() => Ok(sort_key),
        _ => Err(StoreError::InvalidData(format!(
            "Sort key {sort_key} is not a {tag} row"
        ))),
    }
}

fn insert_key(item: &mut Item, partition_key: &str, sort_key: &str) {
    item.insert(
        PARTITION_KEY.to_string(),
        AttributeValue::S(partition_key.to_string()),
    );
    item.insert(SORT_KEY.to_string(), AttributeValue::S(sort_key.to_string()));
}

// ============================================================================
// Attribute helpers
// ============================================================================

fn insert_optional_string(item: &mut Item, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        item.insert(key.to_string(), AttributeValue::S(value.to_string()));
    }
}

fn insert_optional_datetime(item: &mut Item, key: &str, value: Option<NaiveDateTime>) {
    if let Some(value) = value {
        item.insert(
            key.to_string(),
            AttributeValue::S(value.format(DATETIME_FORMAT).to_string()),
        );
    }
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required number attribute as `u32`.
fn get_u32(item: &Item, key: &str) -> Result<u32, StoreError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {}", key)))?;
    n.parse()
        .map_err(|e| StoreError::InvalidData(format!("Invalid number {}: {}", key, e)))
}

/// Get a required date attribute (YYYY-MM-DD format).
fn get_date(item: &Item, key: &str) -> Result<NaiveDate, StoreError> {
    let s = get_string(item, key)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| StoreError::InvalidData(format!("Invalid date {}: {}", key, e)))
}

/// Get a required time attribute (HH:MM:SS format).
fn get_time(item: &Item, key: &str) -> Result<NaiveTime, StoreError> {
    let s = get_string(item, key)?;
    NaiveTime::parse_from_str(&s, TIME_FORMAT)
        .map_err(|e| StoreError::InvalidData(format!("Invalid time {}: {}", key, e)))
}

/// Get an optional datetime attribute (ISO local format).
fn get_optional_datetime(item: &Item, key: &str) -> Result<Option<NaiveDateTime>, StoreError> {
    get_optional_string(item, key)
        .map(|s| {
            NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
                .map_err(|e| StoreError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
        })
        .transpose()
}
