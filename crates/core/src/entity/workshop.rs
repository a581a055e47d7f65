use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::keys::{strip_tag, with_tag, EntityTag, TableKey};
use crate::serde::deserialize_optional_string;

use super::{tag_reference, untag_reference, Entity, StoredRecord};

/// A scheduled workshop, as seen by callers.
///
/// Ids are bare: `workshop_id`, `location_id` and `organizer_id` never carry
/// an entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub workshop_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub organizer_id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub workshop_date: NaiveDate,
    pub start_time: NaiveTime,
    /// Length in minutes.
    pub duration: u32,
    #[serde(default)]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_updated_on: Option<NaiveDateTime>,
}

impl Workshop {
    /// Creates a workshop without id, references or audit stamps.
    pub fn new(
        client_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        workshop_date: NaiveDate,
        start_time: NaiveTime,
        duration: u32,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            workshop_id: String::new(),
            location_id: None,
            organizer_id: None,
            name: name.into(),
            category: category.into(),
            description: None,
            workshop_date,
            start_time,
            duration,
            created_on: None,
            last_updated_on: None,
        }
    }

    /// Sets the location this workshop takes place at.
    pub fn with_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Sets the organizer running this workshop.
    pub fn with_organizer(mut self, organizer_id: impl Into<String>) -> Self {
        self.organizer_id = Some(organizer_id.into());
        self
    }

    /// Sets the description for this workshop.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific id for this workshop (useful for testing).
    pub fn with_id(mut self, workshop_id: impl Into<String>) -> Self {
        self.workshop_id = workshop_id.into();
        self
    }
}

/// One workshop row in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopDto {
    pub partition_key: String,
    /// `WORKSHOP#<id>`
    pub sort_key: String,
    /// `LOCATION#<id>`
    pub location_id: Option<String>,
    /// `ORGANIZER#<id>`
    pub organizer_id: Option<String>,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub workshop_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration: u32,
    pub created_on: Option<NaiveDateTime>,
    pub last_updated_on: Option<NaiveDateTime>,
}

impl StoredRecord for WorkshopDto {
    fn key(&self) -> TableKey {
        TableKey {
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone(),
        }
    }
}

impl Entity for Workshop {
    const KIND: &'static str = "Workshop";
    const TAG: EntityTag = EntityTag::Workshop;
    type Stored = WorkshopDto;

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn id(&self) -> &str {
        &self.workshop_id
    }

    fn set_key(&mut self, client_id: String, id: String) {
        self.client_id = client_id;
        self.workshop_id = id;
    }

    fn created_on(&self) -> Option<NaiveDateTime> {
        self.created_on
    }

    fn set_audit(&mut self, created_on: Option<NaiveDateTime>, last_updated_on: NaiveDateTime) {
        self.created_on = created_on;
        self.last_updated_on = Some(last_updated_on);
    }

    fn to_stored(&self) -> WorkshopDto {
        WorkshopDto {
            partition_key: self.client_id.clone(),
            sort_key: with_tag(Self::TAG, &self.workshop_id),
            location_id: tag_reference(EntityTag::Location, self.location_id.as_deref()),
            organizer_id: tag_reference(EntityTag::Organizer, self.organizer_id.as_deref()),
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            workshop_date: self.workshop_date,
            start_time: self.start_time,
            duration: self.duration,
            created_on: self.created_on,
            last_updated_on: self.last_updated_on,
        }
    }

    fn from_stored(stored: WorkshopDto) -> Self {
        Self {
            workshop_id: strip_tag(&stored.sort_key, Self::TAG).to_string(),
            location_id: untag_reference(EntityTag::Location, stored.location_id.as_deref()),
            organizer_id: untag_reference(EntityTag::Organizer, stored.organizer_id.as_deref()),
            client_id: stored.partition_key,
            name: stored.name,
            category: stored.category,
            description: stored.description,
            workshop_date: stored.workshop_date,
            start_time: stored.start_time,
            duration: stored.duration,
            created_on: stored.created_on,
            last_updated_on: stored.last_updated_on,
        }
    }
}
