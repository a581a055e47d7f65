use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::keys::{strip_tag, with_tag, EntityTag, TableKey};
use crate::serde::deserialize_optional_string;

use super::{Entity, StoredRecord};

/// A venue workshops are held at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub location_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_updated_on: Option<NaiveDateTime>,
}

impl Location {
    pub fn new(client_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            location_id: String::new(),
            name: name.into(),
            street: None,
            city: None,
            state: None,
            zip_code: None,
            created_on: None,
            last_updated_on: None,
        }
    }

    /// Sets the postal address.
    pub fn with_address(
        mut self,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        self.street = Some(street.into());
        self.city = Some(city.into());
        self.state = Some(state.into());
        self.zip_code = Some(zip_code.into());
        self
    }
}

/// One location row in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDto {
    pub partition_key: String,
    /// `LOCATION#<id>`
    pub sort_key: String,
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_on: Option<NaiveDateTime>,
    pub last_updated_on: Option<NaiveDateTime>,
}

impl StoredRecord for LocationDto {
    fn key(&self) -> TableKey {
        TableKey {
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone(),
        }
    }
}

impl Entity for Location {
    const KIND: &'static str = "Location";
    const TAG: EntityTag = EntityTag::Location;
    type Stored = LocationDto;

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn id(&self) -> &str {
        &self.location_id
    }

    fn set_key(&mut self, client_id: String, id: String) {
        self.client_id = client_id;
        self.location_id = id;
    }

    fn created_on(&self) -> Option<NaiveDateTime> {
        self.created_on
    }

    fn set_audit(&mut self, created_on: Option<NaiveDateTime>, last_updated_on: NaiveDateTime) {
        self.created_on = created_on;
        self.last_updated_on = Some(last_updated_on);
    }

    fn to_stored(&self) -> LocationDto {
        LocationDto {
            partition_key: self.client_id.clone(),
            sort_key: with_tag(Self::TAG, &self.location_id),
            name: self.name.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            created_on: self.created_on,
            last_updated_on: self.last_updated_on,
        }
    }

    fn from_stored(stored: LocationDto) -> Self {
        Self {
            location_id: strip_tag(&stored.sort_key, Self::TAG).to_string(),
            client_id: stored.partition_key,
            name: stored.name,
            street: stored.street,
            city: stored.city,
            state: stored.state,
            zip_code: stored.zip_code,
            created_on: stored.created_on,
            last_updated_on: stored.last_updated_on,
        }
    }
}
