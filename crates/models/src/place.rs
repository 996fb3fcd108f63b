//! Places offered for rent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::field::{to_float, to_id_list, to_integer, to_text};
use hbnb_core::{DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    meta: EntityMeta,
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Ids of `Amenity` records, in insertion order.
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
            city_id: String::new(),
            user_id: String::new(),
            name: String::new(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: Vec::new(),
        }
    }
}

impl Default for Place {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Place {
    const TYPE_NAME: &'static str = "Place";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("city_id"),
        FieldSpec::text("user_id"),
        FieldSpec::text("name"),
        FieldSpec::text("description"),
        FieldSpec::integer("number_rooms"),
        FieldSpec::integer("number_bathrooms"),
        FieldSpec::integer("max_guest"),
        FieldSpec::integer("price_by_night"),
        FieldSpec::float("latitude"),
        FieldSpec::float("longitude"),
        FieldSpec::id_list("amenity_ids"),
    ];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()> {
        let field = spec.name;
        match field {
            "city_id" => self.city_id = to_text(field, value)?,
            "user_id" => self.user_id = to_text(field, value)?,
            "name" => self.name = to_text(field, value)?,
            "description" => self.description = to_text(field, value)?,
            "number_rooms" => self.number_rooms = to_integer(field, value)?,
            "number_bathrooms" => self.number_bathrooms = to_integer(field, value)?,
            "max_guest" => self.max_guest = to_integer(field, value)?,
            "price_by_night" => self.price_by_night = to_integer(field, value)?,
            "latitude" => self.latitude = to_float(field, value)?,
            "longitude" => self.longitude = to_float(field, value)?,
            "amenity_ids" => self.amenity_ids = to_id_list(field, value)?,
            other => return Err(DomainError::unknown_field(Self::TYPE_NAME, other)),
        }
        Ok(())
    }
}

impl core::fmt::Display for Place {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
