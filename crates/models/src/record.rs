//! Closed union over every record type, and the type registration table.

use serde_json::{Map, Value};

use hbnb_core::{DomainError, DomainResult, Entity, EntityId, EntityMeta};

use crate::{Amenity, BaseModel, City, Place, Review, State, User};

/// Registered record types.
///
/// This is the single resolution point from a type name (shell input or
/// persisted discriminator) to a constructor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::BaseModel,
        EntityKind::User,
        EntityKind::State,
        EntityKind::City,
        EntityKind::Amenity,
        EntityKind::Place,
        EntityKind::Review,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::BaseModel => BaseModel::TYPE_NAME,
            EntityKind::User => User::TYPE_NAME,
            EntityKind::State => State::TYPE_NAME,
            EntityKind::City => City::TYPE_NAME,
            EntityKind::Amenity => Amenity::TYPE_NAME,
            EntityKind::Place => Place::TYPE_NAME,
            EntityKind::Review => Review::TYPE_NAME,
        }
    }

    /// Resolve a type name. Names are case-sensitive.
    pub fn resolve(name: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DomainError::unknown_type(name))
    }

    /// A new record with fresh identity and default fields.
    pub fn fresh(self) -> Record {
        match self {
            EntityKind::BaseModel => Record::BaseModel(BaseModel::new()),
            EntityKind::User => Record::User(User::new()),
            EntityKind::State => Record::State(State::new()),
            EntityKind::City => Record::City(City::new()),
            EntityKind::Amenity => Record::Amenity(Amenity::new()),
            EntityKind::Place => Record::Place(Place::new()),
            EntityKind::Review => Record::Review(Review::new()),
        }
    }

    /// Rebuild a record of this kind from its serialized mapping.
    pub fn reconstruct(self, fields: Map<String, Value>) -> DomainResult<Record> {
        Ok(match self {
            EntityKind::BaseModel => Record::BaseModel(BaseModel::from_fields(fields)?),
            EntityKind::User => Record::User(User::from_fields(fields)?),
            EntityKind::State => Record::State(State::from_fields(fields)?),
            EntityKind::City => Record::City(City::from_fields(fields)?),
            EntityKind::Amenity => Record::Amenity(Amenity::from_fields(fields)?),
            EntityKind::Place => Record::Place(Place::from_fields(fields)?),
            EntityKind::Review => Record::Review(Review::from_fields(fields)?),
        })
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Any live record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    BaseModel(BaseModel),
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
    Review(Review),
}

macro_rules! with_entity {
    ($record:expr, $entity:ident => $body:expr) => {
        match $record {
            Record::BaseModel($entity) => $body,
            Record::User($entity) => $body,
            Record::State($entity) => $body,
            Record::City($entity) => $body,
            Record::Amenity($entity) => $body,
            Record::Place($entity) => $body,
            Record::Review($entity) => $body,
        }
    };
}

impl Record {
    /// Fresh record of `kind` with `initial` fields applied through the
    /// schema setter. Fails without side effects if any field is rejected.
    pub fn create(kind: EntityKind, initial: Map<String, Value>) -> DomainResult<Self> {
        let mut record = kind.fresh();
        for (name, value) in initial {
            record.set_field(&name, value)?;
        }
        Ok(record)
    }

    /// Rebuild from a serialized mapping, resolving the type through its
    /// embedded discriminator.
    pub fn reconstruct(fields: Map<String, Value>) -> DomainResult<Self> {
        let kind = match fields.get(hbnb_core::CLASS_FIELD) {
            Some(Value::String(name)) => EntityKind::resolve(name)?,
            _ => {
                return Err(DomainError::format(format!(
                    "record has no {} discriminator",
                    hbnb_core::CLASS_FIELD
                )));
            }
        };
        kind.reconstruct(fields)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::BaseModel(_) => EntityKind::BaseModel,
            Record::User(_) => EntityKind::User,
            Record::State(_) => EntityKind::State,
            Record::City(_) => EntityKind::City,
            Record::Amenity(_) => EntityKind::Amenity,
            Record::Place(_) => EntityKind::Place,
            Record::Review(_) => EntityKind::Review,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn meta(&self) -> &EntityMeta {
        with_entity!(self, e => e.meta())
    }

    pub fn id(&self) -> &EntityId {
        self.meta().id()
    }

    pub fn key(&self) -> String {
        with_entity!(self, e => e.key())
    }

    pub fn touch(&mut self) -> DomainResult<()> {
        with_entity!(self, e => e.touch())
    }

    pub fn set_field(&mut self, name: &str, value: Value) -> DomainResult<()> {
        with_entity!(self, e => e.set_field(name, value))
    }

    /// Apply several fields atomically: either all are set or none.
    pub fn set_fields(&mut self, fields: Map<String, Value>) -> DomainResult<()> {
        let mut staged = self.clone();
        for (name, value) in fields {
            staged.set_field(&name, value)?;
        }
        *self = staged;
        Ok(())
    }

    pub fn to_fields(&self) -> DomainResult<Map<String, Value>> {
        with_entity!(self, e => e.to_fields())
    }

    pub fn describe(&self) -> String {
        with_entity!(self, e => e.describe())
    }

    pub fn downcast_ref<E: Variant>(&self) -> Option<&E> {
        E::from_record(self)
    }
}

impl core::fmt::Display for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A concrete record type that is one arm of [`Record`].
pub trait Variant: Entity + Into<Record> {
    const KIND: EntityKind;

    fn from_record(record: &Record) -> Option<&Self>;
}

macro_rules! impl_variant {
    ($t:ident) => {
        impl From<$t> for Record {
            fn from(value: $t) -> Self {
                Record::$t(value)
            }
        }

        impl Variant for $t {
            const KIND: EntityKind = EntityKind::$t;

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$t(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_variant!(BaseModel);
impl_variant!(User);
impl_variant!(State);
impl_variant!(City);
impl_variant!(Amenity);
impl_variant!(Place);
impl_variant!(Review);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_covers_every_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::resolve(kind.name()).unwrap(), kind);
            assert_eq!(kind.fresh().kind(), kind);
        }
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let err = EntityKind::resolve("MyModel").unwrap_err();
        assert_eq!(err, DomainError::UnknownType("MyModel".to_string()));
        assert!(EntityKind::resolve("user").is_err());
    }

    #[test]
    fn create_applies_initial_fields() {
        let mut initial = Map::new();
        initial.insert("name".to_string(), json!("San Francisco"));
        initial.insert("state_id".to_string(), json!("S1"));

        let record = Record::create(EntityKind::City, initial).unwrap();
        let city = record.downcast_ref::<City>().unwrap();
        assert_eq!(city.name, "San Francisco");
        assert_eq!(city.state_id, "S1");
        assert_eq!(city.meta().created_at(), city.meta().updated_at());
    }

    #[test]
    fn set_fields_is_all_or_nothing() {
        let mut record = EntityKind::Place.fresh();
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Loft"));
        fields.insert("max_guest".to_string(), json!("lots"));

        assert!(record.set_fields(fields).is_err());
        assert_eq!(record.downcast_ref::<Place>().unwrap().name, "");
    }

    #[test]
    fn reconstruct_uses_embedded_discriminator() {
        let original: Record = Review::new().into();
        let back = Record::reconstruct(original.to_fields().unwrap()).unwrap();
        assert_eq!(back, original);

        let mut fields = original.to_fields().unwrap();
        fields.insert("__class__".to_string(), json!("Ghost"));
        assert!(matches!(
            Record::reconstruct(fields).unwrap_err(),
            DomainError::UnknownType(_)
        ));
    }

    #[test]
    fn variants_downcast_only_to_their_own_kind() {
        let record: Record = City::new().into();
        assert_eq!(record.kind(), City::KIND);
        assert!(record.downcast_ref::<City>().is_some());
        assert!(record.downcast_ref::<State>().is_none());
        assert_eq!(User::KIND.fresh().kind(), EntityKind::User);
    }

    #[test]
    fn key_is_type_name_and_id() {
        let record: Record = State::new().into();
        assert_eq!(record.key(), format!("State.{}", record.id()));
    }
}
