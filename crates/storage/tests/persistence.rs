use std::fs;
use std::sync::Arc;

use hbnb_core::Entity;
use hbnb_models::{City, EntityKind, Place, User};
use hbnb_storage::{InMemoryBackend, Store, StorageConfig};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> StorageConfig {
    StorageConfig::new(dir.path().join("file.json"))
}

fn read_document(config: &StorageConfig) -> Map<String, Value> {
    let bytes = fs::read(&config.file_path).expect("snapshot file should exist");
    match serde_json::from_slice(&bytes).expect("snapshot should be valid JSON") {
        Value::Object(document) => document,
        other => panic!("expected object document, got {other}"),
    }
}

#[test]
fn missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let store = Store::open(&config).unwrap();
    assert!(store.is_empty());
    assert!(!config.file_path.exists());
}

#[test]
fn city_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let mut initial = Map::new();
    initial.insert("name".to_string(), json!("San Francisco"));
    initial.insert("state_id".to_string(), json!("S1"));

    let id = {
        let mut store = Store::open(&config).unwrap();
        store.create(Some("City"), initial).unwrap()
    };

    let store = Store::open(&config).unwrap();
    let keys: Vec<&str> = store.all().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![format!("City.{id}")]);

    let city = store
        .show(Some("City"), Some(id.as_str()))
        .unwrap()
        .downcast_ref::<City>()
        .unwrap();
    assert_eq!(city.name, "San Francisco");
    assert_eq!(city.state_id, "S1");
}

#[test]
fn on_disk_document_shape() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let mut store = Store::open(&config).unwrap();

    let user_id = store.create(Some("User"), Map::new()).unwrap();
    let place_id = store.create(Some("Place"), Map::new()).unwrap();
    store
        .update(
            Some("Place"),
            Some(place_id.as_str()),
            Some("amenity_ids"),
            Some(json!(["a1", "a2"])),
        )
        .unwrap();

    let document = read_document(&config);
    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![format!("User.{user_id}"), format!("Place.{place_id}")]
    );

    let user = &document[&format!("User.{user_id}")];
    assert_eq!(user["__class__"], json!("User"));
    assert_eq!(user["id"], json!(user_id.as_str()));
    let created = user["created_at"].as_str().unwrap();
    assert_eq!(created.len(), "2017-09-28T21:03:54.052298".len());
    assert_eq!(&created[10..11], "T");

    let place = &document[&format!("Place.{place_id}")];
    assert_eq!(place["amenity_ids"], json!(["a1", "a2"]));
    assert_eq!(place["number_rooms"], json!(0));
    assert_eq!(place["latitude"], json!(0.0));
}

#[test]
fn destroy_is_persisted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let mut store = Store::open(&config).unwrap();
    let keep = store.create(Some("State"), Map::new()).unwrap();
    let gone = store.create(Some("State"), Map::new()).unwrap();
    store.destroy(Some("State"), Some(gone.as_str())).unwrap();

    let reopened = Store::open(&config).unwrap();
    assert_eq!(reopened.count(Some("State")).unwrap(), 1);
    assert!(reopened.find(EntityKind::State, keep.as_str()).is_some());
    assert!(reopened.find(EntityKind::State, gone.as_str()).is_none());
}

#[test]
fn reload_round_trips_every_record() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let mut store = Store::open(&config).unwrap();
    for kind in EntityKind::ALL {
        store.insert_new(kind, Map::new()).unwrap();
    }
    let mut place = Place::new();
    place.latitude = 37.7749;
    place.price_by_night = 120;
    store.register(place.into());
    store.save().unwrap();

    let reopened = Store::open(&config).unwrap();
    assert_eq!(reopened.registry(), store.registry());
}

#[test]
fn mismatched_discriminator_fails_whole_load() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let good = User::new();
    let bad = City::new();
    let mut bad_fields = bad.to_fields().unwrap();
    bad_fields.insert("__class__".to_string(), json!("State"));

    let mut document = Map::new();
    document.insert(good.key(), Value::Object(good.to_fields().unwrap()));
    document.insert(bad.key(), Value::Object(bad_fields));
    fs::write(&config.file_path, serde_json::to_vec(&document).unwrap()).unwrap();

    let err = Store::open(&config).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn corrupt_file_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(&config.file_path, b"{\"User.1\": ").unwrap();

    let err = Store::open(&config).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path().join("nested").join("data").join("file.json"));

    let mut store = Store::open(&config).unwrap();
    store.create(Some("Amenity"), Map::new()).unwrap();

    assert!(config.file_path.exists());
    assert_eq!(Store::open(&config).unwrap().len(), 1);
}

proptest! {
    /// Coordinates come back bit-for-bit after a save and a fresh load.
    #[test]
    fn coordinates_survive_save_and_load(
        latitude in -90.0f64..90.0,
        longitude in -180.0f64..180.0,
    ) {
        let backend = Arc::new(InMemoryBackend::new());
        let mut store = Store::new(backend.clone());
        let mut place = Place::new();
        place.latitude = latitude;
        place.longitude = longitude;
        let id = place.id().to_string();
        store.register(place.into());
        store.save().unwrap();

        let mut reloaded = Store::new(backend);
        reloaded.load().unwrap();
        let place = reloaded
            .find(EntityKind::Place, &id)
            .and_then(|r| r.downcast_ref::<Place>())
            .unwrap();
        prop_assert_eq!(place.latitude.to_bits(), latitude.to_bits());
        prop_assert_eq!(place.longitude.to_bits(), longitude.to_bits());
        prop_assert_eq!(reloaded.registry(), store.registry());
    }
}
