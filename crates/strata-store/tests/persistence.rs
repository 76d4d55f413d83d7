//! Persistent engine behavior: values survive reopen, domains map to
//! separate database files, and the encrypted domain is sealed at rest.

use strata_store::{Domain, SecretKey, Storage, StorageConfig, StoreError};

fn keyed_config(root: &std::path::Path) -> StorageConfig {
    StorageConfig::new(root).with_encryption_key(SecretKey::new([3; 32]))
}

#[test]
fn values_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert!(storage.put(Domain::User, "age", 30_i32));
    assert!(storage.put(Domain::Config, "greeting", "hello"));
    assert!(storage.put(Domain::General, "ratio", 0.5_f64));
    drop(storage);

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert_eq!(storage.get(Domain::User, "age", 0_i32), 30);
    assert_eq!(storage.get(Domain::Config, "greeting", String::new()), "hello");
    assert_eq!(storage.get(Domain::General, "ratio", 0.0_f64), 0.5);
}

#[test]
fn encrypted_values_round_trip_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert!(storage.put(Domain::Encrypted, "token", "sealed-value"));
    drop(storage);

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert_eq!(
        storage.get(Domain::Encrypted, "token", String::new()),
        "sealed-value"
    );
}

#[test]
fn wrong_key_degrades_to_the_default() {
    let dir = tempfile::tempdir().unwrap();

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert!(storage.put(Domain::Encrypted, "token", "sealed-value"));
    drop(storage);

    let other_key = StorageConfig::new(dir.path()).with_encryption_key(SecretKey::new([4; 32]));
    let storage = Storage::open(other_key).unwrap();
    assert_eq!(
        storage.get(Domain::Encrypted, "token", String::from("d")),
        "d"
    );
    let err = storage
        .try_get::<String>(Domain::Encrypted, "token")
        .unwrap_err();
    assert!(matches!(err, StoreError::Codec(_)));
}

#[test]
fn domains_map_to_separate_database_files() {
    let dir = tempfile::tempdir().unwrap();

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    storage.put(Domain::User, "k", 1_i32);
    storage.put(Domain::Config, "k", 2_i32);

    assert!(dir.path().join("user_storage.redb").is_file());
    assert!(dir.path().join("config_storage.redb").is_file());
    assert!(!dir.path().join("cache_storage.redb").exists());
}

#[test]
fn clear_all_on_disk_only_affects_its_domain() {
    let dir = tempfile::tempdir().unwrap();

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    storage.put(Domain::Cache, "a", 1_i32);
    storage.put(Domain::User, "a", 2_i32);
    storage.clear_all(Domain::Cache);
    drop(storage);

    let storage = Storage::open(keyed_config(dir.path())).unwrap();
    assert!(storage.list_keys(Domain::Cache).is_empty());
    assert_eq!(storage.get(Domain::User, "a", 0_i32), 2);
}
