use permstore::{Permission, PermissionedStore, StoreError, WriteOutcome};
use serde_json::{json, Map};

fn create_declared_store() -> PermissionedStore {
    let mut store = PermissionedStore::new();
    store.declare("open", json!("anyone"), Permission::ReadWrite);
    store.declare("published", json!(true), Permission::ReadOnly);
    store.declare("inbox", json!([]), Permission::WriteOnly);
    store.declare("secret", json!("classified"), Permission::None);
    store
}

#[test]
fn test_tag_truth_table_through_read_and_write() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = create_declared_store();

    // rw: both directions permitted.
    assert!(store.allowed_to_read("open"));
    assert!(store.allowed_to_write("open"));
    assert_eq!(store.read("open").unwrap(), Some(&json!("anyone")));
    assert_eq!(
        store.write("open", json!("still anyone")).unwrap(),
        WriteOutcome::Replaced(json!("still anyone"))
    );

    // r: readable, but writing a declared-read-only key fails even though the
    // entry exists.
    assert!(store.allowed_to_read("published"));
    assert!(!store.allowed_to_write("published"));
    assert_eq!(store.read("published").unwrap(), Some(&json!(true)));
    assert_eq!(
        store.write("published", json!(false)),
        Err(StoreError::NoWriteAccess("published".to_string()))
    );

    // w: writable, unreadable.
    assert!(!store.allowed_to_read("inbox"));
    assert!(store.allowed_to_write("inbox"));
    assert_eq!(
        store.read("inbox"),
        Err(StoreError::NoReadAccess("inbox".to_string()))
    );
    assert_eq!(
        store.write("inbox", json!(["mail"])).unwrap(),
        WriteOutcome::Replaced(json!(["mail"]))
    );

    // none: both denied.
    assert!(!store.allowed_to_read("secret"));
    assert!(!store.allowed_to_write("secret"));
    assert_eq!(
        store.read("secret"),
        Err(StoreError::NoReadAccess("secret".to_string()))
    );
    assert_eq!(
        store.write("secret", json!(5)),
        Err(StoreError::NoWriteAccess("secret".to_string()))
    );
}

#[test]
fn test_no_access_key_scenario() {
    let mut store = PermissionedStore::new();
    assert_eq!(store.default_policy(), Permission::ReadWrite);
    store.declare("secret", json!("classified"), Permission::None);

    assert_eq!(
        store.read("secret"),
        Err(StoreError::NoReadAccess("secret".to_string()))
    );
    assert_eq!(
        store.write("secret", json!(5)),
        Err(StoreError::NoWriteAccess("secret".to_string()))
    );

    // A fresh key is unaffected by the declared restriction.
    assert_eq!(store.write("newKey", json!(5)).unwrap(), WriteOutcome::Created);
    assert_eq!(store.permission_of("newKey"), Some(Permission::ReadWrite));
    assert_eq!(store.read("newKey").unwrap(), Some(&json!(5)));
}

#[test]
fn test_bulk_import_then_ordered_enumeration() {
    let mut store = PermissionedStore::new();

    let mut batch = Map::new();
    batch.insert("a".to_string(), json!(1));
    batch.insert("b".to_string(), json!(2));
    store.write_entries(batch);

    assert_eq!(store.entries(), json!({ "entries": [{ "a": 1 }, { "b": 2 }] }));

    // Both keys picked up the default policy.
    for key in ["a", "b"] {
        assert!(store.allowed_to_read(key));
        assert!(store.allowed_to_write(key));
        assert_eq!(store.permission_of(key), Some(Permission::ReadWrite));
    }
}

#[test]
fn test_enumeration_is_idempotent_between_writes() {
    let mut store = create_declared_store();
    store.write("extra", json!({ "nested": [1, 2, 3] })).unwrap();

    let first = store.entries();
    let second = store.entries();
    assert_eq!(first, second);

    // A write in between is the only thing that changes the listing.
    store.write("extra", json!("replaced")).unwrap();
    assert_ne!(store.entries(), first);
}

#[test]
fn test_insertion_order_survives_updates_and_denials() {
    let mut store = PermissionedStore::new();
    store.declare("first", json!(1), Permission::ReadWrite);
    store.declare("second", json!(2), Permission::ReadOnly);
    store.write("third", json!(3)).unwrap();

    // Updating an early key must not move it.
    store.write("first", json!(100)).unwrap();
    // A denied write must not disturb anything.
    assert!(store.write("second", json!(0)).is_err());

    assert_eq!(
        store.entries(),
        json!({ "entries": [{ "first": 100 }, { "second": 2 }, { "third": 3 }] })
    );
    assert_eq!(store.len(), 3);
}

#[test]
fn test_read_of_unknown_key_is_absent_while_write_creates() {
    let mut store = PermissionedStore::new();

    assert_eq!(store.read("ghost").unwrap(), None);
    assert!(!store.contains_key("ghost"));

    assert_eq!(store.write("ghost", json!(null)).unwrap(), WriteOutcome::Created);
    assert!(store.contains_key("ghost"));
    assert_eq!(store.read("ghost").unwrap(), Some(&json!(null)));
}

#[test]
fn test_json_value_domain_round_trips() {
    let mut store = PermissionedStore::new();
    let values = [
        json!(null),
        json!(true),
        json!(42.5),
        json!("text"),
        json!([1, "two", null]),
        json!({ "inner": { "deep": [true] } }),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{}", i);
        store.write(&key, value.clone()).unwrap();
        assert_eq!(store.read(&key).unwrap(), Some(value));
    }
    assert_eq!(store.len(), values.len());
}
