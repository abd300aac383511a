use stockroom_core::{Inventory, Product, StoreConfig};
use tempfile::TempDir;

fn inventory() -> (TempDir, Inventory) {
    let dir = tempfile::tempdir().unwrap();
    let inventory = Inventory::new(dir.path().join("inventory.db"));
    (dir, inventory)
}

#[test]
fn create_update_delete_lifecycle() {
    let (_dir, inventory) = inventory();
    let product = Product::original(1, "mouse", "electronics", 19.99, 10, "new").unwrap();

    let created = inventory.create(&product);
    assert!(created.ok, "{}", created.message);

    let loaded = inventory.read_by_id(1).unwrap();
    assert_eq!(loaded, product);
    assert_eq!(loaded.status(), Some("new"));

    let updated = inventory.update_price(1, 24.99);
    assert!(updated.ok, "{}", updated.message);
    let loaded = inventory.read_by_id(1).unwrap();
    assert_eq!(loaded.price(), 24.99);
    assert_eq!(loaded.status(), Some("new"));

    let deleted = inventory.delete(1);
    assert!(deleted.ok, "{}", deleted.message);
    assert!(inventory.read_by_id(1).is_none());
}

#[test]
fn duplicate_create_is_reported_not_raised() {
    let (_dir, inventory) = inventory();
    let first = Product::new(1, "desk", "furniture", 120.0, 1).unwrap();
    assert!(inventory.create(&first).ok);

    let clash = Product::original(1, "chair", "furniture", 40.0, 4, "new").unwrap();
    let outcome = inventory.create(&clash);
    assert!(!outcome.ok);
    assert!(outcome.message.contains("already exists"));
    assert_eq!(inventory.read_by_id(1).unwrap(), first);
}

#[test]
fn missing_ids_are_no_ops() {
    let (_dir, inventory) = inventory();

    assert!(inventory.read_by_id(3).is_none());

    let updated = inventory.update_price(3, 5.0);
    assert!(!updated.ok);
    assert!(updated.message.contains("not found"));

    let deleted = inventory.delete(3);
    assert!(!deleted.ok);
    assert_eq!(deleted.id, 3);
    assert!(inventory.list_all().is_empty());
}

#[test]
fn list_all_returns_every_variant() {
    let (_dir, inventory) = inventory();
    inventory.create(&Product::non_original(2, "toner", "office", 9.0, 2, "replica").unwrap());
    inventory.create(&Product::original(1, "mouse", "electronics", 19.99, 10, "new").unwrap());

    let products = inventory.list_all();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].status(), Some("new"));
    assert_eq!(products[1].origin(), Some("replica"));
}

#[test]
fn unreachable_store_yields_benign_results() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = Inventory::new(dir.path().join("missing").join("inventory.db"));
    let product = Product::new(1, "desk", "furniture", 120.0, 1).unwrap();

    assert!(!inventory.create(&product).ok);
    assert!(inventory.read_by_id(1).is_none());
    assert!(!inventory.update_price(1, 2.0).ok);
    assert!(!inventory.delete(1).ok);
    assert!(inventory.list_all().is_empty());
}

#[test]
fn from_config_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("configured.db");
    let db_path_str = db_path.to_str().unwrap().to_string();
    let config = StoreConfig::from_lookup(|key| {
        (key == "STOCKROOM_DB_PATH").then(|| db_path_str.clone())
    })
    .unwrap();

    let inventory = Inventory::from_config(&config);
    assert_eq!(inventory.db_path(), db_path.as_path());
}
