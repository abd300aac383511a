use rusqlite::Connection;
use stockroom_core::db::open_db_in_memory;
use stockroom_core::{
    Product, ProductRepository, ProductValidationError, ProductVariant, RepoError,
    SqliteProductRepository,
};

fn count_rows(conn: &Connection, table: &str, id: i64) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1;"),
        [id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_and_get_resolves_each_variant() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProductRepository::new(&mut conn);

    let original = Product::original(1, "mouse", "electronics", 19.99, 10, "new").unwrap();
    let copy = Product::non_original(2, "cartridge", "printing", 8.5, 3, "aftermarket").unwrap();
    let plain = Product::new(3, "desk", "furniture", 120.0, 1).unwrap();

    for product in [&original, &copy, &plain] {
        assert_eq!(repo.create_product(product).unwrap(), product.id());
    }

    assert_eq!(repo.get_product(1).unwrap().unwrap(), original);
    assert_eq!(repo.get_product(2).unwrap().unwrap(), copy);
    assert_eq!(repo.get_product(3).unwrap().unwrap(), plain);
    assert!(repo.get_product(4).unwrap().is_none());
}

#[test]
fn duplicate_create_leaves_existing_rows_untouched() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteProductRepository::new(&mut conn);
        let first = Product::original(1, "mouse", "electronics", 19.99, 10, "new").unwrap();
        repo.create_product(&first).unwrap();

        let clash = Product::non_original(1, "keyboard", "electronics", 5.0, 2, "clone").unwrap();
        let err = repo.create_product(&clash).unwrap_err();
        assert!(matches!(err, RepoError::AlreadyExists(1)));

        let loaded = repo.get_product(1).unwrap().unwrap();
        assert_eq!(loaded.name(), "mouse");
        assert_eq!(loaded.status(), Some("new"));
    }

    assert_eq!(count_rows(&conn, "non_original_variant", 1), 0);
    assert_eq!(count_rows(&conn, "products", 1), 1);
}

#[test]
fn update_price_changes_only_price() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProductRepository::new(&mut conn);
    let product = Product::original(1, "mouse", "electronics", 19.99, 10, "new").unwrap();
    repo.create_product(&product).unwrap();

    repo.update_price(1, 24.99).unwrap();

    let loaded = repo.get_product(1).unwrap().unwrap();
    assert_eq!(loaded.price(), 24.99);
    assert_eq!(loaded.stock(), 10);
    assert_eq!(loaded.name(), "mouse");
    assert_eq!(loaded.status(), Some("new"));
}

#[test]
fn update_price_rejects_missing_id_and_negative_price() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProductRepository::new(&mut conn);

    let err = repo.update_price(99, 1.0).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));

    let product = Product::new(1, "desk", "furniture", 120.0, 1).unwrap();
    repo.create_product(&product).unwrap();
    let err = repo.update_price(1, -3.0).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProductValidationError::NegativePrice(_))
    ));
    assert_eq!(repo.get_product(1).unwrap().unwrap().price(), 120.0);
}

#[test]
fn delete_clears_satellite_and_base_rows() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteProductRepository::new(&mut conn);
        let product = Product::non_original(5, "toner", "office", 9.0, 2, "replica").unwrap();
        repo.create_product(&product).unwrap();

        repo.delete_product(5).unwrap();
        assert!(repo.get_product(5).unwrap().is_none());
        assert!(!repo.exists(5).unwrap());

        let err = repo.delete_product(5).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(5)));
    }

    assert_eq!(count_rows(&conn, "non_original_variant", 5), 0);
    assert_eq!(count_rows(&conn, "products", 5), 0);
}

#[test]
fn list_reconstructs_variants_in_id_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProductRepository::new(&mut conn);

    repo.create_product(&Product::new(30, "desk", "furniture", 120.0, 1).unwrap())
        .unwrap();
    repo.create_product(&Product::original(10, "mouse", "electronics", 19.99, 10, "new").unwrap())
        .unwrap();
    repo.create_product(
        &Product::non_original(20, "cartridge", "printing", 8.5, 3, "aftermarket").unwrap(),
    )
    .unwrap();

    let products = repo.list_products().unwrap();
    let ids: Vec<i64> = products.iter().map(Product::id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    assert_eq!(products[0].variant().label(), "original");
    assert_eq!(products[1].origin(), Some("aftermarket"));
    assert_eq!(products[2].variant(), &ProductVariant::Plain);
}

#[test]
fn list_on_empty_store_is_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&mut conn);
    assert!(repo.list_products().unwrap().is_empty());
}

#[test]
fn original_satellite_wins_when_both_rows_exist() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO products (id, name, category, price, stock) VALUES (1, 'mouse', 'electronics', 5.0, 1);
         INSERT INTO original_variant (id, status) VALUES (1, 'new');
         INSERT INTO non_original_variant (id, origin) VALUES (1, 'clone');",
    )
    .unwrap();

    let repo = SqliteProductRepository::new(&mut conn);
    let loaded = repo.get_product(1).unwrap().unwrap();
    assert_eq!(loaded.status(), Some("new"));
}

#[test]
fn satellite_rows_require_a_base_row() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO original_variant (id, status) VALUES (77, 'orphan');",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn failed_satellite_insert_rolls_back_base_row() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE original_variant;").unwrap();

    {
        let mut repo = SqliteProductRepository::new(&mut conn);
        let product = Product::original(8, "mouse", "electronics", 19.99, 10, "new").unwrap();

        let err = repo.create_product(&product).unwrap_err();
        assert!(matches!(err, RepoError::Db(_)));
        assert!(!repo.exists(8).unwrap());
        assert!(repo.get_product(8).unwrap().is_none());
    }

    assert_eq!(count_rows(&conn, "products", 8), 0);
}
