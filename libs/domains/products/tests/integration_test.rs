//! Integration tests for the Products domain
//!
//! These run against a real PostgreSQL started by testcontainers, with the
//! workspace migrations applied. They need Docker:
//! `cargo test -p domain_products -- --ignored`

use domain_products::*;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase, TestUploadDir, png_bytes};

fn new_product(builder: &TestDataBuilder, suffix: &str) -> NewProduct {
    NewProduct {
        name: builder.product_name(suffix),
        description: Some("Integration test product".to_string()),
        price: builder.price(),
        quantity: builder.quantity(),
        image: None,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_create_and_find");

    let created = repo.create(new_product(&builder, "main")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, Some(builder.product_name("main")));
    assert_eq!(created.price, Some(builder.price()));

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.description, created.description);

    assert!(repo.find_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_in_id_order() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_find_all");

    for suffix in ["a", "b", "c"] {
        repo.create(new_product(&builder, suffix)).await.unwrap();
    }

    let ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_overwrites_with_nulls() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_update");

    let mut product = repo.create(new_product(&builder, "main")).await.unwrap();
    product.apply_update(UpdateProduct {
        name: Some("Renamed".to_string()),
        ..Default::default()
    });

    let updated = repo.update(product.clone()).await.unwrap();
    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(updated.description, None);
    assert_eq!(updated.price, None);
    assert_eq!(updated.quantity, None);
    assert!(updated.updated_at >= product.created_at);

    product.id = 404;
    let missing = repo.update(product).await;
    assert!(matches!(missing, Err(ProductError::NotFound(404))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_delete");

    let created = repo.create(new_product(&builder, "main")).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_image_lifecycle_on_postgres() {
    let db = TestDatabase::new().await;
    let uploads = TestUploadDir::new();
    let service = ProductService::with_namer(
        PgProductRepository::new(db.connection()),
        LocalImageStorage::new(uploads.path()),
        ImageNamer::new(Arc::new(FixedClock::from_timestamp(1_760_000_000))),
    );

    let created = service
        .create_product(CreateProduct {
            name: Some("Pen".to_string()),
            description: None,
            price: Some("10".to_string()),
            quantity: Some("5".to_string()),
            image: Some(ImageUpload::new("pen.png", png_bytes())),
        })
        .await
        .unwrap();
    assert_eq!(created.image.as_deref(), Some("image_1760000000.png"));

    let updated = service
        .update_product(
            created.id,
            UpdateProduct {
                name: Some("Pen".to_string()),
                image: Some(ImageUpload::new("pen.svg", b"<svg/>".to_vec())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.image.as_deref(), Some("image_1760000001.svg"));
    assert!(!uploads.contains("image_1760000000.png"));

    service.delete_product(created.id).await.unwrap();
    assert_eq!(uploads.file_count(), 0);
    assert!(service.get_product(created.id).await.unwrap().is_none());
}
