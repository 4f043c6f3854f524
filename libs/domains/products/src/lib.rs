//! Products Domain
//!
//! CRUD for products with an optional image file kept in a flat upload
//! directory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, form/multipart extraction
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──► │ ImageStorage │  ← image files
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, inputs, validation rules
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//!     storage::LocalImageStorage,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let storage = LocalImageStorage::new("public/upload");
//! let service = ProductService::new(repository, storage);
//!
//! let router = handlers::router(service, handlers::DEFAULT_BODY_LIMIT);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::{ApiDoc, ProductForm};
pub use models::{CreateProduct, ImageUpload, NewProduct, Product, UpdateProduct};
pub use naming::{Clock, FixedClock, ImageNamer, SystemClock};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use storage::{ImageStorage, LocalImageStorage, StorageError};
