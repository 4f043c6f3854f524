//! Shared test utilities for the workspace
//!
//! - `TestDatabase`: migrated PostgreSQL container (feature: "postgres")
//! - [`TestUploadDir`]: throwaway directory for stored images
//! - [`TestDataBuilder`]: deterministic product data per test
//! - [`MultipartBody`]: hand-built `multipart/form-data` request bodies
//!
//! ```rust,ignore
//! use test_utils::{MultipartBody, TestDataBuilder, TestUploadDir};
//!
//! let uploads = TestUploadDir::new();
//! let builder = TestDataBuilder::from_test_name("create_with_image");
//! let body = MultipartBody::new()
//!     .text("name", &builder.product_name("pen"))
//!     .text("price", "10")
//!     .text("quantity", "5")
//!     .file("image", "pen.png", "image/png", &test_utils::png_bytes());
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// A temporary upload directory removed on drop.
pub struct TestUploadDir {
    dir: TempDir,
}

impl TestUploadDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temporary upload dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.file(name).is_file()
    }

    /// Put a file in place directly, bypassing the service.
    pub fn seed(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.file(name), bytes).expect("Failed to seed upload file");
    }

    /// Number of regular files currently stored.
    pub fn file_count(&self) -> usize {
        std::fs::read_dir(self.dir.path())
            .expect("Failed to read upload dir")
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .count()
    }
}

impl Default for TestUploadDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test data with deterministic, per-test values
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test name, so reruns produce identical data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// e.g. `product-1234-pen`
    pub fn product_name(&self, suffix: &str) -> String {
        format!("product-{}-{}", self.seed % 100_000, suffix)
    }

    /// A price in `1.00..=999.99` with two decimals.
    pub fn price(&self) -> f64 {
        (100 + self.seed % 99_900) as f64 / 100.0
    }

    pub fn quantity(&self) -> i32 {
        (self.seed % 500) as i32
    }
}

/// Smallest valid PNG (1x1 transparent pixel).
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Hand-built `multipart/form-data` body for handler tests
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----test-utils-boundary-7MA4YWxkTrZu0gW".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Closes the body with the final boundary.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (content_type, self.body)
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}
