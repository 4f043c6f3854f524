//! Product Service - record and image lifecycle

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ImageUpload, Product, UpdateProduct};
use crate::naming::ImageNamer;
use crate::repository::ProductRepository;
use crate::storage::{ImageStorage, StorageError};

/// Owns the mapping between a record's `image` field and the stored file.
///
/// Files are written before the record. When the record write fails the new
/// file is removed again; record and file are never changed atomically.
pub struct ProductService<R: ProductRepository, S: ImageStorage> {
    repository: Arc<R>,
    storage: Arc<S>,
    namer: Arc<ImageNamer>,
}

impl<R: ProductRepository, S: ImageStorage> ProductService<R, S> {
    pub fn new(repository: R, storage: S) -> Self {
        Self::with_namer(repository, storage, ImageNamer::system())
    }

    pub fn with_namer(repository: R, storage: S, namer: ImageNamer) -> Self {
        Self {
            repository: Arc::new(repository),
            storage: Arc::new(storage),
            namer: Arc::new(namer),
        }
    }

    /// Validate, store the image (if any), then insert the record.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let (mut new_product, upload) = input.into_validated()?;

        let stored = match upload {
            Some(upload) => Some(self.store_image(&upload).await?),
            None => None,
        };
        new_product.image = stored.clone();

        match self.repository.create(new_product).await {
            Ok(product) => Ok(product),
            Err(e) => {
                if let Some(name) = stored {
                    self.discard_image(&name).await;
                }
                Err(e)
            }
        }
    }

    /// Missing records are `None`, not an error.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Overwrite the record's fields and, when a new image is sent, replace
    /// the stored file: old file removed, new file written, record persisted.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, mut input: UpdateProduct) -> ProductResult<Product> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let upload = input.image.take();
        product.apply_update(input);

        let mut written = None;
        if let Some(upload) = upload {
            if let Some(old) = product.image_name() {
                self.remove_if_present(old).await?;
            }

            let name = self.store_image(&upload).await?;
            product.image = Some(name.clone());
            written = Some(name);
        }

        match self.repository.update(product).await {
            Ok(product) => Ok(product),
            Err(e) => {
                if let Some(name) = written {
                    self.discard_image(&name).await;
                }
                Err(e)
            }
        }
    }

    /// Remove the stored image (if any), then the record.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if let Some(image) = product.image_name() {
            self.remove_if_present(image).await?;
        }

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// Names already on disk (e.g. written before a restart) are skipped; the
    /// namer never repeats a name, so the loop ends at the first free one.
    async fn store_image(&self, upload: &ImageUpload) -> ProductResult<String> {
        let extension = upload.storage_extension();

        loop {
            let name = self.namer.next_name(&extension);
            match self.storage.put(&name, &upload.bytes).await {
                Ok(()) => {
                    tracing::info!(image = %name, size = upload.size(), "Stored product image");
                    return Ok(name);
                }
                Err(StorageError::AlreadyExists(taken)) => {
                    tracing::warn!(image = %taken, "Image name already taken, trying the next one");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn remove_if_present(&self, name: &str) -> ProductResult<()> {
        if self.storage.exists(name).await? {
            self.storage.remove(name).await?;
            tracing::info!(image = %name, "Removed product image");
        }
        Ok(())
    }

    /// Best effort; a failure leaves an orphaned file and is only logged.
    async fn discard_image(&self, name: &str) {
        if let Err(e) = self.storage.remove(name).await {
            tracing::warn!(image = %name, error = %e, "Failed to remove image after failed write");
        }
    }
}
