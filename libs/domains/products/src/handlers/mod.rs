//! HTTP handlers for the Products API

mod form;

pub use form::ProductForm;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    routing::{delete, get, post},
};
use axum_helpers::{
    ApiMessage, ApiResponse, IdPath,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::storage::ImageStorage;

pub const PRODUCTS_TAG: &str = "Products";

pub const MSG_CREATED: &str = "Data inserted successfully";
pub const MSG_LISTED: &str = "All the data displayed successfully";
pub const MSG_SHOWN: &str = "Data shown successfully";
pub const MSG_UPDATED: &str = "Data updated successfully";
pub const MSG_DELETED: &str = "Deleted Successfully";

/// Default request body limit, above the 2048 KB image cap so oversized
/// images are reported by validation.
pub const DEFAULT_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        insert_product,
        list_products,
        view_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ApiMessage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, S> = Arc<ProductService<R, S>>;

/// Create the products router.
///
/// `body_limit` caps request bodies on every product route.
pub fn router<R, S>(service: ProductService<R, S>, body_limit: usize) -> Router
where
    R: ProductRepository + 'static,
    S: ImageStorage + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/insert", post(insert_product::<R, S>))
        .route("/display_allUser", get(list_products::<R, S>))
        .route("/view/{id}", get(view_product::<R, S>))
        .route("/update/{id}", post(update_product::<R, S>))
        .route("/delete/{id}", delete(delete_product::<R, S>))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(shared_service)
}

/// Create a product
#[utoipa::path(
    post,
    path = "/insert",
    tag = PRODUCTS_TAG,
    request_body(content = CreateProduct, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn insert_product<R: ProductRepository, S: ImageStorage>(
    State(service): State<SharedService<R, S>>,
    form: ProductForm,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.create_product(form.into_create()).await?;
    Ok(ApiResponse::with_data(MSG_CREATED, product))
}

/// List every product
#[utoipa::path(
    get,
    path = "/display_allUser",
    tag = PRODUCTS_TAG,
    responses(
        (status = 200, description = "All products", body = ApiResponse<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, S: ImageStorage>(
    State(service): State<SharedService<R, S>>,
) -> ProductResult<ApiResponse<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(ApiResponse::with_data(MSG_LISTED, products))
}

/// Get a product by id; `data` is null when it does not exist
#[utoipa::path(
    get,
    path = "/view/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product or null", body = ApiResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn view_product<R: ProductRepository, S: ImageStorage>(
    State(service): State<SharedService<R, S>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.get_product(id).await?;
    Ok(ApiResponse::new(MSG_SHOWN, product))
}

/// Update a product, optionally replacing its image
#[utoipa::path(
    post,
    path = "/update/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body(content = UpdateProduct, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, S: ImageStorage>(
    State(service): State<SharedService<R, S>>,
    IdPath(id): IdPath,
    form: ProductForm,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.update_product(id, form.into_update()).await?;
    Ok(ApiResponse::with_data(MSG_UPDATED, product))
}

/// Delete a product and its image
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiMessage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, S: ImageStorage>(
    State(service): State<SharedService<R, S>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiMessage> {
    service.delete_product(id).await?;
    Ok(ApiMessage::new(MSG_DELETED))
}
