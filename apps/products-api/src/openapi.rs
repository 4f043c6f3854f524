//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ecommerce Product API",
        version = "0.1.0",
        description = "Product CRUD with optional image upload",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3003", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;
