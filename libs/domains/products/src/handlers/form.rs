//! Request body extraction for create and update.
//!
//! Accepts `multipart/form-data`, `application/x-www-form-urlencoded` and
//! JSON. Values are trimmed and empty strings dropped before they reach the
//! service. Only multipart bodies can carry the `image` file.

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use axum_helpers::AppError;
use serde_json::Value;
use std::collections::HashMap;

use crate::models::{CreateProduct, ImageUpload, UpdateProduct, parse_integer, parse_numeric};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl ProductForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    fn insert(&mut self, name: String, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name, value.to_string());
        }
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn into_create(mut self) -> CreateProduct {
        CreateProduct {
            name: self.take("name"),
            description: self.take("description"),
            price: self.take("price"),
            quantity: self.take("quantity"),
            image: self.image,
        }
    }

    /// Unparseable numbers become null, like absent ones.
    pub fn into_update(mut self) -> UpdateProduct {
        UpdateProduct {
            name: self.take("name"),
            description: self.take("description"),
            price: self.take("price").as_deref().and_then(parse_numeric),
            quantity: self.take("quantity").as_deref().and_then(parse_integer),
            image: self.image,
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;

                    // browsers send an empty part when no file was chosen
                    if name == IMAGE_FIELD && !file_name.is_empty() {
                        form.image = Some(ImageUpload {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                None => {
                    let value = field.text().await?;
                    form.insert(name, &value);
                }
            }
        }

        Ok(form)
    }

    fn from_json(value: Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let mut form = Self::default();
        for (name, value) in map {
            match value {
                Value::String(s) => form.insert(name, &s),
                Value::Number(n) => form.insert(name, &n.to_string()),
                Value::Bool(b) => form.insert(name, if b { "1" } else { "0" }),
                Value::Null | Value::Array(_) | Value::Object(_) => {}
            }
        }
        Ok(form)
    }
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            Self::from_json(value)
        } else if content_type.is_empty() {
            Ok(Self::default())
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
            let mut form = Self::default();
            for (name, value) in fields {
                form.insert(name, &value);
            }
            Ok(form)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;
    use test_utils::{MultipartBody, png_bytes};

    async fn extract(content_type: Option<&str>, body: impl Into<Body>) -> ProductForm {
        let mut builder = Request::builder().method("POST").uri("/insert");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(body.into()).unwrap();
        ProductForm::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_multipart_fields_and_image() {
        let (content_type, body) = MultipartBody::new()
            .text("name", " Pen ")
            .text("description", "")
            .text("price", "10")
            .file("image", "pen.png", "image/png", &png_bytes())
            .finish();

        let form = extract(Some(&content_type), body).await;

        assert_eq!(form.field("name"), Some("Pen"));
        assert_eq!(form.field("description"), None);
        let image = form.image().unwrap();
        assert_eq!(image.file_name, "pen.png");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes.len(), png_bytes().len());
    }

    #[tokio::test]
    async fn test_multipart_empty_file_part_is_no_image() {
        let (content_type, body) = MultipartBody::new()
            .text("name", "Pen")
            .file("image", "", "application/octet-stream", b"")
            .finish();

        let form = extract(Some(&content_type), body).await;
        assert!(form.image().is_none());
    }

    #[tokio::test]
    async fn test_urlencoded_form() {
        let form = extract(
            Some("application/x-www-form-urlencoded"),
            "name=Pen&price=10&quantity=5&description=",
        )
        .await;

        let input = form.into_create();
        assert_eq!(input.name.as_deref(), Some("Pen"));
        assert_eq!(input.price.as_deref(), Some("10"));
        assert_eq!(input.quantity.as_deref(), Some("5"));
        assert_eq!(input.description, None);
    }

    #[tokio::test]
    async fn test_json_numbers_become_text() {
        let body = json!({"name": "Pen", "price": 10.5, "quantity": 5, "description": null});
        let form = extract(Some("application/json"), body.to_string()).await;

        let input = form.into_create();
        assert_eq!(input.price.as_deref(), Some("10.5"));
        assert_eq!(input.quantity.as_deref(), Some("5"));
        assert_eq!(input.description, None);
    }

    #[tokio::test]
    async fn test_json_must_be_object() {
        let request = Request::builder()
            .method("POST")
            .uri("/insert")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("[1,2]"))
            .unwrap();

        let result = ProductForm::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_missing_body_is_empty_form() {
        let form = extract(None, Body::empty()).await;
        assert_eq!(form.into_update(), UpdateProduct::default());
    }

    #[tokio::test]
    async fn test_update_parses_numbers_leniently() {
        let form = extract(
            Some("application/x-www-form-urlencoded"),
            "price=abc&quantity=7",
        )
        .await;

        let update = form.into_update();
        assert_eq!(update.price, None);
        assert_eq!(update.quantity, Some(7));
        assert_eq!(update.name, None);
    }
}
