use bytes::Bytes;
use chrono::{DateTime, Utc};
use image::ImageFormat;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Extensions accepted for uploaded product images (lowercase).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpeg", "png", "jpg", "gif", "svg"];

/// 2048 KB
pub const MAX_IMAGE_BYTES: usize = 2048 * 1024;

/// Product record as stored and returned by the API.
///
/// Scalar fields are nullable: create always fills them, but an update
/// overwrites every field with what was sent, including nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Auto-increment id, first record is 1
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Whole prices serialize as integers (`10`, not `10.0`)
    #[serde(serialize_with = "serialize_price")]
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    /// Generated file name in the upload directory, e.g. `image_1760000000.png`
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the scalar fields. The image is handled by the service.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.quantity = update.quantity;
    }

    /// Stored image name, ignoring empty values.
    pub fn image_name(&self) -> Option<&str> {
        self.image.as_deref().filter(|name| !name.is_empty())
    }
}

/// Values for a new record, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub image: Option<String>,
}

/// An uploaded file taken from a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased extension of the client file name.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Extension used for the stored file: the client's, else one derived
    /// from the content type, else `bin`.
    pub fn storage_extension(&self) -> String {
        if let Some(ext) = self.extension() {
            return ext;
        }

        let from_mime = self
            .content_type
            .as_deref()
            .and_then(|mime| match mime.to_ascii_lowercase().as_str() {
                "image/png" => Some("png"),
                "image/jpeg" | "image/jpg" => Some("jpg"),
                "image/gif" => Some("gif"),
                "image/svg+xml" => Some("svg"),
                _ => None,
            });

        from_mime.unwrap_or("bin").to_string()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Image type recognised from the file content, as an extension.
    pub fn detected_kind(&self) -> Option<&'static str> {
        match image::guess_format(&self.bytes) {
            Ok(ImageFormat::Png) => Some("png"),
            Ok(ImageFormat::Jpeg) => Some("jpeg"),
            Ok(ImageFormat::Gif) => Some("gif"),
            _ if has_svg_root(&self.bytes) => Some("svg"),
            _ => None,
        }
    }
}

/// True when the first element, after the XML prolog, comments and doctype,
/// is `<svg`.
fn has_svg_root(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();

    loop {
        let skip_to = if rest.starts_with("<?") {
            rest.find("?>").map(|end| end + 2)
        } else if rest.starts_with("<!--") {
            rest.find("-->").map(|end| end + 3)
        } else if rest.starts_with("<!") {
            rest.find('>').map(|end| end + 1)
        } else {
            break;
        };

        match skip_to {
            Some(end) => rest = rest[end..].trim_start(),
            None => return false,
        }
    }

    rest.get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("<svg"))
        && rest[4..].starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/')
}

/// Create input as received. Scalars stay raw text until validated.
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "The price field is required."),
        custom(function = "validate_numeric")
    )]
    #[schema(example = "10.50")]
    pub price: Option<String>,

    #[validate(
        required(message = "The quantity field is required."),
        custom(function = "validate_integer")
    )]
    #[schema(example = "5")]
    pub quantity: Option<String>,

    /// jpeg, png, jpg, gif or svg; at most 2048 KB
    #[validate(custom(function = "validate_image"))]
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<ImageUpload>,
}

impl CreateProduct {
    /// Validate every field, then split into the record values and the
    /// optional upload.
    pub fn into_validated(self) -> Result<(NewProduct, Option<ImageUpload>), ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();
        let price = self.price.as_deref().and_then(parse_numeric);
        let quantity = self.quantity.as_deref().and_then(parse_integer);

        if price.is_none() {
            errors.add("price", numeric_error());
        }
        if quantity.is_none() {
            errors.add("quantity", integer_error());
        }

        match (self.name, price, quantity) {
            (Some(name), Some(price), Some(quantity)) => Ok((
                NewProduct {
                    name,
                    description: self.description,
                    price,
                    quantity,
                    image: None,
                },
                self.image,
            )),
            _ => Err(errors),
        }
    }
}

/// Update input. No validation; anything not sent (or not parseable)
/// becomes null on the record.
#[derive(Debug, Clone, Default, PartialEq, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    /// Replaces the stored image when present
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<ImageUpload>,
}

/// Numeric in the loose sense: integers, decimals and exponents, finite.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_integer(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn serialize_price<S: Serializer>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    // Beyond 2^53 an f64 no longer holds every integer exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    match price {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT => {
            serializer.serialize_some(&(*value as i64))
        }
        Some(value) => serializer.serialize_some(value),
        None => serializer.serialize_none(),
    }
}

fn numeric_error() -> ValidationError {
    ValidationError::new("numeric").with_message(Cow::Borrowed("The price must be a number."))
}

fn integer_error() -> ValidationError {
    ValidationError::new("integer")
        .with_message(Cow::Borrowed("The quantity must be an integer."))
}

fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    parse_numeric(value).map(|_| ()).ok_or_else(numeric_error)
}

fn validate_integer(value: &str) -> Result<(), ValidationError> {
    parse_integer(value).map(|_| ()).ok_or_else(integer_error)
}

fn validate_image(image: &ImageUpload) -> Result<(), ValidationError> {
    let allowed = image
        .extension()
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        && image
            .detected_kind()
            .is_some_and(|kind| ALLOWED_IMAGE_EXTENSIONS.contains(&kind));

    if !allowed {
        return Err(ValidationError::new("mimes").with_message(Cow::Borrowed(
            "The image must be a file of type: jpeg, png, jpg, gif, svg.",
        )));
    }

    if image.size() > MAX_IMAGE_BYTES {
        return Err(ValidationError::new("max").with_message(Cow::Borrowed(
            "The image may not be greater than 2048 kilobytes.",
        )));
    }

    Ok(())
}
