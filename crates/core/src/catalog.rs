//! Game write payload validation.
//!
//! The HTTP body arrives as loosely-typed JSON so that a wrong-typed field
//! (e.g. `"price": "free"`) is reported with a readable reason instead of a
//! deserializer rejection. [`GamePayload::into_draft`] turns it into a
//! [`GameDraft`], the only input the record store accepts.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::CoreError;
use crate::tags::TagKind;

/// Currency stored when the payload omits one.
pub const DEFAULT_CURRENCY: &str = "SEK";

pub const MSG_TITLE_REQUIRED: &str = "Title is required.";
pub const MSG_DEVELOPER_REQUIRED: &str = "Developer is required.";
pub const MSG_PRICE_NOT_NUMBER: &str = "Price must be a number.";
pub const MSG_CURRENCY_INVALID: &str = "Currency must be a three-letter code.";
pub const MSG_RELEASE_YEAR_INVALID: &str = "Release year must be an integer.";
pub const MSG_GENRE_REQUIRED: &str = "At least one genre is required.";
pub const MSG_PLATFORM_REQUIRED: &str = "At least one platform is required.";

/// Field order used when reporting derive-level validation failures, so the
/// reported reason does not depend on hash map iteration order.
const FIELD_ORDER: &[&str] = &[
    "title",
    "developer",
    "currency",
    "genres",
    "platforms",
];

/// Raw write body for `POST /api/games` and `PUT /api/games/{id}`.
///
/// Every field is kept as an untyped JSON value; absent fields are `Null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GamePayload {
    pub title: Value,
    pub developer: Value,
    pub price: Value,
    pub currency: Value,
    pub release_year: Value,
    pub genres: Value,
    pub platforms: Value,
}

/// Validated scalar fields plus the desired tag names for both relations.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct GameDraft {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Developer is required."))]
    pub developer: String,
    pub price: f64,
    #[validate(length(equal = 3, message = "Currency must be a three-letter code."))]
    pub currency: String,
    pub release_year: Option<i32>,
    #[validate(length(min = 1, message = "At least one genre is required."))]
    pub genres: Vec<String>,
    #[validate(length(min = 1, message = "At least one platform is required."))]
    pub platforms: Vec<String>,
}

impl GameDraft {
    /// Desired tag names for one relation.
    pub fn names_for(&self, kind: TagKind) -> &[String] {
        match kind {
            TagKind::Genre => &self.genres,
            TagKind::Platform => &self.platforms,
        }
    }
}

impl GamePayload {
    /// Validate the payload, reporting the first failing field.
    ///
    /// Checks run in a fixed order: title, developer, price, currency,
    /// release year, genres, platforms.
    pub fn into_draft(self) -> Result<GameDraft, CoreError> {
        let title = required_text(&self.title, MSG_TITLE_REQUIRED)?;
        let developer = required_text(&self.developer, MSG_DEVELOPER_REQUIRED)?;
        let price = finite_number(&self.price)?;
        let currency = currency_code(&self.currency)?;
        let release_year = optional_year(&self.release_year)?;
        let genres = name_list(&self.genres, TagKind::Genre)?;
        let platforms = name_list(&self.platforms, TagKind::Platform)?;

        let draft = GameDraft {
            title,
            developer,
            price,
            currency,
            release_year,
            genres,
            platforms,
        };
        draft.validate().map_err(first_reason)?;
        Ok(draft)
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn required_text(value: &Value, message: &str) -> Result<String, CoreError> {
    match value.as_str().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

fn finite_number(value: &Value) -> Result<f64, CoreError> {
    value
        .as_f64()
        .filter(|price| price.is_finite())
        .ok_or_else(|| CoreError::Validation(MSG_PRICE_NOT_NUMBER.to_string()))
}

fn currency_code(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::Null => Ok(DEFAULT_CURRENCY.to_string()),
        Value::String(code) => {
            let code = code.trim();
            if code.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(code.to_ascii_uppercase())
            } else {
                Err(CoreError::Validation(MSG_CURRENCY_INVALID.to_string()))
            }
        }
        _ => Err(CoreError::Validation(MSG_CURRENCY_INVALID.to_string())),
    }
}

fn optional_year(value: &Value) -> Result<Option<i32>, CoreError> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_i64()
        .and_then(|year| i32::try_from(year).ok())
        .map(Some)
        .ok_or_else(|| CoreError::Validation(MSG_RELEASE_YEAR_INVALID.to_string()))
}

fn name_list(value: &Value, kind: TagKind) -> Result<Vec<String>, CoreError> {
    let required = match kind {
        TagKind::Genre => MSG_GENRE_REQUIRED,
        TagKind::Platform => MSG_PLATFORM_REQUIRED,
    };
    let items = match value.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(CoreError::Validation(required.to_string())),
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Each {} must be given by name.",
                    kind.label()
                ))
            })
        })
        .collect()
}

/// Pick the message of the first failing field in [`FIELD_ORDER`].
fn first_reason(errors: validator::ValidationErrors) -> CoreError {
    let fields = errors.field_errors();
    let message = FIELD_ORDER
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());
    CoreError::Validation(message)
}
