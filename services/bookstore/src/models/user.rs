//! User model and related payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{validate_alphanumeric, validate_ascii, validate_email_address};

fn serialize_date<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%d-%m-%Y"))
}

/// User entity
///
/// `password` holds the Argon2 PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(serialize_with = "serialize_date")]
    pub registered_at: NaiveDateTime,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, message = "cannot be blank"),
        custom(function = "validate_email_address")
    )]
    pub email: String,
    #[validate(
        length(min = 3, max = 20, message = "the length must be between 3 and 20"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,
    #[validate(
        length(min = 6, max = 24, message = "the length must be between 6 and 24"),
        custom(function = "validate_alphanumeric")
    )]
    pub password: String,
    #[validate(
        length(min = 6, max = 24, message = "the length must be between 6 and 24"),
        custom(function = "validate_alphanumeric")
    )]
    pub repeat_password: String,
    #[validate(
        length(min = 3, max = 100, message = "the length must be between 3 and 100"),
        custom(function = "validate_ascii")
    )]
    pub address: Option<String>,
    #[validate(
        length(min = 5, max = 12, message = "the length must be between 5 and 12"),
        custom(function = "validate_alphanumeric")
    )]
    pub phone_number: Option<String>,
}

impl CreateUserDto {
    pub fn passwords_match(&self) -> bool {
        self.password == self.repeat_password
    }
}

/// Full replacement payload, authenticated by the current password
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(
        length(min = 1, message = "cannot be blank"),
        custom(function = "validate_email_address")
    )]
    pub email: String,
    #[validate(
        length(min = 3, max = 20, message = "the length must be between 3 and 20"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,
    #[validate(
        required(message = "cannot be blank"),
        length(min = 3, max = 100, message = "the length must be between 3 and 100"),
        custom(function = "validate_ascii")
    )]
    pub address: Option<String>,
    #[validate(
        required(message = "cannot be blank"),
        length(min = 5, max = 12, message = "the length must be between 5 and 12"),
        custom(function = "validate_alphanumeric")
    )]
    pub phone_number: Option<String>,
    #[validate(
        length(min = 1, message = "cannot be blank"),
        custom(function = "validate_alphanumeric")
    )]
    pub old_password: String,
}

/// Partial update payload, authenticated by the current password
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPartiallyDto {
    #[validate(
        length(min = 1, message = "cannot be blank"),
        custom(function = "validate_email_address")
    )]
    pub email: Option<String>,
    #[validate(
        length(min = 3, max = 20, message = "the length must be between 3 and 20"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "cannot be blank"),
        length(min = 1, message = "cannot be blank"),
        custom(function = "validate_alphanumeric")
    )]
    pub old_password: Option<String>,
    #[validate(
        length(min = 6, max = 24, message = "the length must be between 6 and 24"),
        custom(function = "validate_alphanumeric")
    )]
    pub new_password: Option<String>,
    #[validate(
        length(min = 3, max = 100, message = "the length must be between 3 and 100"),
        custom(function = "validate_ascii")
    )]
    pub address: Option<String>,
    #[validate(
        length(min = 5, max = 12, message = "the length must be between 5 and 12"),
        custom(function = "validate_alphanumeric")
    )]
    pub phone_number: Option<String>,
}

/// Query parameters of the credential lookup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsQuery {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user ready for insertion, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Columns overwritten by a full replace
#[derive(Debug, Clone)]
pub struct UserReplacement {
    pub email: String,
    pub username: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl From<UpdateUserDto> for UserReplacement {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            email: dto.email,
            username: dto.username,
            address: dto.address,
            phone_number: dto.phone_number,
        }
    }
}

/// Columns touched by a partial update; `None` leaves the column alone
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
}
