//! Author model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::validate_alpha;

/// Author entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// Payload for creating or fully replacing an author
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthorInput {
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub surname: String,
}

/// Payload for a partial author update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorPatch {
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub surname: Option<String>,
}
