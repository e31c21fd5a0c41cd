//! Language model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::validate_alpha;

/// Language entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Language {
    pub id: i16,
    pub language: String,
}

/// Payload for creating or replacing a language
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LanguageInput {
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub language: String,
}
