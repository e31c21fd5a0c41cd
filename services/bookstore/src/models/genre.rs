//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::validate_alpha;

/// Genre entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i16,
    pub genre: String,
}

/// Payload for creating or replacing a genre
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenreInput {
    #[validate(
        length(min = 1, max = 30, message = "the length must be between 1 and 30"),
        custom(function = "validate_alpha")
    )]
    pub genre: String,
}
