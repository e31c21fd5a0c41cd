//! Domain records and the request DTOs that carry their validation rules

pub mod author;
pub mod genre;
pub mod language;
pub mod user;

// Re-export for convenience
pub use author::{Author, AuthorInput, AuthorPatch};
pub use genre::{Genre, GenreInput};
pub use language::{Language, LanguageInput};
pub use user::{
    CreateUserDto, CredentialsQuery, NewUser, UpdateUserDto, UpdateUserPartiallyDto, User,
    UserPatch, UserReplacement,
};
