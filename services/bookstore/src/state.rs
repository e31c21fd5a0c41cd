//! Application state shared across handlers

use sqlx::PgPool;
use std::time::Duration;

use crate::{
    models::{Author, Genre, Language},
    repositories::{AuthorRepository, GenreRepository, LanguageRepository, UserRepository},
    services::{CatalogService, UserService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub author_service: CatalogService<Author>,
    pub genre_service: CatalogService<Genre>,
    pub language_service: CatalogService<Language>,
}

impl AppState {
    /// Wire every service onto the shared pool
    pub fn new(pool: PgPool, request_timeout: Duration) -> Self {
        Self {
            user_service: UserService::new(UserRepository::new(pool.clone(), request_timeout)),
            author_service: CatalogService::new(AuthorRepository::new(
                pool.clone(),
                request_timeout,
            )),
            genre_service: CatalogService::new(GenreRepository::new(pool.clone(), request_timeout)),
            language_service: CatalogService::new(LanguageRepository::new(pool, request_timeout)),
        }
    }
}
