//! Genre storage mapping

use crate::models::{Genre, GenreInput};

use super::{ColumnValue, Repository, Resource};

pub type GenreRepository = Repository<Genre>;

impl Resource for Genre {
    type Id = i16;
    type Draft = GenreInput;
    type Replacement = GenreInput;

    const NAME: &'static str = "genre";
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static str = "id, genre";

    fn insert_values(draft: &GenreInput) -> Vec<ColumnValue> {
        vec![("genre", Some(draft.genre.clone()))]
    }

    fn replace_values(replacement: &GenreInput) -> Vec<ColumnValue> {
        Self::insert_values(replacement)
    }
}
