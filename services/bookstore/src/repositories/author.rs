//! Author storage mapping

use crate::models::{Author, AuthorInput, AuthorPatch};

use super::{ColumnValue, Patchable, Repository, Resource};

pub type AuthorRepository = Repository<Author>;

impl Resource for Author {
    type Id = i64;
    type Draft = AuthorInput;
    type Replacement = AuthorInput;

    const NAME: &'static str = "author";
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static str = "id, name, surname";

    fn insert_values(draft: &AuthorInput) -> Vec<ColumnValue> {
        vec![
            ("name", Some(draft.name.clone())),
            ("surname", Some(draft.surname.clone())),
        ]
    }

    fn replace_values(replacement: &AuthorInput) -> Vec<ColumnValue> {
        Self::insert_values(replacement)
    }
}

impl Patchable for Author {
    type Patch = AuthorPatch;

    fn patch_values(patch: &AuthorPatch) -> Vec<ColumnValue> {
        vec![
            ("name", patch.name.clone()),
            ("surname", patch.surname.clone()),
        ]
    }
}
