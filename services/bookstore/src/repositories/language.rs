//! Language storage mapping

use crate::models::{Language, LanguageInput};

use super::{ColumnValue, Repository, Resource};

pub type LanguageRepository = Repository<Language>;

impl Resource for Language {
    type Id = i16;
    type Draft = LanguageInput;
    type Replacement = LanguageInput;

    const NAME: &'static str = "language";
    const TABLE: &'static str = "languages";
    const COLUMNS: &'static str = "id, language";

    fn insert_values(draft: &LanguageInput) -> Vec<ColumnValue> {
        vec![("language", Some(draft.language.clone()))]
    }

    fn replace_values(replacement: &LanguageInput) -> Vec<ColumnValue> {
        Self::insert_values(replacement)
    }
}
