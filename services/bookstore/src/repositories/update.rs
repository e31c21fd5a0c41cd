//! `UPDATE` statement assembly
//!
//! Assignments are emitted in the order they were added, with `$N`
//! placeholders numbered from 1 and the row id bound last.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Column assignments for a single-row `UPDATE ... WHERE id = $N`
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: &'static str,
    assignments: Vec<(&'static str, Option<String>)>,
}

impl UpdateStatement {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Assign `value` to `column`; `None` writes NULL
    pub fn set(&mut self, column: &'static str, value: Option<String>) -> &mut Self {
        self.assignments.push((column, value));
        self
    }

    /// Assign `value` to `column` only when it is present
    pub fn set_if_present(&mut self, column: &'static str, value: Option<String>) -> &mut Self {
        if value.is_some() {
            self.assignments.push((column, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render the statement, binding `id` after every assigned value
    ///
    /// Fails with [`DatabaseError::EmptyUpdate`] when nothing was assigned.
    pub fn build<'args, I>(self, id: I) -> DatabaseResult<QueryBuilder<'args, Postgres>>
    where
        I: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if self.is_empty() {
            return Err(DatabaseError::EmptyUpdate);
        }

        let mut query = QueryBuilder::new(format!("UPDATE {} SET ", self.table));
        let mut set = query.separated(", ");
        for (column, value) in self.assignments {
            set.push(format!("{}=", column));
            set.push_bind_unseparated(value);
        }
        query.push(" WHERE id = ");
        query.push_bind(id);

        Ok(query)
    }
}
