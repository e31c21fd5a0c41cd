//! Repositories for database operations
//!
//! Every resource shares one generic [`Repository`]; a [`Resource`] impl
//! describes the table, the selected columns and how its payloads map to
//! column values. Each call runs under the configured per-query deadline.

use common::{
    database::with_timeout,
    error::{DatabaseError, DatabaseResult},
};
use sqlx::{Encode, FromRow, PgPool, Postgres, QueryBuilder, Type, postgres::PgRow};
use std::{fmt::Display, marker::PhantomData, time::Duration};

pub mod author;
pub mod genre;
pub mod language;
pub mod update;
pub mod user;

pub use author::AuthorRepository;
pub use genre::GenreRepository;
pub use language::LanguageRepository;
pub use update::UpdateStatement;
pub use user::UserRepository;

/// A column name paired with the value to write
pub type ColumnValue = (&'static str, Option<String>);

/// Integer primary key as it appears in paths and in the database
pub trait ResourceId:
    Copy + Display + Send + Sync + Unpin + 'static + for<'q> Encode<'q, Postgres> + Type<Postgres>
{
    /// Parse a decimal, non-negative id
    fn parse(raw: &str) -> Option<Self>;
}

macro_rules! resource_id {
    ($($id:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl ResourceId for $id {
                fn parse(raw: &str) -> Option<Self> {
                    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    raw.parse::<$unsigned>()
                        .ok()
                        .and_then(|value| <$id>::try_from(value).ok())
                }
            }
        )*
    };
}

resource_id!(i64 => u64, i16 => u16);

/// A record stored one row per entity
pub trait Resource: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    type Id: ResourceId;
    /// Payload inserted by `create`
    type Draft: Send + Sync + 'static;
    /// Payload written by a full replace
    type Replacement: Send + Sync + 'static;

    /// Singular name used in logs
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Select list producing a row this type can be read from
    const COLUMNS: &'static str;

    fn insert_values(draft: &Self::Draft) -> Vec<ColumnValue>;

    fn replace_values(replacement: &Self::Replacement) -> Vec<ColumnValue>;
}

/// A resource that accepts partial updates
pub trait Patchable: Resource {
    type Patch: Send + Sync + 'static;

    /// Updatable columns in a fixed order; `None` marks an absent field
    fn patch_values(patch: &Self::Patch) -> Vec<ColumnValue>;
}

fn insert_statement<R: Resource>(values: Vec<ColumnValue>) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("INSERT INTO {} (", R::TABLE));
    let mut columns = query.separated(", ");
    for (column, _) in &values {
        columns.push(*column);
    }
    query.push(") VALUES (");
    let mut binds = query.separated(", ");
    for (_, value) in values {
        binds.push_bind(value);
    }
    query.push(format!(") RETURNING {}", R::COLUMNS));
    query
}

/// Storage adapter for one resource table
pub struct Repository<R> {
    pool: PgPool,
    request_timeout: Duration,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            request_timeout: self.request_timeout,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Repository<R> {
    /// Create a new repository
    pub fn new(pool: PgPool, request_timeout: Duration) -> Self {
        Self {
            pool,
            request_timeout,
            _resource: PhantomData,
        }
    }

    /// Insert a row and return it with the database-assigned columns
    pub async fn create(&self, draft: &R::Draft) -> DatabaseResult<R> {
        let mut query = insert_statement::<R>(R::insert_values(draft));
        with_timeout(
            self.request_timeout,
            query.build_query_as::<R>().fetch_one(&self.pool),
        )
        .await
    }

    /// Find a row by its id
    pub async fn find_by_id(&self, id: R::Id) -> DatabaseResult<R> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE);
        with_timeout(
            self.request_timeout,
            sqlx::query_as::<_, R>(&sql).bind(id).fetch_one(&self.pool),
        )
        .await
    }

    /// Find a row by the value of a text column
    async fn find_by(&self, column: &'static str, value: &str) -> DatabaseResult<R> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            R::COLUMNS,
            R::TABLE,
            column
        );
        with_timeout(
            self.request_timeout,
            sqlx::query_as::<_, R>(&sql).bind(value).fetch_one(&self.pool),
        )
        .await
    }

    /// Overwrite every replaceable column of a row
    pub async fn replace(&self, id: R::Id, replacement: &R::Replacement) -> DatabaseResult<()> {
        let mut statement = UpdateStatement::new(R::TABLE);
        for (column, value) in R::replace_values(replacement) {
            statement.set(column, value);
        }
        self.execute_update(statement, id).await
    }

    /// Delete a row by its id
    pub async fn delete(&self, id: R::Id) -> DatabaseResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = with_timeout(
            self.request_timeout,
            sqlx::query(&sql).bind(id).execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NoRows);
        }
        Ok(())
    }

    async fn execute_update(&self, statement: UpdateStatement, id: R::Id) -> DatabaseResult<()> {
        let mut query = statement.build(id)?;
        let result = with_timeout(self.request_timeout, query.build().execute(&self.pool)).await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NoRows);
        }
        Ok(())
    }
}

impl<R: Patchable> Repository<R> {
    /// Overwrite only the columns present in `patch`
    pub async fn update_partially(&self, id: R::Id, patch: &R::Patch) -> DatabaseResult<()> {
        let mut statement = UpdateStatement::new(R::TABLE);
        for (column, value) in R::patch_values(patch) {
            statement.set_if_present(column, value);
        }
        self.execute_update(statement, id).await
    }
}
