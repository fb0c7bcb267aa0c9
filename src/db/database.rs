use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::FromRow;

use crate::core::Result;
use crate::db::remote::LibsqlClient;
use crate::db::row::{FromRemoteRow, SqlArg};

/// Storage handle shared by all repositories.
///
/// Repositories hand it SQL text plus positional `?` arguments; each call
/// borrows a connection (or sends one HTTP pipeline) and releases it when the
/// call returns, on success and on failure alike.
#[derive(Debug, Clone)]
pub enum Database {
    Sqlite(SqlitePool),
    Remote(LibsqlClient),
}

impl Database {
    pub fn backend(&self) -> &'static str {
        match self {
            Database::Sqlite(_) => "sqlite",
            Database::Remote(_) => "libsql-remote",
        }
    }

    /// Run a query and decode every row
    pub async fn fetch_all<T>(&self, sql: &str, args: &[SqlArg]) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + FromRemoteRow + Send + Unpin,
    {
        match self {
            Database::Sqlite(pool) => {
                let rows = bind_query_as(sqlx::query_as::<_, T>(sql), args)
                    .fetch_all(pool)
                    .await?;
                Ok(rows)
            }
            Database::Remote(client) => {
                let result = client.execute(sql, args).await?;
                result.rows().map(|row| T::from_remote_row(&row)).collect()
            }
        }
    }

    /// Run a query and decode the first row, if any
    pub async fn fetch_optional<T>(&self, sql: &str, args: &[SqlArg]) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + FromRemoteRow + Send + Unpin,
    {
        match self {
            Database::Sqlite(pool) => {
                let row = bind_query_as(sqlx::query_as::<_, T>(sql), args)
                    .fetch_optional(pool)
                    .await?;
                Ok(row)
            }
            Database::Remote(client) => {
                let result = client.execute(sql, args).await?;
                let first = result
                    .rows()
                    .next()
                    .map(|row| T::from_remote_row(&row))
                    .transpose();
                first
            }
        }
    }

    /// Run a statement that returns no rows; yields the affected row count
    pub async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<u64> {
        match self {
            Database::Sqlite(pool) => {
                let outcome = bind_query(sqlx::query(sql), args).execute(pool).await?;
                Ok(outcome.rows_affected())
            }
            Database::Remote(client) => Ok(client.execute(sql, args).await?.affected_row_count),
        }
    }

    /// Connectivity probe
    pub async fn ping(&self) -> Result<()> {
        self.execute("SELECT 1", &[]).await.map(|_| ())
    }
}

fn bind_query_as<'q, T>(
    mut query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    args: &'q [SqlArg],
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Integer(v) => query.bind(*v),
            SqlArg::Real(v) => query.bind(*v),
            SqlArg::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

fn bind_query<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [SqlArg],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Integer(v) => query.bind(*v),
            SqlArg::Real(v) => query.bind(*v),
            SqlArg::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}
