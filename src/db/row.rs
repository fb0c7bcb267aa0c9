use crate::core::{AppError, Result};
use crate::db::remote::Value;

/// Positional statement argument understood by every backend
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Integer(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl<T: Into<SqlArg>> From<Option<T>> for SqlArg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlArg::Null)
    }
}

/// A single row returned by the remote store, addressed by column name
pub struct RemoteRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RemoteRow<'a> {
    pub fn new(columns: &'a [String], values: &'a [Value]) -> Self {
        Self { columns, values }
    }

    fn value(&self, column: &str) -> Result<&'a Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| AppError::remote_store(format!("Missing column '{}'", column)))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64> {
        match self.value(column)? {
            Value::Integer { value } | Value::Text { value } => value.parse().map_err(|_| {
                AppError::remote_store(format!("Column '{}' is not an integer: {}", column, value))
            }),
            other => Err(AppError::remote_store(format!(
                "Column '{}' is not an integer: {:?}",
                column, other
            ))),
        }
    }

    pub fn get_opt_string(&self, column: &str) -> Result<Option<String>> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text { value } | Value::Integer { value } => Ok(Some(value.clone())),
            Value::Float { value } => Ok(Some(value.to_string())),
            Value::Blob { .. } => Err(AppError::remote_store(format!(
                "Column '{}' holds a blob, expected text",
                column
            ))),
        }
    }

    pub fn get_string(&self, column: &str) -> Result<String> {
        self.get_opt_string(column)?
            .ok_or_else(|| AppError::remote_store(format!("Column '{}' is NULL", column)))
    }
}

/// Decoding of a remote result row into a row struct
pub trait FromRemoteRow: Sized {
    fn from_remote_row(row: &RemoteRow<'_>) -> Result<Self>;
}

/// Single `id` column, used for `RETURNING id` and existence probes
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdRow {
    pub id: i64,
}

impl FromRemoteRow for IdRow {
    fn from_remote_row(row: &RemoteRow<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
        })
    }
}
