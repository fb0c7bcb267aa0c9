//! HTTP client for a hosted libSQL database.
//!
//! Every call sends a one-shot pipeline (`execute` followed by `close`) to
//! `POST {base}/v2/pipeline`, so no stream state is kept between requests.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::db::row::{RemoteRow, SqlArg};

/// Wire representation of a libSQL value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Value {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl From<&SqlArg> for Value {
    fn from(arg: &SqlArg) -> Self {
        match arg {
            SqlArg::Null => Value::Null,
            SqlArg::Integer(v) => Value::Integer {
                value: v.to_string(),
            },
            SqlArg::Real(v) => Value::Float { value: *v },
            SqlArg::Text(v) => Value::Text { value: v.clone() },
        }
    }
}

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    requests: Vec<StreamRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamRequest<'a> {
    Execute { stmt: Statement<'a> },
    Close,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    sql: &'a str,
    args: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PipelineResponse {
    results: Vec<StreamResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResult {
    Ok { response: StreamResponse },
    Error { error: StreamError },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResponse {
    Execute { result: StatementResult },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    cols: Vec<Column>,
    rows: Vec<Vec<Value>>,
    #[serde(default)]
    affected_row_count: u64,
}

#[derive(Debug, Deserialize)]
struct Column {
    #[serde(default)]
    name: Option<String>,
}

/// Materialized result of one statement
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub affected_row_count: u64,
}

impl ResultSet {
    pub fn rows(&self) -> impl Iterator<Item = RemoteRow<'_>> {
        self.rows
            .iter()
            .map(move |values| RemoteRow::new(&self.columns, values))
    }
}

/// libSQL HTTP client
#[derive(Clone)]
pub struct LibsqlClient {
    client: Client,
    pipeline_url: String,
    auth_token: String,
}

impl fmt::Debug for LibsqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibsqlClient")
            .field("pipeline_url", &self.pipeline_url)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

impl LibsqlClient {
    pub fn new(database_url: &str, auth_token: String) -> Result<Self> {
        let base_url = http_base_url(database_url)?;

        Ok(Self {
            client: Client::new(),
            pipeline_url: format!("{}/v2/pipeline", base_url.trim_end_matches('/')),
            auth_token,
        })
    }

    pub fn pipeline_url(&self) -> &str {
        &self.pipeline_url
    }

    /// Run one statement and return its rows
    pub async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<ResultSet> {
        let request = PipelineRequest {
            requests: vec![
                StreamRequest::Execute {
                    stmt: Statement {
                        sql,
                        args: args.iter().map(Value::from).collect(),
                    },
                },
                StreamRequest::Close,
            ],
        };

        let response = self
            .client
            .post(&self.pipeline_url)
            .bearer_auth(&self.auth_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::remote_store(format!(
                "libSQL API error {}: {}",
                status, error_body
            )));
        }

        let body: PipelineResponse = response.json().await?;
        into_result_set(body)
    }
}

/// Map `libsql://` and `wss://` URLs onto the HTTP endpoint of the same host
pub fn http_base_url(database_url: &str) -> Result<String> {
    let url = database_url.trim();
    let rewritten = if let Some(host) = url.strip_prefix("libsql://") {
        format!("https://{}", host)
    } else if let Some(host) = url.strip_prefix("wss://") {
        format!("https://{}", host)
    } else if let Some(host) = url.strip_prefix("ws://") {
        format!("http://{}", host)
    } else if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        return Err(AppError::Configuration(format!(
            "Unsupported remote database URL scheme: {}",
            url
        )));
    };

    Ok(rewritten)
}

fn into_result_set(body: PipelineResponse) -> Result<ResultSet> {
    let first = body
        .results
        .into_iter()
        .next()
        .ok_or_else(|| AppError::remote_store("Empty pipeline response"))?;

    match first {
        StreamResult::Ok {
            response: StreamResponse::Execute { result },
        } => Ok(ResultSet {
            columns: result
                .cols
                .into_iter()
                .map(|c| c.name.unwrap_or_default())
                .collect(),
            rows: result.rows,
            affected_row_count: result.affected_row_count,
        }),
        StreamResult::Ok { .. } => Err(AppError::remote_store(
            "Unexpected response to execute request",
        )),
        StreamResult::Error { error } => Err(AppError::remote_store(match error.code {
            Some(code) => format!("{} ({})", error.message, code),
            None => error.message,
        })),
    }
}
