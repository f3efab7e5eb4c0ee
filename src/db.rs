use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Row};

use crate::config::ConnectionConfig;
use crate::error::AgentError;

/// The three primitives the pipeline needs from a relational database:
/// open a connection, describe the schema, run a statement. A trait so the
/// chain can be exercised against a scripted backend in tests.
#[async_trait]
pub trait SqlBackend {
    /// A single text block naming every table with its columns and types.
    /// Called fresh on every pipeline run, so schema drift between turns is
    /// always reflected.
    async fn describe_schema(&self) -> Result<String, AgentError>;

    /// Executes `sql` verbatim, exactly once. No retries, no timeout, no
    /// sanitization: whatever the model produced is what runs.
    async fn run(&self, sql: &str) -> Result<String, AgentError>;
}

pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, AgentError> {
        let pool = MySqlPool::connect(&config.url())
            .await
            .map_err(AgentError::Connection)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SqlBackend for MySqlBackend {
    async fn describe_schema(&self) -> Result<String, AgentError> {
        let tables_query =
            "SELECT table_name AS table_name FROM information_schema.tables \
             WHERE table_schema = DATABASE();";
        let rows = sqlx::query(tables_query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        let mut tables_info = Vec::new();

        for row in rows {
            let table_name: String = row.get("table_name");
            let columns_query =
                "SELECT column_name AS column_name, data_type AS data_type \
                 FROM information_schema.columns \
                 WHERE table_schema = DATABASE() AND table_name = ?;";
            let column_rows = sqlx::query(columns_query)
                .bind(&table_name)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;

            let columns: Vec<String> = column_rows
                .iter()
                .map(|col_row| {
                    let name: String = col_row.get("column_name");
                    let data_type: String = col_row.get("data_type");
                    format!("{name} ({data_type})")
                })
                .collect();

            tables_info.push(format!("Table: {table_name}, Columns: {columns:?}"));
        }

        Ok(tables_info.join(", "))
    }

    async fn run(&self, sql: &str) -> Result<String, AgentError> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        let mut result_string = String::new();

        for row in rows {
            let mut row_string = String::new();

            for (index, column) in row.columns().iter().enumerate() {
                row_string.push_str(&format!("{}: {}, ", column.name(), decode_value(&row, index)));
            }

            if row_string.ends_with(", ") {
                row_string.truncate(row_string.len() - 2);
            }

            result_string.push_str(&format!("{{ {row_string} }}"));
        }

        Ok(result_string)
    }
}

/// Best-effort stringification of one cell. Tries the common MySQL scalar
/// types in turn; anything undecodable renders as NULL.
fn decode_value(row: &MySqlRow, index: usize) -> String {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return match value {
            Some(text) => format!("{text:?}"),
            None => "NULL".to_string(),
        };
    }
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<u64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return value.to_string();
    }
    "NULL".to_string()
}

/// SQLSTATE class 42 covers syntax errors and unknown tables/columns, the
/// class a badly generated statement lands in. That class becomes the
/// recoverable `Query` error; everything else stays fatal.
fn classify(err: sqlx::Error) -> AgentError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.code().is_some_and(|code| is_programming_sqlstate(&code)) =>
        {
            AgentError::Query(db_err.message().to_string())
        }
        _ => AgentError::Database(err),
    }
}

fn is_programming_sqlstate(code: &str) -> bool {
    code.starts_with("42")
}
