use thiserror::Error;

/// Error taxonomy for the chat pipeline.
///
/// Only `Query` is ever recovered: the chain swaps it for a fixed fallback
/// answer and the conversation continues. Every other variant propagates to
/// the process boundary and aborts the in-flight interaction.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A programming error (SQLSTATE class 42) reported by the database for
    /// the generated SQL: bad syntax, unknown table, unknown column.
    #[error("query rejected by the database: {0}")]
    Query(String),

    /// Any database failure outside the programming-error class.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("model call failed: {0}")]
    Model(String),

    #[error("invalid prompt template: {0}")]
    Template(String),
}
