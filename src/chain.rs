use std::collections::HashMap;

use async_trait::async_trait;

use crate::db::SqlBackend;
use crate::error::AgentError;
use crate::model::TextModel;
use crate::prompt::{PromptTemplate, ANSWER_PROMPT, SQL_PROMPT};
use crate::session::SessionState;

/// Answer substituted when the database rejects the generated SQL.
pub const FALLBACK_ANSWER: &str = "Sorry, We not have information in our database";

#[async_trait]
pub trait Chain {
    async fn run(&self, session: &mut SessionState, input: &str) -> Result<String, AgentError>;
}

/// The question-to-answer pipeline: schema fetch, SQL generation, execution,
/// answer generation, strictly in that order.
pub struct SqlChatChain {
    model: Box<dyn TextModel + Send + Sync>,
    sql_prompt: PromptTemplate,
    answer_prompt: PromptTemplate,
}

impl SqlChatChain {
    pub fn new(model: Box<dyn TextModel + Send + Sync>) -> Self {
        Self {
            model,
            sql_prompt: PromptTemplate::new(SQL_PROMPT),
            answer_prompt: PromptTemplate::new(ANSWER_PROMPT),
        }
    }

    /// Asks the model for exactly one SQL statement as plain text. The
    /// response is passed downstream unvalidated; non-SQL output surfaces
    /// later as an execution error, not here.
    async fn generate_sql(
        &self,
        schema: &str,
        chat_history: &str,
        question: &str,
    ) -> Result<String, AgentError> {
        let vars = HashMap::from([
            ("schema", schema.to_string()),
            ("chat_history", chat_history.to_string()),
            ("question", question.to_string()),
        ]);
        let prompt = self.sql_prompt.render(&vars)?;
        self.model.complete(&prompt).await
    }

    async fn generate_answer(
        &self,
        schema: &str,
        chat_history: &str,
        question: &str,
        sql: &str,
        result: &str,
    ) -> Result<String, AgentError> {
        let vars = HashMap::from([
            ("schema", schema.to_string()),
            ("chat_history", chat_history.to_string()),
            ("question", question.to_string()),
            ("query", sql.to_string()),
            ("response", result.to_string()),
        ]);
        let prompt = self.answer_prompt.render(&vars)?;
        self.model.complete(&prompt).await
    }
}

#[async_trait]
impl Chain for SqlChatChain {
    async fn run(&self, session: &mut SessionState, input: &str) -> Result<String, AgentError> {
        session.history.push_human(input);

        // Fetched once per run and reused by both prompts, so the schema the
        // model sees and the handle the SQL runs on match.
        let schema = session.backend.describe_schema().await?;
        tracing::debug!(schema = %schema, "database schema");
        let chat_history = session.history.render();

        let sql = self.generate_sql(&schema, &chat_history, input).await?;
        tracing::info!(sql = %sql, "generated sql");

        let answer = match session.backend.run(&sql).await {
            Ok(result) => {
                self.generate_answer(&schema, &chat_history, input, &sql, &result)
                    .await?
            }
            Err(AgentError::Query(reason)) => {
                tracing::warn!(reason = %reason, "query rejected, using fallback answer");
                FALLBACK_ANSWER.to_string()
            }
            Err(other) => return Err(other),
        };

        session.history.push_assistant(answer.clone());
        Ok(answer)
    }
}
