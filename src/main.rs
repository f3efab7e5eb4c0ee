use std::io::{stdin, stdout, Write};

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use chain::{Chain, SqlChatChain};
use config::ConnectionConfig;
use db::MySqlBackend;
use history::GREETING;
use model::OllamaModel;
use session::SessionState;

mod chain;
mod config;
mod db;
mod error;
mod history;
mod model;
mod prompt;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConnectionConfig::from_env()?;
    // connection failures surface here as-is, before the chat loop starts
    let backend = MySqlBackend::connect(&config).await?;
    println!("Connected to database {}!", config.database);

    let chain = SqlChatChain::new(Box::new(OllamaModel::new()));
    let mut session = SessionState::new(Box::new(backend));

    println!("AI: {GREETING}");

    let mut input = String::new();
    loop {
        print!("Type a message...: ");
        stdout().flush()?;

        input.clear();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }

        let question = input.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        let answer = chain.run(&mut session, question).await?;
        println!("AI: {answer}");
    }

    Ok(())
}
