use anyhow::Result;
use clap::{Parser, Subcommand};

use datamind::app::App;
use datamind::client::AnswerClient;
use datamind::config::Config;
use datamind::tui;
use datamind::ui::conversation::{CONNECTION_ERROR, FALLBACK_ANSWER};

#[derive(Parser)]
#[command(name = "datamind")]
#[command(version)]
#[command(about = "Chat with your intelligent data assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// Your question
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        None => run_chat(config).await,
        Some(Commands::Ask { question }) => ask_once(&config, &question).await,
    }
}

async fn run_chat(config: Config) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let app = App::new(&config);
    let result = app.run(&mut terminal).await;

    tui::restore()?;
    result
}

async fn ask_once(config: &Config, question: &str) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(());
    }

    let client = AnswerClient::new(&config.answer_service_url);
    match client.ask(question).await {
        Ok(reply) => {
            let answer = reply.answer.unwrap_or_else(|| FALLBACK_ANSWER.to_string());
            println!("{}", answer);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", CONNECTION_ERROR);
            eprintln!("({:#})", err);
            std::process::exit(1);
        }
    }
}
