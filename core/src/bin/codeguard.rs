//! CLI for one-off moderation and repository analysis.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use codeguard::analyze::RepoAnalyzer;
use codeguard::guard::{Guard, Role};
use codeguard::model::{llama_server, LlamaServerClient, TextGenerator};
use codeguard::sources::GitHubClient;

#[derive(Parser)]
#[command(name = "codeguard", about = "Content-safety moderation and repository analysis")]
struct Cli {
    /// Base URL of the model completion server
    #[arg(long, default_value = llama_server::DEFAULT_BASE_URL)]
    model_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify text as safe or unsafe against the safety taxonomy
    Moderate {
        /// Text to classify
        content: String,
        /// Conversation slot the content belongs to: User or Agent
        #[arg(long, default_value = "User")]
        role: String,
    },
    /// Fetch a GitHub repository and review its source files
    Analyze {
        /// Repository URL of the shape .../<owner>/<repo>
        repo_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let model: Arc<dyn TextGenerator> = Arc::new(LlamaServerClient::new(cli.model_url));

    match cli.command {
        Command::Moderate { content, role } => {
            let role: Role = role.parse().map_err(anyhow::Error::msg)?;
            let guard = Guard::new(model);
            let result = guard.moderate(&content, role).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Analyze { repo_url } => {
            let analyzer = RepoAnalyzer::new(Arc::new(GitHubClient::new()), model);
            let result = analyzer.analyze(&repo_url).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
