use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use agent_toolkits::config::{BASE_URL_ENV, load_config};
use agent_toolkits::core::Agent;
use agent_toolkits::tools::default_tools;

#[derive(Parser, Debug)]
#[command(name = "agent-toolkits")]
#[command(version = "0.1.0")]
#[command(about = "Hacker News and thinking tools for agents", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, default_value = "toolkits.json", help = "Toolkit config file")]
    config: PathBuf,

    #[arg(short, long, global = true, env = BASE_URL_ENV, help = "Base URL for the Hacker News API")]
    base_url: Option<String>,

    #[arg(long, global = true, help = "Register every tool regardless of the individual flags")]
    all: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Fetch the current top stories")]
    TopStories {
        #[arg(short = 'n', long, default_value_t = 10, allow_negative_numbers = true)]
        count: i64,
    },

    #[command(about = "Fetch a user's profile summary")]
    User { username: String },

    #[command(about = "Log thoughts into a fresh session")]
    Think {
        #[arg(required = true)]
        thoughts: Vec<String>,
    },

    #[command(about = "List registered tools and the host prompt")]
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = load_config(&args.config).await?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.all {
        config.all = true;
    }

    let mut agent = Agent::new(default_tools(&config));

    match args.command {
        Commands::TopStories { count } => {
            let output = agent
                .call_tool("get_top_hackernews_stories", serde_json::json!({ "num_stories": count }))
                .await?;
            println!("{}", output);
        }

        Commands::User { username } => {
            let output = agent
                .call_tool("get_user_details", serde_json::json!({ "username": username }))
                .await?;
            println!("{}", output);
        }

        Commands::Think { thoughts } => {
            let mut output = String::new();
            for thought in thoughts {
                output = agent
                    .call_tool("think", serde_json::json!({ "thought": thought }))
                    .await?;
            }
            println!("{}", output);
        }

        Commands::Tools => {
            for name in agent.tools().list() {
                println!("- {}", name);
            }
            println!();
            println!("{}", agent.system_prompt());
        }
    }

    Ok(())
}
