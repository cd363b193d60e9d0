use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use ginkgo_bot::application::errors::{BotError, ConfigError};
use ginkgo_bot::application::services::{Backends, ConversationRouter, MessageGateway};
use ginkgo_bot::domain::traits::Transport;
use ginkgo_bot::infrastructure::adapters::ConsoleAdapter;
use ginkgo_bot::infrastructure::config::Config;
use ginkgo_bot::infrastructure::llm::{LlmCompletion, OpenAIProvider};
use ginkgo_bot::infrastructure::storage::InMemoryHistoryStore;

#[derive(Parser)]
#[command(name = "ginkgo-bot")]
#[command(about = "Routes chat messages to an AI completion backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console transport
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config).await,
        Commands::Version => {
            println!("ginkgo-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str) -> Config {
    if std::path::Path::new(path).exists() {
        match Config::load(path) {
            Ok(mut config) => {
                config.apply_env();
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    }
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists", path)).into());
    }
    Config::default().save(path)?;
    println!("Wrote default config to {}", path);
    Ok(())
}

async fn run_bot(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path);
    let trigger = Arc::new(config.trigger_config()?);

    tracing::info!("Starting ginkgo-bot: {} ({})", config.bot.name, config.bot.variant.as_str());
    tracing::info!("Private trigger keyword: {:?}", trigger.private_trigger_keyword);
    tracing::info!("Group chat allowed: {}", !trigger.disable_group_message);
    tracing::info!("{} input block words: {:?}", trigger.block_words.len(), trigger.block_words);
    tracing::info!("{} reply block words: {:?}", trigger.reply_block_words.len(), trigger.reply_block_words);

    let provider = Arc::new(
        OpenAIProvider::from_config(&config.openai)
            .map_err(|e| ConfigError::InvalidValue(format!("openai: {}", e)))?,
    );
    let store = Arc::new(InMemoryHistoryStore::new());
    let completion = LlmCompletion::new(provider.clone(), store.clone())
        .with_temperature(config.openai.temperature)
        .with_max_tokens(config.openai.max_tokens);

    let console = Arc::new(ConsoleAdapter::new());
    let transport: Arc<dyn Transport> = console.clone();
    let backends = Backends {
        transport: transport.clone(),
        completion: Arc::new(completion),
        transcriber: provider.clone(),
        images: provider,
        store,
    };

    let router = ConversationRouter::new(&config.bot.name, config.bot.variant, trigger, backends)?
        .with_escalation_contact(config.bot.escalation_contact.clone())
        .with_audio_dir(config.audio.directory.clone());
    let gateway = Arc::new(MessageGateway::new(Arc::new(router), transport));

    tracing::info!("Reading messages from stdin (prefix a line with #<topic> for a group chat)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = tokio::task::JoinSet::new();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BotError::Transport(e.to_string()))?
    {
        let Some(message) = console.parse_line(&line) else {
            continue;
        };
        let gateway = gateway.clone();
        tasks.spawn(async move {
            gateway.handle(message).await;
        });
    }

    // stdin closed, let in-flight replies finish
    while tasks.join_next().await.is_some() {}
    Ok(())
}
