use clap::{Parser, Subcommand};
use std::sync::Arc;

use ruff_cogs::application::errors::BotError;
use ruff_cogs::application::messaging::MessageParser;
use ruff_cogs::application::services::{ActionLoader, MemberFinder, SharedCatalog};
use ruff_cogs::cogs::modhelper::{self, ModHelperCog};
use ruff_cogs::cogs::roleplay::{self, RoleplayCog};
use ruff_cogs::cogs::CogManager;
use ruff_cogs::domain::entities::{Member, Reply};
use ruff_cogs::domain::traits::{Bot, MemberDirectory};
use ruff_cogs::infrastructure::adapters::ConsoleAdapter;
use ruff_cogs::infrastructure::config::Config;
use ruff_cogs::infrastructure::directory::StaticDirectory;
use ruff_cogs::infrastructure::fuzzy::WeightedRatio;

/// Id given to the console user when it isn't listed in the member file
const CONSOLE_MEMBER_ID: u64 = 0;

#[derive(Parser)]
#[command(name = "ruff-cogs")]
#[command(about = "Roleplay actions and moderation helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console bot
    Run {
        /// Username to act as
        #[arg(short, long, default_value = "console")]
        user: String,
    },
    /// Inspect roleplay actions
    Actions {
        #[command(subcommand)]
        command: ActionsCommand,
    },
    /// Fuzzy-search guild members
    Find {
        query: String,
        /// Minimum score (0-100)
        #[arg(short, long)]
        score: Option<u8>,
        /// Number of results
        #[arg(short, long)]
        results: Option<usize>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[derive(Subcommand)]
enum ActionsCommand {
    /// List action names
    List,
    /// Show one action
    Show {
        name: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
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
        Commands::Run { user } => run_bot(load_config(&cli.config), &user),
        Commands::Actions { command } => run_actions(load_config(&cli.config), command),
        Commands::Find { query, score, results } => {
            run_find(load_config(&cli.config), &query, score, results)
        }
        Commands::Version => {
            println!("ruff-cogs v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };
    config.apply_env();
    config
}

fn load_catalog(config: &Config) -> Result<Arc<SharedCatalog>, BotError> {
    let loader = ActionLoader::new(&config.roleplay.actions_dir)
        .with_strict_gates(config.roleplay.strict_gates);
    Ok(Arc::new(SharedCatalog::load(loader)?))
}

fn load_directory(config: &Config) -> Result<Arc<StaticDirectory>, BotError> {
    match &config.members.path {
        Some(path) if path.exists() => Ok(Arc::new(StaticDirectory::from_file(path)?)),
        Some(path) => {
            tracing::warn!("Member file {} not found, starting with no members", path.display());
            Ok(Arc::new(StaticDirectory::default()))
        }
        None => Ok(Arc::new(StaticDirectory::default())),
    }
}

fn build_manager(config: &Config, directory: Arc<StaticDirectory>) -> Result<CogManager, BotError> {
    let catalog = load_catalog(config)?;
    let finder = MemberFinder::new(directory.clone(), Arc::new(WeightedRatio::new()));

    // Fixed commands first, so action files can't shadow them
    let mut manager = CogManager::new();
    manager
        .register(ModHelperCog::new(
            Arc::new(finder),
            config.modhelper.min_score,
            config.modhelper.results,
        ))
        .map_err(BotError::Cog)?;
    manager
        .register(RoleplayCog::new(catalog, directory))
        .map_err(BotError::Cog)?;

    tracing::info!("Cog manager initialized with {} commands", manager.command_count());
    Ok(manager)
}

fn run_bot(config: Config, user: &str) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let directory = load_directory(&config)?;
    let invoker = directory.lookup(user).unwrap_or_else(|| {
        let member = Member::new(CONSOLE_MEMBER_ID, user);
        directory.upsert(member.clone());
        member
    });

    let mut manager = build_manager(&config, directory)?;
    let parser = MessageParser::new(&config.bot.prefix);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let bot = ConsoleAdapter::new(&config.bot.name);
        run_console_bot(bot, &mut manager, &parser, invoker).await
    })
}

async fn run_console_bot(
    bot: ConsoleAdapter,
    manager: &mut CogManager,
    parser: &MessageParser,
    invoker: Member,
) -> Result<(), BotError> {
    bot.start().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: @{} (prefix '{}')", info.username, parser.prefix());

    // Main loop (for console mode)
    while let Some(input) = bot.read_line("> ").await {
        if input.is_empty() {
            continue;
        }

        let Some(invocation) = parser.parse(&input, invoker.clone()) else {
            continue;
        };

        match manager.handle(&invocation) {
            Ok(replies) => {
                for reply in &replies {
                    bot.send_reply("console", reply).await?;
                }
            }
            Err(e) => {
                tracing::debug!("Command '{}' failed: {}", invocation.name, e);
                bot.send_reply("console", &Reply::text(format!("Error: {}", e)))
                    .await?;
            }
        }
    }

    Ok(())
}

fn run_actions(config: Config, command: ActionsCommand) -> Result<(), BotError> {
    let catalog = load_catalog(&config)?.snapshot();

    match command {
        ActionsCommand::List => {
            for name in catalog.list() {
                println!("{}", name);
            }
        }
        ActionsCommand::Show { name, json } => match catalog.get(&name) {
            Some(action) if json => {
                let out = serde_json::to_string_pretty(action)
                    .map_err(|e| BotError::Internal(e.to_string()))?;
                println!("{}", out);
            }
            Some(action) => println!("{}", roleplay::summary(action)),
            None => println!("Action '{}' not found!", name),
        },
    }
    Ok(())
}

fn run_find(
    config: Config,
    query: &str,
    score: Option<u8>,
    results: Option<usize>,
) -> Result<(), BotError> {
    let directory = load_directory(&config)?;
    let finder = MemberFinder::new(directory, Arc::new(WeightedRatio::new()));

    let min_score = score.unwrap_or(config.modhelper.min_score).min(100);
    let results = results.unwrap_or(config.modhelper.results).max(1);

    let matches = finder.find(query, min_score, results);
    for reply in modhelper::render_matches(query, min_score, &matches) {
        println!("{}", reply.render());
    }
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).map_err(|e| BotError::Internal(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
