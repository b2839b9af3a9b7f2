use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use tripstats::Config;
use tripstats::db::create_pool;
use tripstats::logging::init_logging;

mod commands;

const VERSION: &str = match option_env!("VERGEN_GIT_DESCRIBE") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Parser)]
#[command(name = "tripstats", version = VERSION, about = "Trip usage statistics and site news")]
struct Cli {
    /// Maximum number of pooled database connections
    #[arg(long, default_value_t = 10)]
    pool_size: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Web {
        #[arg(long, default_value = "0.0.0.0")]
        interface: String,
        #[arg(long, default_value_t = 1337)]
        port: u16,
    },
    /// Apply pending database migrations
    Migrate,
    /// Print material (vehicle/aircraft type) usage of completed trips
    Materials {
        /// Trip type, e.g. air, helicopter, train
        #[arg(long)]
        trip_type: String,
        /// Only count this user's trips
        #[arg(long)]
        username: Option<String>,
    },
    /// Print operator usage of completed trips
    Operators {
        /// Only count this user's trips
        #[arg(long)]
        username: Option<String>,
    },
    /// Manage site news
    News {
        #[command(subcommand)]
        action: NewsCommands,
    },
}

#[derive(Subcommand)]
enum NewsCommands {
    /// List all news items, newest first
    List,
    /// Post a news item
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Replace the title and content of a news item
    Edit {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a news item
    Delete {
        #[arg(long)]
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    init_logging();

    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    let _sentry_guard = config.sentry_dsn.as_deref().map(|dsn| {
        info!("Sentry enabled for {} environment", config.environment.as_str());
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: Some(VERSION.into()),
                environment: Some(config.environment.as_str().into()),
                ..Default::default()
            },
        ))
    });

    info!("tripstats {} starting", VERSION);
    let pool = create_pool(&config.database_url, cli.pool_size)?;

    match cli.command {
        Commands::Web { interface, port } => {
            commands::handle_web(pool, config.owner, interface, port).await
        }
        Commands::Migrate => commands::handle_migrate(pool).await,
        Commands::Materials {
            trip_type,
            username,
        } => commands::handle_materials(pool, trip_type, username).await,
        Commands::Operators { username } => commands::handle_operators(pool, username).await,
        Commands::News { action } => match action {
            NewsCommands::List => commands::handle_news_list(pool, &config.owner).await,
            NewsCommands::Add {
                username,
                title,
                content,
            } => commands::handle_news_add(pool, username, title, content).await,
            NewsCommands::Edit { id, title, content } => {
                commands::handle_news_edit(pool, id, title, content).await
            }
            NewsCommands::Delete { id } => commands::handle_news_delete(pool, id).await,
        },
    }
}
