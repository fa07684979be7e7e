//! Blog Service - database administration and inspection CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_service_lib::config::BlogServiceConfig;
use blog_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "blog-service")]
#[command(about = "Blog accounts and posts store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Drop all tables, recreate them and load generated fixtures
    Seed {
        /// Number of users (each with one post) to create
        #[arg(long, default_value = "2")]
        users: usize,
        /// Seed that names and emails are derived from
        #[arg(long, default_value = "1")]
        seed: u64,
    },
    /// Inspect user accounts
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Inspect blog posts
    Posts {
        #[command(subcommand)]
        action: PostCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// List accounts as JSON
    List,
    /// Show one account as JSON
    Show { id: i32 },
}

#[derive(Subcommand)]
enum PostCommands {
    /// List posts with their authors as JSON
    List,
    /// Show one post as JSON
    Show { id: i32 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = BlogServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            blog_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Seed { users, seed } => {
            let summary = blog_service_lib::run_seed(&config, users, seed).await?;
            println!("Seeded {} users and {} posts", summary.users, summary.posts);
        }
        Commands::Users { action } => {
            let services = blog_service_lib::connect(&config).await?;
            let json = match action {
                UserCommands::List => {
                    serde_json::to_string_pretty(&services.users.list_users().await?)?
                }
                UserCommands::Show { id } => {
                    serde_json::to_string_pretty(&services.users.get_user(id).await?)?
                }
            };
            println!("{}", json);
        }
        Commands::Posts { action } => {
            let services = blog_service_lib::connect(&config).await?;
            let json = match action {
                PostCommands::List => {
                    serde_json::to_string_pretty(&services.posts.list_posts().await?)?
                }
                PostCommands::Show { id } => {
                    serde_json::to_string_pretty(&services.posts.get_post(id).await?)?
                }
            };
            println!("{}", json);
        }
    }

    Ok(())
}
