use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::{Result, eyre::Context};
use sea_orm::DatabaseBackend;

use song_comments::{
    config::Config,
    database::{self, Database},
    logging::setup_logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SONG_COMMENTS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Database URL, overrides the config file
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Console log level
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "SONG_COMMENTS_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply, roll back or inspect schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommands),
    /// Print the schema DDL without connecting to a database
    Schema {
        #[arg(short, long, value_enum, default_value_t = Backend::Mysql)]
        backend: Backend,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum MigrateCommands {
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (default: all)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop all tables, then apply every migration
    Fresh,
    /// Roll back every applied migration
    Reset,
    /// List applied and pending migrations
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Backend {
    Mysql,
    Postgres,
    Sqlite,
}

impl From<Backend> for DatabaseBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Mysql => DatabaseBackend::MySql,
            Backend::Postgres => DatabaseBackend::Postgres,
            Backend::Sqlite => DatabaseBackend::Sqlite,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    let migrate = match args.command {
        Commands::Schema { backend } => {
            println!("{}", database::render_schema(backend.into()));
            return Ok(());
        }
        Commands::Config(ConfigCommands::CreateDefault) => {
            let path = Config::create_default()?;
            println!("{}", path.display());
            return Ok(());
        }
        Commands::Config(ConfigCommands::Path) => {
            match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            }
            return Ok(());
        }
        Commands::Migrate(migrate) => migrate,
    };

    log::debug!("Loading configuration");
    let mut config = match args.config {
        Some(path) => Config::from_file(&path),
        None => Config::load(),
    }
    .context("Failed to load song-comments config")?;
    if let Some(url) = args.database_url {
        config = config.with_database_url(url);
    }

    let database = Database::connect(&config.database_url(), &config.pool).await?;

    match migrate {
        MigrateCommands::Up { steps } => database.migrate_up(steps).await?,
        MigrateCommands::Down { steps } => database.migrate_down(Some(steps)).await?,
        MigrateCommands::Fresh => database.fresh().await?,
        MigrateCommands::Reset => database.reset().await?,
        MigrateCommands::Status => {
            let status = database.status().await?;
            for name in &status.applied {
                println!("applied  {}", name);
            }
            for name in &status.pending {
                println!("pending  {}", name);
            }
        }
    }

    Ok(())
}
