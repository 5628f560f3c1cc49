use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudbackup::{
    cli::{
        backup::BackupCommand, retention::RetentionCommand, schedule::ScheduleCommand,
        server::ServerCommand, storage::StorageCommand,
    },
    config::{CliConfig, FileConfig, OutputFormat, Overrides},
    Client,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloudbackup-cli")]
#[command(about = "Command-line tool to manage CloudBackup servers, schedules, retentions and storages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file in TOML format (default is $HOME/.cloudbackup-cli.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Host/domain of the CloudBackup panel
    #[arg(long, global = true, env = "BL_HOST")]
    host: Option<String>,

    /// API access key
    #[arg(long, global = true, env = "BL_ACCESS_KEY")]
    access_key: Option<String>,

    /// API secret key
    #[arg(long, global = true, env = "BL_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "BL_TIMEOUT")]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, update, remove and get information for servers
    Server {
        #[command(subcommand)]
        command: ServerCommand,
    },

    /// Create, update, remove and get information for schedules
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },

    /// Create, update, remove and get information for retention policies
    Retention {
        #[command(subcommand)]
        command: RetentionCommand,
    },

    /// Create, update, remove and get information for backup storages
    Storage {
        #[command(subcommand)]
        command: StorageCommand,
    },

    /// Information about successful backups
    Backup {
        #[command(subcommand)]
        command: BackupCommand,
    },

    /// Print the version and exit
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let file_config = FileConfig::load(cli.config.as_deref())?;
    let overrides = Overrides {
        host: cli.host,
        access_key: cli.access_key,
        secret_key: cli.secret_key,
        timeout: cli.timeout,
        format: if cli.json {
            Some(OutputFormat::Json)
        } else {
            cli.format
        },
    };
    let config = CliConfig::resolve(overrides, file_config)?;
    tracing::debug!(?config, "Resolved configuration");

    // Create client
    let client = Client::with_timeout(
        &config.host,
        &config.access_key,
        &config.secret_key,
        config.timeout,
    )?;
    let output_format = config.format;

    // Execute command
    match cli.command {
        Commands::Server { command } => {
            cloudbackup::cli::server::execute(&client, command, output_format)?
        }
        Commands::Schedule { command } => {
            cloudbackup::cli::schedule::execute(&client, command, output_format)?
        }
        Commands::Retention { command } => {
            cloudbackup::cli::retention::execute(&client, command, output_format)?
        }
        Commands::Storage { command } => {
            cloudbackup::cli::storage::execute(&client, command, output_format)?
        }
        Commands::Backup { command } => cloudbackup::cli::backup::execute(&client, command)?,
        Commands::Version => {}
    }

    Ok(())
}
