use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sshportal::config::{ADMIN_INVITE_TOKEN_ENV, BootstrapConfig, ServerConfig};
use sshportal::init::Initializer;
use sshportal::migrate;
use sshportal::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "sshportal")]
#[command(about = "Schema migrations and bootstrap for an SSH gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate the database, create baseline records and close stale sessions
    Init {
        #[command(flatten)]
        data: DataDir,

        /// Invite token for the administrator created on first start
        #[arg(long, env = ADMIN_INVITE_TOKEN_ENV)]
        invite_token: Option<String>,
    },

    /// Inspect or move the schema version
    Migrate {
        #[command(subcommand)]
        command: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// List every migration and whether it is applied
    Status {
        #[command(flatten)]
        data: DataDir,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply pending migrations
    Up {
        #[command(flatten)]
        data: DataDir,

        /// Stop after this migration
        #[arg(long)]
        to: Option<String>,
    },

    /// Roll back applied migrations
    Rollback {
        #[command(flatten)]
        data: DataDir,

        /// Roll back everything registered after this migration
        #[arg(long, conflicts_with = "last")]
        to: Option<String>,

        /// Roll back only the most recent migration
        #[arg(long)]
        last: bool,
    },
}

#[derive(Args)]
struct DataDir {
    /// Data directory holding the database
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
}

impl DataDir {
    fn open(self) -> anyhow::Result<SqliteStore> {
        let config = ServerConfig {
            data_dir: self.data_dir,
        };
        fs::create_dir_all(&config.data_dir)?;
        Ok(SqliteStore::new(config.db_path())?)
    }
}

fn run_init(data: DataDir, invite_token: Option<String>) -> anyhow::Result<()> {
    let store = data.open()?;
    let config = BootstrapConfig::default().with_admin_invite_token(invite_token);

    let report = Initializer::new(config).run(&store)?;

    if let Some(token) = report.seed.admin_invite_token {
        println!();
        println!("========================================");
        println!("Administrator created. Connect once with this user to");
        println!("associate your public key with the account:");
        println!();
        println!("  invite:{token}");
        println!();
        println!("========================================");
        println!();
    }

    Ok(())
}

fn run_migrate(command: MigrateCommands) -> anyhow::Result<()> {
    let registry = migrate::registry();

    match command {
        MigrateCommands::Status { data, json } => {
            let store = data.open()?;
            let status = store.migration_status(&registry)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
                return Ok(());
            }

            for entry in status {
                let applied = entry
                    .applied_at
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_else(|| "pending".to_string());
                let direction = if entry.reversible { "" } else { " (one-way)" };
                println!("{:>4}  {}{}", entry.id, applied, direction);
            }
        }
        MigrateCommands::Up { data, to } => {
            let store = data.open()?;
            let report = match to {
                Some(target) => store.migrate_to(&registry, &target, Utc::now())?,
                None => store.migrate(&registry, Utc::now())?,
            };
            info!(
                "{} migration(s) applied, {} already applied",
                report.applied.len(),
                report.skipped
            );
        }
        MigrateCommands::Rollback { data, to, last } => {
            let store = data.open()?;
            let rolled_back = match (to, last) {
                (Some(target), false) => store.rollback_to(&registry, &target)?,
                (None, true) => store.rollback_last(&registry)?.into_iter().collect(),
                _ => bail!("Specify either --to <ID> or --last"),
            };
            if rolled_back.is_empty() {
                println!("Nothing to roll back");
            }
            for id in rolled_back {
                println!("Rolled back {id}");
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sshportal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data, invite_token } => run_init(data, invite_token)?,
        Commands::Migrate { command } => run_migrate(command)?,
    }

    Ok(())
}
