//! dadns - manage DirectAdmin DNS records from the command line

mod commands;

use clap::{Parser, Subcommand};
use commands::{ConnectionArgs, ListCommand, RecordCommand, ZonesCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DADNS_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "DADNS_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the domains the account can manage
    Zones(ZonesCommand),
    /// List the records of a zone
    List(ListCommand),
    /// Add a record to a zone
    Append(RecordCommand),
    /// Create or update a record, matched by name and type
    Set(RecordCommand),
    /// Delete a record, matched by name and value
    Delete(RecordCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.clone();

    // If RUST_LOG is set, use it as-is; otherwise log our crates at the
    // requested level and keep the HTTP stack quiet
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        tracing_subscriber::EnvFilter::try_new(format!(
            "dadns={level},\
             dadns_cli={level},\
             h2=warn,\
             hyper=warn,\
             reqwest=warn,\
             rustls=warn",
            level = log_level
        ))?
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    let connection = cli.connection;
    match cli.command {
        Commands::Zones(cmd) => cmd.execute(&connection),
        Commands::List(cmd) => cmd.execute(&connection),
        Commands::Append(cmd) => cmd.execute_append(&connection),
        Commands::Set(cmd) => cmd.execute_set(&connection),
        Commands::Delete(cmd) => cmd.execute_delete(&connection),
    }
}
