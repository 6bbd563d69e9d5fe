//! CLI entry point for resolving `awsssm://` references by hand.
//!
//! Uses the same resolver a configuration host would, which makes it handy
//! for checking IAM/KMS access and parameter types from a shell.

use anyhow::Result;
use awsssm_provider::{CallContext, ResolvedValue, Resolver, ResolverConfig};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "awsssm_provider")]
#[command(about = "Resolve awsssm:// configuration references", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one URI and print its value to stdout
    Resolve {
        /// Reference such as awsssm:///prod/db/password
        #[arg(value_name = "URI")]
        uri: String,

        /// Give up after this many seconds
        #[arg(short, long, default_value_t = 30)]
        timeout_secs: u64,

        /// JSON file with region / endpoint_url / profile overrides
        #[arg(short, long)]
        config: Option<String>,

        /// Print the value as JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/awsssm_provider.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("awsssm_provider.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse::<Directive>()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            uri,
            timeout_secs,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => ResolverConfig::load(&path)?.or(ResolverConfig::from_env()),
                None => ResolverConfig::from_env(),
            };
            let resolver = Resolver::new(config);
            let ctx = CallContext::new().with_timeout(Duration::from_secs(timeout_secs));

            let value = resolver.resolve(&uri, &ctx, None).await?;
            info!(uri = %uri, list = value.as_list().is_some(), "Resolved");
            print_value(value, json)?;

            resolver.shutdown(&ctx).await?;
        }
    }

    Ok(())
}

fn print_value(value: ResolvedValue, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match value {
        ResolvedValue::Scalar(s) => println!("{s}"),
        ResolvedValue::List(items) => {
            for item in items {
                println!("{item}");
            }
        }
    }
    Ok(())
}
