//! Quorum demo runner.
//!
//! Usage:
//!   quorum-demo --query 1,0
//!   quorum-demo --config quorum.toml --query 0.2,0.9 --top-k 2
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - log filter (default: info,quorum_coordinator=debug)

use quorum_common::Query;
use quorum_coordinator::{Assembly, CoordinatorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quorum_coordinator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut query_text = String::from("1,0");
    let mut top_k: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if let Some(value) = flag_value(&args, i) {
                    config_path = Some(value.to_string());
                    i += 1;
                }
            }
            "--query" | "-q" => {
                if let Some(value) = flag_value(&args, i) {
                    query_text = value.to_string();
                    i += 1;
                }
            }
            "--top-k" | "-k" => {
                if let Some(value) = flag_value(&args, i) {
                    top_k = Some(
                        value
                            .parse()
                            .map_err(|e| anyhow::anyhow!("Invalid --top-k '{}': {}", value, e))?,
                    );
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Quorum demo runner");
                println!();
                println!("Usage: quorum-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>   Path to a TOML config (default: built-in corpus)");
                println!("  -q, --query <VECTOR>  Comma-separated query vector (default: 1,0)");
                println!("  -k, --top-k <N>       Override each tool's result limit");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => {
                tracing::warn!(argument = %other, "Ignoring unknown argument");
            }
        }
        i += 1;
    }

    let config = if let Some(path) = config_path {
        tracing::info!(path = %path, "Loading configuration");
        CoordinatorConfig::from_file(&path)?
    } else {
        tracing::info!("Using built-in demo configuration");
        CoordinatorConfig::demo()
    };

    let Assembly { memory, supervisor } = config.build()?;

    let mut query = Query::new(Query::parse_vector(&query_text)?);
    if let Some(k) = top_k {
        query = query.with_top_k(k);
    }

    let response = supervisor.delegate_task(&query).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    let snapshot = memory.snapshot().await;
    tracing::debug!(
        memory = %serde_json::to_string(&snapshot)?,
        records = memory.total_records().await,
        "Memory after delegation"
    );

    Ok(())
}

/// Value following the flag at `args[i]`, warning when it is missing.
fn flag_value(args: &[String], i: usize) -> Option<&str> {
    match args.get(i + 1) {
        Some(value) => Some(value.as_str()),
        None => {
            tracing::warn!(flag = %args[i], "Missing value for flag, ignoring it");
            None
        }
    }
}
