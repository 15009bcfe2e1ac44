use std::io::{stderr, stdout};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use activity_engine::models::TransactionStatus;
use activity_engine::types::{Address, Timestamp};
use activity_engine::{ActivityStorage, AsyncEngine};
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: activity-engine [input].jsonl [log_level:optional] > [output].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone());

    let timer = Instant::now();
    engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Normalized activity in: {duration:?}");

    write_results_to_stdout(&storage)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

const HEADER: [&str; 8] = ["owner", "chain_id", "id", "hash", "status", "type", "from", "added_time"];

#[derive(Serialize)]
struct ActivityRow<'a> {
    owner: &'a Address,
    chain_id: u64,
    id: &'a str,
    hash: Option<&'a str>,
    status: TransactionStatus,
    #[serde(rename = "type")]
    kind: &'static str,
    from: &'a Address,
    added_time: Timestamp
}

fn write_results_to_stdout(storage: &ActivityStorage) -> Result<()> {
    let feeds = storage.snapshot();

    let mut output = WriterBuilder::new()
        .has_headers(false)
        .from_writer(stdout().lock());

    output.write_record(HEADER)?;

    for (_, records) in &feeds {
        for details in records {
            output.serialize(ActivityRow {
                owner: &details.owner_address,
                chain_id: details.chain_id.id(),
                id: &details.id,
                hash: details.hash.as_deref(),
                status: details.status,
                kind: details.type_info.name(),
                from: &details.from,
                added_time: details.added_time
            })?;
        }
    }

    output.flush()?;

    Ok(())
}
