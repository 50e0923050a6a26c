use batchstream::application::engine::AggregationEngine;
use batchstream::application::pipeline::{ingest_one, run_batch};
use batchstream::application::ticker::StreamTicker;
use batchstream::domain::events::OrderEvent;
use batchstream::domain::generator::{IdStrategy, OrderGenerator};
use batchstream::interfaces::csv::order_reader::OrderReader;
use batchstream::interfaces::presenter::{OutputFormat, Presenter};
use batchstream::telemetry;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed the session with orders from a CSV file (order_id,customer,amount,time)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Seed for the random order generator
    #[arg(long, env = "BATCHSTREAM_SEED", global = true)]
    seed: Option<u64>,

    /// Identify generated orders as O1, O2, ... instead of random numbers
    #[arg(long, global = true)]
    sequential_ids: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "BATCHSTREAM_FORMAT",
        global = true
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add orders, then aggregate all of them in one job
    Batch {
        /// Orders to generate before the job runs
        #[arg(long, default_value_t = 5)]
        orders: usize,

        /// Simulated duration of the batch job, in milliseconds
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,
    },
    /// Add one order per interval and refresh the totals after each
    Stream {
        /// Orders to stream; 0 runs until Ctrl-C
        #[arg(long, default_value_t = 10)]
        ticks: u64,

        /// Milliseconds between orders
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

struct StreamSession {
    generator: OrderGenerator,
    events: broadcast::Receiver<OrderEvent>,
    presenter: Presenter<io::Stdout>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let engine = AggregationEngine::in_memory();
    if let Some(path) = &cli.input {
        load_orders(&engine, path).await?;
    }

    let ids = if cli.sequential_ids {
        IdStrategy::Sequential
    } else {
        IdStrategy::Random
    };
    let generator = match cli.seed {
        Some(seed) => OrderGenerator::seeded(seed),
        None => OrderGenerator::from_entropy(),
    }
    .with_id_strategy(ids);

    match cli.command {
        Command::Batch { orders, latency_ms } => {
            let mut generator = generator;
            let mut presenter = Presenter::new(cli.format, io::stdout());
            presenter.batch_started().into_diagnostic()?;

            let latency = Duration::from_millis(latency_ms);
            let totals = run_batch(&engine, &mut generator, orders, latency)
                .await
                .into_diagnostic()?;
            let orders = engine.orders().await.into_diagnostic()?;

            presenter.batch_finished().into_diagnostic()?;
            presenter.batch_report(&orders, &totals).into_diagnostic()?;
            presenter.flush().into_diagnostic()?;
        }
        Command::Stream { ticks, interval_ms } => {
            let limit = (ticks > 0).then_some(ticks);
            run_stream(
                engine,
                generator,
                cli.format,
                limit,
                Duration::from_millis(interval_ms),
            )
            .await?;
        }
    }

    Ok(())
}

/// Appends every well-formed order in `path` to the session.
async fn load_orders(engine: &AggregationEngine, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let reader = OrderReader::new(file);
    let mut loaded = 0usize;

    for order_result in reader.orders() {
        match order_result {
            Ok(order) => {
                if let Err(e) = engine.append(order).await {
                    warn!(error = %e, "Order rejected");
                    eprintln!("Rejected order: {}", e);
                } else {
                    loaded += 1;
                }
            }
            Err(e) => {
                eprintln!("Error reading order: {}", e);
            }
        }
    }

    info!(loaded, path = %path.display(), "Seeded session from file");
    Ok(())
}

async fn run_stream(
    engine: AggregationEngine,
    generator: OrderGenerator,
    format: OutputFormat,
    limit: Option<u64>,
    interval: Duration,
) -> Result<()> {
    let mut presenter = Presenter::new(format, io::stdout());
    presenter.stream_started(limit).into_diagnostic()?;

    let engine = Arc::new(engine);
    let session = Arc::new(Mutex::new(StreamSession {
        generator,
        events: engine.subscribe(),
        presenter,
    }));

    let mut ticker = StreamTicker::new(interval);
    if let Some(max) = limit {
        ticker = ticker.max_ticks(max);
    }

    let handle = ticker.spawn(move |tick| {
        let engine = Arc::clone(&engine);
        let session = Arc::clone(&session);
        async move {
            let mut session = session.lock().await;
            let StreamSession {
                generator,
                events,
                presenter,
            } = &mut *session;

            let update = ingest_one(&engine, generator).await?;
            while let Ok(OrderEvent::Appended(order)) = events.try_recv() {
                presenter.order_appended(&order)?;
            }
            presenter.stream_update(tick.index, &update)
        }
    });

    let stopper = handle.stopper();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping stream");
            stopper.stop();
        }
    });

    let completed = handle.join().await.into_diagnostic()?;
    info!(ticks = completed, "Stream finished");
    Ok(())
}
