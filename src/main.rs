//! Semantle daily entrypoint: scheduled generation, HTTP serving and health probe.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use semantle::config::Config;
use semantle::gateway::{GatewayState, GenerateGate, create_router};
use semantle::oracle::build_oracle;
use semantle::pipeline::{DailyPipeline, PipelineConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "semantle",
    version,
    about = "Daily word selection and similarity ranking"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select (or reuse) the word for a date and write its snapshot.
    Generate(GenerateArgs),
    /// Serve the snapshot and the generation trigger over HTTP.
    Serve,
    /// Probe a running server's /healthz (exit 0 when healthy).
    HealthCheck,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Day to generate (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Wordlist, one word per line.
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// History JSON (date → word).
    #[arg(long)]
    history: Option<PathBuf>,

    /// Snapshot destination.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Word vectors (word2vec text format). Omit to use the stub oracle.
    #[arg(long)]
    vectors: Option<PathBuf>,

    /// Raw similarity a candidate needs to be kept.
    #[arg(long, allow_hyphen_values = true)]
    min_similarity: Option<f64>,

    /// Maximum records written (0 keeps everything).
    #[arg(long)]
    top_similar: Option<usize>,

    /// Attach a 0-100 min-max `score` to every record.
    #[arg(long, default_value_t = false)]
    normalize: bool,
}

impl GenerateArgs {
    fn apply(self, config: &mut Config) -> Option<NaiveDate> {
        if let Some(path) = self.wordlist {
            config.wordlist_path = Some(path);
        }
        if let Some(path) = self.history {
            config.history_path = Some(path);
        }
        if let Some(path) = self.output {
            config.snapshot_path = Some(path);
        }
        if let Some(path) = self.vectors {
            config.vectors_path = Some(path);
        }
        if let Some(min) = self.min_similarity {
            config.min_similarity = min;
        }
        if let Some(top_k) = self.top_similar {
            config.top_k = top_k;
        }
        config.normalize |= self.normalize;
        self.date
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::HealthCheck = cli.command {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = Config::from_env()?;

    match cli.command {
        Command::Generate(args) => {
            let date = args.apply(&mut config);
            config.validate()?;
            run_generate(&config, date.unwrap_or_else(|| Utc::now().date_naive())).await
        }
        Command::Serve => {
            config.validate()?;
            run_server(config).await
        }
        Command::HealthCheck => Ok(()),
    }
}

fn build_pipeline(config: &Config) -> anyhow::Result<DailyPipeline> {
    let oracle = build_oracle(config.vectors_path.as_deref())?;
    let pipeline = DailyPipeline::new(PipelineConfig::from(config), oracle)?;
    tracing::info!(
        oracle = pipeline.oracle_kind(),
        snapshot = %pipeline.snapshot_path().display(),
        "Pipeline ready"
    );
    Ok(pipeline)
}

async fn run_generate(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let config = config.clone();
    let generation = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        Ok(build_pipeline(&config)?.run(date)?)
    })
    .await??;

    tracing::info!(
        date = %generation.snapshot.date,
        word = %generation.snapshot.word,
        fresh = generation.is_fresh(),
        candidates = generation.stats.candidates,
        without_vector = generation.stats.without_vector,
        below_threshold = generation.stats.below_threshold,
        written = generation.stats.returned,
        "Generation finished"
    );
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Semantle starting"
    );

    let pipeline_config = config.clone();
    let pipeline =
        tokio::task::spawn_blocking(move || build_pipeline(&pipeline_config)).await??;

    let gate = GenerateGate::from(&config);
    if gate.is_open() {
        tracing::warn!("Generation trigger is open (scheduler or development mode)");
    }

    let state = GatewayState::new(Arc::new(pipeline), gate);
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Semantle shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("SEMANTLE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
