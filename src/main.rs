//! tile-batch - render a batch of tile files through a remote render service

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tile_batch::utils::logging::{LogFormat, init_logging};
use tile_batch::{
    BatchOrchestrator, Config, DisplayEntry, DisplayGrid, LONG_VERSION, RenderClient, TileFile,
    Viewport, build_info,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "tile-batch",
    version = LONG_VERSION,
    about = "Render a batch of tile files and package the results"
)]
struct Cli {
    /// Tile files to render
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render service base URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Environment light passed to the renderer
    #[arg(long)]
    light: Option<String>,

    /// Viewport used to size thumbnails, e.g. 1920x1080
    #[arg(long)]
    viewport: Option<Viewport>,

    /// Directory the package is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Log as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print the batch summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

impl Cli {
    async fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::from_env()?,
        };
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(light) = &self.light {
            config.render.light = Some(light.clone());
        }
        if let Some(viewport) = self.viewport {
            config.viewport = viewport;
        }
        config.check()?;
        Ok(config)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let build = build_info();
    debug!(version = build.version, git = build.git_hash, "Starting tile-batch");

    let config = cli.load_config().await.context("Invalid configuration")?;

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let file = TileFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(file);
    }

    let client = RenderClient::from_config(&config)?;
    info!(endpoint = %client.render_url(), "Render service");
    let orchestrator =
        BatchOrchestrator::new(Arc::new(client)).with_package_name(config.package_name.as_str());

    let mut session = orchestrator.submit(files, &config.render);
    let mut grid = DisplayGrid::for_batch(config.viewport, session.dispatched());

    while let Some(outcome) = session.next_outcome().await {
        match grid.push(&outcome) {
            DisplayEntry::Thumbnail { edge, image, .. } => {
                println!("[ok]   {} ({} bytes, {}px)", outcome.identity(), image.len(), edge)
            }
            entry @ DisplayEntry::Placeholder { .. } => println!("[fail] {}", entry.caption()),
        }
    }

    let summary = session.summary();
    if cli.summary_json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "{} rendered, {} failed, {} total",
            summary.succeeded, summary.failed, summary.total
        );
    }

    let package = session.finalize().await.context("Failed to build package")?;
    tokio::fs::create_dir_all(&cli.output)
        .await
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let path = package.save_to(&cli.output).await?;
    println!("{} entries written to {}", package.entries, path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogFormat::from_json_flag(cli.json_logs)) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
