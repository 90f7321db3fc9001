/// Tonearm - tag inspection and library import
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tonearm_cli::{
    report::{ScanReport, TagReport, TrackReport},
    AppConfig,
};
use tonearm_core::{DurationProbe, LibraryStore, MemoryLibrary, MetadataReader};
use tonearm_importer::{ImportProgress, Importer};
use tonearm_tags::{Id3MetadataReader, LoftyDurationProbe};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tonearm")]
#[command(about = "Inspect ID3 tags and import music directories", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TONEARM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tag metadata of one file as JSON
    Tags {
        /// Audio file to inspect
        file: PathBuf,
        /// Probe the audio stream when the tag has no duration
        #[arg(long)]
        probe: bool,
    },
    /// Import a directory and print the resulting tracks as JSON
    Scan {
        /// Directory to scan
        path: PathBuf,
        /// Parallel parse workers (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Tags { file, probe } => tags(&file, probe)?,
        Commands::Scan { path, workers } => scan(&config, &path, workers).await?,
    }

    Ok(())
}

fn tags(file: &Path, probe: bool) -> anyhow::Result<()> {
    let mut metadata = Id3MetadataReader::new()
        .read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if probe && metadata.duration_secs.is_none() {
        match LoftyDurationProbe::new().probe_duration(file) {
            Ok(secs) => metadata.duration_secs = Some(secs),
            Err(e) => warn!(path = %file.display(), error = %e, "Duration probe failed"),
        }
    }

    let report = TagReport::new(file.to_path_buf(), &metadata);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn scan(config: &AppConfig, path: &Path, workers: Option<usize>) -> anyhow::Result<()> {
    let mut import_config = config.import.to_import_config();
    if let Some(workers) = workers {
        import_config = import_config.with_workers(workers);
    }

    info!(path = %path.display(), workers = import_config.workers, "Scanning directory");

    let store = Arc::new(MemoryLibrary::new());
    let importer = Importer::new(Arc::clone(&store), import_config);

    let (tx, mut rx) = mpsc::channel::<ImportProgress>(64);
    let progress_task = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            debug!(
                processed = progress.processed_files,
                total = progress.total_files,
                percent = progress.percentage(),
                "Import progress"
            );
        }
    });

    let summary = importer.import_directory(path, Some(tx)).await?;
    // The sender is dropped with the import, ending the drain loop
    progress_task.await?;

    let tracks = store
        .tracks()?
        .iter()
        .map(TrackReport::from)
        .collect();

    eprintln!("{}", summary.summary_text());
    let report = ScanReport { summary, tracks };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
