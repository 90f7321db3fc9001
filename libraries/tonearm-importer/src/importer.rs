//! Import orchestration: scan, parse, resolve duration, store

use crate::{FileScanner, ImportConfig, ImportError, ImportProgress, ImportSummary, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tonearm_core::{DurationProbe, LibraryStore, MetadataReader, Track};
use tonearm_tags::{Id3MetadataReader, LoftyDurationProbe};
use tracing::{debug, error, info};

/// Imports audio files into a library store
///
/// Files are parsed on blocking tasks, at most `workers` at a time. Parses
/// share no mutable state, so only the final store writes are sequential.
pub struct Importer<S: LibraryStore + 'static> {
    store: Arc<S>,
    reader: Arc<dyn MetadataReader>,
    probe: Arc<dyn DurationProbe>,
    config: ImportConfig,
}

impl<S: LibraryStore + 'static> Importer<S> {
    /// Create an importer using ID3 tag parsing and lofty duration probing
    pub fn new(store: Arc<S>, config: ImportConfig) -> Self {
        Self {
            store,
            reader: Arc::new(Id3MetadataReader::new()),
            probe: Arc::new(LoftyDurationProbe::new()),
            config,
        }
    }

    /// Replace the metadata reader
    pub fn with_reader(mut self, reader: impl MetadataReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Replace the duration probe
    pub fn with_probe(mut self, probe: impl DurationProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Import configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Scan a directory and import every audio file found
    pub async fn import_directory(
        &self,
        directory: &Path,
        progress: Option<mpsc::Sender<ImportProgress>>,
    ) -> Result<ImportSummary> {
        let scanner = FileScanner::from_config(&self.config);
        let files = scanner.scan_directory(directory)?;
        info!(dir = %directory.display(), files = files.len(), "Starting directory import");
        Ok(self.import_files(&files, progress).await)
    }

    /// Import specific files
    ///
    /// A file that fails is recorded in [`ImportSummary::errors`] and never
    /// aborts the batch. Tracks reach the store in input order, each as soon
    /// as every earlier file has been parsed. A file counts as imported only
    /// once the store accepts it, so the last progress update always agrees
    /// with the summary. Progress sends wait for channel capacity, so the
    /// receiver must be drained.
    pub async fn import_files(
        &self,
        files: &[PathBuf],
        progress_tx: Option<mpsc::Sender<ImportProgress>>,
    ) -> ImportSummary {
        let start_time = Instant::now();
        let workers = self.config.workers.max(1);
        let semaphore = Arc::new(Semaphore::new(workers));
        debug!(files = files.len(), workers, "Importing files");

        let mut progress = ImportProgress::new(files.len());
        send_progress(progress_tx.as_ref(), &progress).await;

        let mut tasks = JoinSet::new();
        for (index, path) in files.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let reader = Arc::clone(&self.reader);
            let probe = Arc::clone(&self.probe);

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => tokio::task::spawn_blocking(move || {
                        build_track(&path, reader.as_ref(), probe.as_ref())
                    })
                    .await
                    .unwrap_or_else(|e| Err(ImportError::Task(e.to_string()))),
                    Err(e) => Err(ImportError::Task(e.to_string())),
                };
                (index, result)
            });
        }

        let mut parsed: Vec<Option<Result<Track>>> =
            std::iter::repeat_with(|| None).take(files.len()).collect();
        let mut next_to_store = 0;
        let mut summary = ImportSummary::default();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => parsed[index] = Some(result),
                Err(e) => error!(error = %e, "Import task aborted"),
            }

            while let Some(result) = parsed.get_mut(next_to_store).and_then(Option::take) {
                let path = &files[next_to_store];
                self.record(path, result, &mut summary, &mut progress);
                send_progress(progress_tx.as_ref(), &progress).await;
                next_to_store += 1;
            }
        }

        // Slots still empty belong to tasks that never reported back
        for (path, slot) in files.iter().zip(parsed).skip(next_to_store) {
            let result =
                slot.unwrap_or_else(|| Err(ImportError::Task("import task aborted".to_string())));
            self.record(path, result, &mut summary, &mut progress);
            send_progress(progress_tx.as_ref(), &progress).await;
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            successful = summary.successful,
            failed = summary.failed,
            duration_ms = summary.duration_ms,
            "Import finished"
        );
        summary
    }

    /// Store one parsed file and count the outcome
    fn record(
        &self,
        path: &Path,
        result: Result<Track>,
        summary: &mut ImportSummary,
        progress: &mut ImportProgress,
    ) {
        summary.total_processed += 1;
        progress.processed_files += 1;
        progress.current_file = Some(path.to_path_buf());

        match result.and_then(|track| self.store_track(track)) {
            Ok(track) => {
                summary.successful += 1;
                progress.successful_imports += 1;
                summary.imported.push(track.id);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to import file");
                summary.failed += 1;
                progress.failed_imports += 1;
                summary.errors.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    fn store_track(&self, track: Track) -> Result<Track> {
        self.store.add_track(track.clone())?;
        Ok(track)
    }
}

/// Parse one file into a catalog track
///
/// A duration the tag does not provide comes from the probe; a probe failure
/// leaves it at 0.
fn build_track(path: &Path, reader: &dyn MetadataReader, probe: &dyn DurationProbe) -> Result<Track> {
    let mut metadata = reader.read(path)?;

    if metadata.duration_secs.is_none() {
        metadata.duration_secs = match probe.probe_duration(path) {
            Ok(secs) => Some(secs),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Duration probe failed, using 0");
                Some(0.0)
            }
        };
    }

    Ok(Track::from_metadata(metadata, path.to_path_buf()))
}

async fn send_progress(tx: Option<&mpsc::Sender<ImportProgress>>, progress: &ImportProgress) {
    if let Some(tx) = tx {
        let _ = tx.send(progress.clone()).await;
    }
}
