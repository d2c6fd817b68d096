use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tokio::time::MissedTickBehavior;

use crate::pipeline::Pipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InputCandidate {
    created: SystemTime,
    path: PathBuf,
}

/// The most recently created candidate wins; equal timestamps are broken
/// by the lexically greatest file name so selection stays deterministic.
fn pick_newest(candidates: Vec<InputCandidate>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .max_by(|a, b| (a.created, &a.path).cmp(&(b.created, &b.path)))
        .map(|candidate| candidate.path)
}

fn select_newest_input(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_report = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);
        if !is_report || !entry.file_type()?.is_file() {
            continue;
        }

        let meta = entry.metadata()?;
        // Not every filesystem reports a creation time.
        let created = meta.created().or_else(|_| meta.modified())?;
        candidates.push(InputCandidate { created, path });
    }

    Ok(pick_newest(candidates))
}

/// Cyclic scan/process/idle driver.
///
/// One cycle handles at most one input file and runs to completion
/// before the next tick is awaited, so two processing phases can never
/// overlap and shutdown can only land between cycles. A file that fails
/// any stage is retained and reconsidered on a later cycle; a file that
/// processes successfully is deleted.
pub struct Poller {
    input_dir: PathBuf,
    interval: Duration,
    pipeline: Pipeline,
}

impl Poller {
    pub fn new<P: Into<PathBuf>>(input_dir: P, interval: Duration, pipeline: Pipeline) -> Self {
        Self {
            input_dir: input_dir.into(),
            interval,
            pipeline,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.cycle();
        }
    }

    fn cycle(&self) {
        let candidate = match select_newest_input(&self.input_dir) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::error!(
                    dir = %self.input_dir.display(),
                    error = %e,
                    "failed to scan input directory"
                );
                return;
            }
        };

        let Some(path) = candidate else {
            tracing::debug!(dir = %self.input_dir.display(), "no input files waiting");
            return;
        };

        tracing::info!(file = %path.display(), "processing input file");
        match self.pipeline.process(&path) {
            Ok(output) => {
                metrics::counter!("input_files_processed_total").increment(1);
                if let Err(e) = fs::remove_file(&path) {
                    tracing::error!(
                        file = %path.display(),
                        error = %e,
                        "failed to delete consumed input file; it will be reprocessed"
                    );
                }
                tracing::info!(
                    file = %path.display(),
                    output = %output.display(),
                    "input file processed"
                );
            }
            Err(e) => {
                metrics::counter!("input_files_failed_total").increment(1);
                tracing::error!(
                    file = %path.display(),
                    error = %e,
                    "processing failed; input retained for next cycle"
                );
            }
        }
    }
}
