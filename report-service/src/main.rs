use std::{fs, time::Duration};

use anyhow::Result;
use report_service::{config::AppConfig, observability, sources, Pipeline, Poller};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Configuration and reference data failures are fatal: without the
    // factor tables no generator calculation is possible.
    let cfg = AppConfig::load()?;
    let reference = sources::load_reference_data(&cfg.reference_data_path)?;

    fs::create_dir_all(&cfg.output_dir)?;

    let pipeline = Pipeline::new(reference, &cfg.output_dir);
    let poller = Poller::new(
        &cfg.input_dir,
        Duration::from_secs(cfg.poll_interval_secs),
        pipeline,
    );

    tracing::info!(
        input_dir = %cfg.input_dir.display(),
        output_dir = %cfg.output_dir.display(),
        poll_interval_secs = cfg.poll_interval_secs,
        "generation report service started"
    );

    // Processing within a cycle is synchronous, so the poll future can
    // only be cancelled at its timer wait: shutdown lands between
    // cycles, never mid-file.
    tokio::select! {
        res = poller.run() => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested, stopping");
            Ok(())
        }
    }
}
