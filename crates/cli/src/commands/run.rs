//! `run` command implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::info::{build_config_info, print_config_info};
use super::{load_configuration, source_name};
use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let source = source_name(args.config.as_deref());
    info!(config = %source, "Loading configuration");

    let configuration = load_configuration(args.config.as_deref())?;
    for warning in config_loader::collect_warnings(&configuration) {
        warn!("{warning}");
    }

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_info(&build_config_info(&configuration, source)?);
        return Ok(());
    }

    let pipeline_config = PipelineConfig {
        configuration,
        input: args.input.clone(),
        output: args.output.clone(),
        max_ticks: (args.max_ticks > 0).then_some(args.max_ticks),
        progress: !args.no_progress && !args.json,
        metrics_port: (args.metrics_port > 0).then_some(args.metrics_port),
    };

    let stop = Arc::new(AtomicBool::new(false));
    let signal = tokio::spawn(shutdown_signal(Arc::clone(&stop)));

    info!("Starting pipeline...");
    let result = Pipeline::new(pipeline_config).run(stop).await;
    signal.abort();
    let stats = result?;

    info!(
        ticks = stats.ticks,
        navigation_time = stats.final_time,
        duration_secs = stats.duration.as_secs_f64(),
        "Pipeline completed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        stats.print_summary();
    }

    Ok(())
}

/// Raise `stop` on Ctrl-C; the pipeline ends after the current tick
async fn shutdown_signal(stop: Arc<AtomicBool>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("Received shutdown signal, stopping pipeline...");
            stop.store(true, Ordering::Relaxed);
        }
        Err(e) => warn!(error = %e, "Failed to install Ctrl-C handler"),
    }
}
