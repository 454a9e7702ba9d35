use anyhow::Context as _;
use learnexia_shared::telemetry::{self, TraceSettings};

const APP_NAME: &str = "learnexia_client";

/// Logs to a trace file in the configured folder unless `--stdout` was given.
/// Falls back to stdout if the file cannot be created
pub fn init(cli: &super::cli::Cli, settings: &TraceSettings) -> anyhow::Result<()> {
    if !cli.is_to_std_out {
        match init_to_file(settings) {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("Failed to start logging to file: {e:#}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.env_filter())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to start tracing to stdout: {e}"))
}

fn init_to_file(settings: &TraceSettings) -> anyhow::Result<()> {
    let (file, path) = settings.create_trace_file(APP_NAME)?;
    let subscriber = telemetry::json_subscriber(APP_NAME, settings, file);
    telemetry::init_subscriber(subscriber)
        .with_context(|| format!("failed to start tracing to {path:?}"))?;
    eprintln!("Tracing started to file {path:?}");
    Ok(())
}
