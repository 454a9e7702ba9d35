//! Structured logging for native client runs
//!
//! Each run writes bunyan JSON lines to its own file inside the configured
//! trace folder.

use anyhow::Context;
use chrono::{DateTime, Local};
use std::{
    fs::{create_dir_all, File},
    path::PathBuf,
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Where a run writes its trace file and how much it records
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TraceSettings {
    /// Folder holding one file per run
    pub folder: PathBuf,
    /// Filter directive used when `RUST_LOG` is not set
    ///
    /// See <https://docs.rs/tracing-subscriber/0.3.19/tracing_subscriber/filter/struct.EnvFilter.html#directives>
    pub level: String,
}

impl TraceSettings {
    /// `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// File for a run of `app_name` that started at `started`
    pub fn trace_file_path(&self, app_name: &str, started: DateTime<Local>) -> PathBuf {
        self.folder.join(format!(
            "{}_{app_name}.log",
            started.format("%Y-%m-%dT%H-%M-%S")
        ))
    }

    /// Creates the folder if needed and opens a new trace file for this run
    pub fn create_trace_file(&self, app_name: &str) -> anyhow::Result<(File, PathBuf)> {
        create_dir_all(&self.folder)
            .with_context(|| format!("failed to create trace folder {:?}", self.folder))?;
        let file_path = self.trace_file_path(app_name, Local::now());
        let file = File::create(&file_path)
            .with_context(|| format!("failed to create trace file {file_path:?}"))?;
        Ok((file, file_path))
    }
}

/// Bunyan JSON subscriber for `app_name` writing to `sink`
pub fn json_subscriber<Sink>(
    app_name: &str,
    settings: &TraceSettings,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Registry::default()
        .with(settings.env_filter())
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(app_name.to_string(), sink))
}

/// Installs `subscriber` for the whole process and forwards `log` records to
/// it. Only call once
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("failed to set logger")?;
    set_global_default(subscriber).context("failed to set subscriber")?;
    Ok(())
}
