//! Subcommand implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradebook_core::config::load_config_from;
use gradebook_core::{GradebookConfig, OutputFormat, RecordStore};
use gradebook_report::{write_report, Render};

pub mod init;
pub mod menu;
pub mod records;
pub mod report;

/// An opened record store plus the settings used to display it.
pub struct Session {
    pub store: RecordStore,
    pub config: GradebookConfig,
}

impl Session {
    /// Load config, apply command-line overrides, and open the data file.
    pub fn open(
        config_path: Option<&Path>,
        data: Option<PathBuf>,
        format: Option<&str>,
    ) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(data) = data {
            config.data_file = data;
        }
        if let Some(format) = format {
            config.format = format
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
        }

        let store = RecordStore::open_file(&config.data_file).with_context(|| {
            format!("failed to load records from {}", config.data_file.display())
        })?;
        tracing::debug!(
            data_file = %config.data_file.display(),
            students = store.len(),
            "session opened"
        );

        Ok(Self { store, config })
    }

    /// Write a report to stdout in the configured format.
    pub fn print<R: Render>(&self, report: &R) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(report, self.config.format, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
