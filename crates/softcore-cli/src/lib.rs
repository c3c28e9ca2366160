//! Host harness for SoftcoreRedux
//!
//! Stands in for the host process: reads a dataset dump, runs one patch with
//! the SoftcoreRedux plan and writes the patched tables back.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use softcore_changers::SoftcorePlanner;
use softcore_config::{ConfigServer, Configuration};
use softcore_dataset::Dataset;
use softcore_engine::{PatchOrchestrator, Reporter, RunSummary};

/// Inputs of `softcore patch`
#[derive(Debug, Clone)]
pub struct PatchArgs {
    /// Configuration file
    pub config: PathBuf,
    /// Dataset dump to patch
    pub dataset: PathBuf,
    /// Where to write the patched dump; the input is overwritten if absent
    pub output: Option<PathBuf>,
    /// Force debug messages on, whatever `general.debug` says
    pub debug: bool,
}

impl PatchArgs {
    /// Path the patched dump goes to
    #[must_use]
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.dataset)
    }
}

/// Load and validate a configuration file
///
/// # Errors
/// Fails with the `CONFIG_LOAD_ERROR` cause if the file is missing or invalid.
pub fn load_config(path: &Path) -> Result<Configuration> {
    let mut server = ConfigServer::new(path);
    server.load()?;
    Ok(server.into_config()?)
}

/// Read a dataset dump
///
/// # Errors
/// Fails if the file cannot be read or is not a dump of known tables.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading dataset {}", path.display()))?;
    Dataset::from_json(&text).with_context(|| format!("parsing dataset {}", path.display()))
}

/// Write a dataset dump
///
/// # Errors
/// Fails if the file cannot be written.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let text = dataset.to_json_pretty()?;
    std::fs::write(path, text).with_context(|| format!("writing dataset {}", path.display()))
}

/// `softcore patch`: load, run once, write back
///
/// # Errors
/// Configuration or dataset I/O failures. Unit failures are reported through
/// `reporter` and counted in the summary instead.
pub fn run_patch(args: &PatchArgs, reporter: Reporter) -> Result<RunSummary> {
    let mut config = load_config(&args.config)?;
    config.general.debug |= args.debug;
    let mut dataset = read_dataset(&args.dataset)?;

    let mut orchestrator = PatchOrchestrator::new(config, &SoftcorePlanner, reporter);
    let summary = orchestrator.run(&mut dataset)?;
    tracing::debug!(%summary, "patch run finished");

    write_dataset(args.output_path(), &dataset)?;
    Ok(summary)
}

/// `softcore check`: the effective configuration, defaults filled in, as JSON
///
/// # Errors
/// Fails if the configuration does not load.
pub fn run_check(config: &Path) -> Result<String> {
    let config = load_config(config)?;
    Ok(serde_json::to_string_pretty(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_input() {
        let mut args = PatchArgs {
            config: PathBuf::from("config.json5"),
            dataset: PathBuf::from("dump.json"),
            output: None,
            debug: false,
        };
        assert_eq!(args.output_path(), Path::new("dump.json"));

        args.output = Some(PathBuf::from("patched.json"));
        assert_eq!(args.output_path(), Path::new("patched.json"));
    }
}
