//! Command-line argument parsing for the scenario runner
//!
//! Supports:
//! - Replaying a YAML scenario script
//! - Overriding the panel configuration file
//! - Saving and restoring panel state across runs, in an explicit file or
//!   the default `~/.config/placepage/panel_state.json`

use clap::Parser;
use std::path::PathBuf;

use crate::config::PanelConfig;
use crate::config_paths;

/// Replays place-page scenarios against in-memory ports
#[derive(Parser, Debug)]
#[command(
    name = "placepage",
    version,
    about = "Replays place-page panel scenarios"
)]
pub struct CliArgs {
    /// Scenario script to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Panel configuration file (defaults to ~/.config/placepage/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Restore panel state from this file before the run and save it after
    #[arg(short, long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Like --state, using the state file in the config directory
    #[arg(short, long, conflicts_with = "state")]
    pub persist: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scenario: PathBuf,
    pub panel: PanelConfig,
    pub state_file: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the panel configuration and validate paths
    pub fn into_config(self) -> Result<RunConfig, String> {
        if !self.scenario.is_file() {
            return Err(format!(
                "Scenario file not found: {}",
                self.scenario.display()
            ));
        }

        let panel = match &self.config {
            Some(path) => PanelConfig::load_from(path)?,
            None => PanelConfig::load(),
        };

        let state_file = match self.state {
            Some(path) => Some(path),
            None if self.persist => Some(
                config_paths::state_file()
                    .ok_or_else(|| "No config directory available for --persist".to_string())?,
            ),
            None => None,
        };

        Ok(RunConfig {
            scenario: self.scenario,
            panel,
            state_file,
        })
    }
}
