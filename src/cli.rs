//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::PipelineConfig;
use crate::engine::LoopSettings;
use crate::presenter::ConsoleFormat;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "moodwave")]
#[command(about = "Synthetic EEG mood classifier", long_about = None)]
pub struct Args {
    /// JSON file with pipeline parameters (missing keys keep their defaults)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the signal simulator (entropy-seeded when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the window and print to the terminal
    #[arg(long)]
    pub console: bool,

    /// Console output as one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Stop after this many cycles
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,

    /// Inject a blink artifact every N cycles
    #[arg(long, value_name = "N")]
    pub artifact_every: Option<u64>,
}

impl Args {
    /// File config (or defaults) with command-line overrides applied.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn loop_settings(&self, config: &PipelineConfig) -> LoopSettings {
        LoopSettings {
            cycle_delay: config.cycle_delay(),
            max_cycles: self.cycles,
            artifact_every: self.artifact_every,
        }
    }

    pub fn console_format(&self) -> ConsoleFormat {
        if self.json {
            ConsoleFormat::Json
        } else {
            ConsoleFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = Args::parse_from(["moodwave"]);
        assert!(!args.console);
        let config = args.pipeline_config().unwrap();
        assert_eq!(config, PipelineConfig::default());
        let settings = args.loop_settings(&config);
        assert_eq!(settings.max_cycles, None);
        assert_eq!(settings.cycle_delay.as_millis(), 50);
        assert_eq!(args.console_format(), ConsoleFormat::Text);
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "moodwave",
            "--console",
            "--json",
            "--seed",
            "17",
            "--cycles",
            "20",
            "--artifact-every",
            "5",
        ]);
        let config = args.pipeline_config().unwrap();
        assert_eq!(config.seed, Some(17));
        let settings = args.loop_settings(&config);
        assert_eq!(settings.max_cycles, Some(20));
        assert_eq!(settings.artifact_every, Some(5));
        assert_eq!(args.console_format(), ConsoleFormat::Json);
    }
}
