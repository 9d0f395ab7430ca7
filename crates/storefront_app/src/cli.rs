use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, ModeSetting, DEFAULT_CONFIG_FILENAME};

/// Browse property listings from the terminal
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Browse property listings from the terminal")]
pub struct Cli {
    /// Configuration file path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Listings API base URL (overrides config and environment)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// How the grid continues past the first page
    #[arg(long, value_enum)]
    pub mode: Option<ModeSetting>,

    /// Viewport width used to size the page-button window
    #[arg(long, value_name = "PX")]
    pub viewport_width: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line flags win over the environment and the config file.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.base_url {
            config.set_base_url(url);
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(width) = self.viewport_width {
            config.viewport_width = width;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
    }
}
