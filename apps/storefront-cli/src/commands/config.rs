//! # Config Commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use storefront_client::ClientConfig;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Override the API base URL written to the file
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub fn run(command: &ConfigCommand, path: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = ClientConfig::load(path).context("loading client config")?;
            print!("{}", toml_string(&config)?);
        }
        ConfigCommand::Init { base_url } => {
            let mut config = ClientConfig::default();
            if let Some(url) = base_url {
                config.api.base_url = url.clone();
            }
            config.validate().context("validating config")?;
            config.save(path).context("saving client config")?;
            println!("Config written");
        }
    }
    Ok(())
}

fn toml_string(config: &ClientConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
