use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{config::ConfigLoadOption, features::resource_table::ResourceDescriptor};

use super::SubCommand;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
pub struct Command {
    /// Resource to open at startup, NAME[.GROUP][/VERSION] (e.g. pods, deployments.apps/v1)
    #[arg(value_name = "RESOURCE")]
    pub resource: Option<ResourceDescriptor>,

    /// Context
    #[arg(short, long, display_order = 1000)]
    pub context: Option<String>,

    /// kubeconfig path, defaults to $KUBECONFIG or ~/.kube/config
    #[arg(short = 'C', long, display_order = 1000)]
    pub kubeconfig: Option<PathBuf>,

    /// Logging
    #[arg(short = 'l', long, display_order = 1000)]
    pub logging: bool,

    /// Config file path
    #[arg(long, display_order = 1000)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Option<SubCommand>,
}

impl Command {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn config_load_option(&self) -> Result<ConfigLoadOption> {
        let option = if let Some(path) = &self.config_file {
            match path.try_exists() {
                Ok(true) => ConfigLoadOption::Path(path.clone()),
                Ok(false) => {
                    eprintln!("Config file not found: {:?}", path);

                    ConfigLoadOption::Default
                }
                Err(err) => {
                    eprintln!("Failed to check config file exists: {}", err);

                    ConfigLoadOption::Default
                }
            }
        } else {
            match xdg_config_home().map(|dir| dir.join("config.yaml")) {
                Some(path) => match path.try_exists() {
                    Ok(true) => ConfigLoadOption::Path(path),
                    Ok(false) => ConfigLoadOption::Default,
                    Err(err) => {
                        eprintln!("Failed to check config file exists: {}", err);

                        ConfigLoadOption::Default
                    }
                },
                None => ConfigLoadOption::Default,
            }
        };

        Ok(option)
    }
}

fn xdg_config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME").map(|s| PathBuf::from(s).join("kubetable")) {
        Some(path) => Some(path),
        None => dirs::home_dir().map(|home| home.join(".config").join("kubetable")),
    }
}
