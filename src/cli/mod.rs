//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("tfmod-gen")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Generate Terraform module skeletons from Kubernetes CRD schemas")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(commands::generate::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::inspect::command())
            .subcommand(commands::init::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches),
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches),
            Some(("inspect", sub_matches)) => commands::inspect::run(sub_matches),
            Some(("init", sub_matches)) => commands::init::run(sub_matches),
            Some(("info", sub_matches)) => commands::info::run(sub_matches),
            _ => {
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use clap::{Arg, ArgAction, ArgMatches};
    use std::path::PathBuf;
    use tracing::{debug, info};

    use crate::sample::SAMPLE_CRD;
    use crate::{CrdSchema, TfModGen};

    /// `--config` argument shared by commands
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Positional CRD input plus `--sample`, shared by commands
    pub fn input_args() -> [Arg; 2] {
        [
            Arg::new("input")
                .help("CRD file (YAML or JSON)")
                .value_name("FILE")
                .required_unless_present("sample"),
            Arg::new("sample")
                .long("sample")
                .help("Use the built-in sample CRD instead of a file")
                .conflicts_with("input")
                .action(ArgAction::SetTrue),
        ]
    }

    /// Get configuration file path from arguments or the default locations
    pub fn get_config_path(matches: &ArgMatches) -> Result<Option<PathBuf>> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            let path = crate::utils::expand_path(config_path)?;
            if !path.is_file() {
                return Err(anyhow!("Configuration file not found: {:?}", path));
            }
            return Ok(Some(path));
        }

        Ok(crate::utils::find_config_file(&std::env::current_dir()?))
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load_config(matches: &ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches)? {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                Ok(crate::Config::from_file(&path)?)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create TfModGen instance
    pub fn create_app(config: crate::Config) -> Result<TfModGen> {
        Ok(TfModGen::new(config)?)
    }

    /// Extract the schema named by the input arguments
    pub fn extract_input(app: &TfModGen, matches: &ArgMatches) -> Result<CrdSchema> {
        if matches.get_flag("sample") {
            return Ok(app.extract(SAMPLE_CRD)?);
        }

        let input = matches
            .get_one::<String>("input")
            .ok_or_else(|| anyhow!("No input CRD given"))?;
        let path = crate::utils::expand_path(input)?;
        Ok(app.extract_file(&path)?)
    }
}
