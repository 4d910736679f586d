//! Init command implementation

use crate::sample::SAMPLE_CRD;
use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".tfmod-gen.yaml"),
        )
        .arg(
            clap::Arg::new("with-sample")
                .long("with-sample")
                .help("Also write the built-in sample CRD next to the configuration")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite existing files")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = match matches.get_one::<String>("output") {
        Some(path) => crate::utils::expand_path(path)?,
        None => PathBuf::from(".tfmod-gen.yaml"),
    };
    let force = matches.get_flag("force");

    info!("Initializing configuration file: {:?}", output_path);

    if output_path.exists() && !force {
        return Err(anyhow!(
            "{:?} already exists, use --force to overwrite",
            output_path
        ));
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::utils::ensure_directory(parent)?;
    }
    Config::default().save_to_file(&output_path)?;
    println!("Configuration file created: {}", output_path.display());

    if matches.get_flag("with-sample") {
        let sample_path = output_path
            .parent()
            .map(|p| p.join("sample-crd.yaml"))
            .unwrap_or_else(|| PathBuf::from("sample-crd.yaml"));

        if sample_path.exists() && !force {
            return Err(anyhow!(
                "{:?} already exists, use --force to overwrite",
                sample_path
            ));
        }

        crate::utils::write_output(&sample_path, SAMPLE_CRD)?;
        println!("Sample CRD created: {}", sample_path.display());
        println!("Try: tfmod-gen generate {}", sample_path.display());
    }

    Ok(())
}
