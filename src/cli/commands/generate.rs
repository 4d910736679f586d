//! Generate command implementation

use crate::cli::utils;
use crate::sample::SAMPLE_CRD;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate a Terraform module from a CRD")
        .args(utils::input_args())
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the module to this file instead of stdout")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("max-depth")
                .long("max-depth")
                .help("Object nesting levels expanded into individual variables")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("resource-type")
                .long("resource-type")
                .help("Resource type label (defaults to the lowercased kind)")
                .value_name("NAME"),
        )
        .arg(
            clap::Arg::new("no-header")
                .long("no-header")
                .help("Omit the source comment at the top of the module")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    info!("Starting Terraform module generation");

    let mut config = utils::load_config(matches)?;

    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        config.generation.max_depth = *max_depth;
    }

    if let Some(resource_type) = matches.get_one::<String>("resource-type") {
        config.generation.resource_type = Some(resource_type.clone());
    }

    if matches.get_flag("no-header") {
        config.generation.source_header = false;
    }

    if let Some(output_path) = matches.get_one::<String>("output") {
        config.output.path = Some(crate::utils::expand_path(output_path)?);
    }

    let output_path: Option<PathBuf> = config.output.path.clone();
    let app = utils::create_app(config)?;

    let result = if matches.get_flag("sample") {
        app.generate(SAMPLE_CRD)?
    } else {
        let input = matches
            .get_one::<String>("input")
            .ok_or_else(|| anyhow::anyhow!("No input CRD given"))?;
        app.generate_file(&crate::utils::expand_path(input)?)?
    };

    match output_path {
        Some(path) => {
            crate::utils::write_output(&path, &result.module)?;
            info!(
                "Wrote module for resource {:?} ({} variables) to {:?}",
                result.resource_name, result.variables_generated, path
            );
        }
        None => print!("{}", result.module),
    }

    if !result.skipped_fields.is_empty() {
        info!(
            "Skipped top-level fields without nested properties: {}",
            result.skipped_fields.join(", ")
        );
    }

    Ok(())
}
