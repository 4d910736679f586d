//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Check that a CRD has an extractable schema")
        .args(utils::input_args())
        .arg(utils::config_arg())
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating CRD schema");

    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;
    let schema = utils::extract_input(&app, matches)?;
    let skipped = schema.skipped_fields();

    println!("CRD schema is valid!");
    println!("Kind: {}", schema.kind());
    println!("Resource: {}", schema.resource_name());
    if let Some(api_version) = schema.api_version() {
        println!("API version: {api_version}");
    }
    println!(
        "Top-level fields: {} ({} schema nodes)",
        schema.fields.len(),
        schema.node_count()
    );

    for (name, node) in &schema.fields {
        let status = if skipped.contains(&name.as_str()) {
            "skipped"
        } else {
            "generated"
        };
        let required = if schema.is_field_required(name) {
            ", required"
        } else {
            ""
        };
        println!("  - {} ({}{}): {}", name, node.field_type(), required, status);
    }

    Ok(())
}
