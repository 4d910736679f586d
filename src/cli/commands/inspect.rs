//! Inspect command implementation

use crate::cli::utils;
use crate::TreeFormat;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("inspect")
        .about("Print the schema tree extracted from a CRD")
        .args(utils::input_args())
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format")
                .value_parser(["yaml", "json"])
                .default_value("yaml"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let format: TreeFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("yaml")
        .parse()?;

    let config = utils::load_config(matches)?;
    let app = utils::create_app(config)?;
    let schema = utils::extract_input(&app, matches)?;

    println!("{}", app.render_tree(&schema, format)?.trim_end());

    Ok(())
}
