//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("TfModGen - Terraform Module Generator for Kubernetes CRDs");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        println!("\nDetailed Information:");
        println!("  - Reads spec.validation.openAPIV3Schema or the storage version schema");
        println!("  - One variable per nested field of each top-level object");
        println!("  - Top-level scalar fields are skipped");
        println!("  - Fields are emitted in name order; output is reproducible");
        println!("  - Optional .tfmod-gen.yaml configuration");
    }

    Ok(())
}
