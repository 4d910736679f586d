//! TfModGen CLI binary

use anyhow::Result;

use tfmod_gen::cli::CliApp;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the generated module
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tfmod_gen=info,tfmod_crd=info,tfmod_generator=info".into()),
        )
        .init();

    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    // Run the CLI application
    CliApp::run(&matches)
}
