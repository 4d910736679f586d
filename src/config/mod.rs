//! Configuration management for TfModGen

pub mod config;
pub mod generation;
pub mod output;


// Re-export main types for convenience
pub use config::Config;
pub use generation::GenerationConfig;
pub use output::OutputConfig;
