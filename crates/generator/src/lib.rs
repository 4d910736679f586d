//! Terraform module generation from extracted CRD schemas

pub mod config;
pub mod fragment;
pub mod generator;
pub mod result;

pub use config::ModuleOptions;
pub use fragment::{Fragment, ModuleBuilder};
pub use generator::ModuleGenerator;
pub use result::ModuleResult;

use std::collections::BTreeMap;
use tfmod_crd::SchemaNode;

/// Generate a module with default options
pub fn generate_module(title: &str, fields: &BTreeMap<String, SchemaNode>) -> String {
    ModuleGenerator::default().generate_module(title, fields)
}
