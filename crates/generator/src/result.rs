//! Result types for generation operations

/// Generated module together with what went into it
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleResult {
    /// Rendered module text
    pub module: String,

    pub resource_type: String,

    pub resource_name: String,

    /// Per-field variables, not counting the `namespace`/`name` header
    pub variables_generated: usize,

    /// Top-level fields that produced no declarations
    pub skipped_fields: Vec<String>,
}
