//! Text fragments of a generated module
//!
//! Generation first collects an ordered list of [`Fragment`]s and renders them
//! once at the end, so layout lives here and traversal lives in the generator.

use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// One top-level piece of module text
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Comment(String),
    Variable(VariableBlock),
    Resource(ResourceBlock),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Comment(text) => {
                for line in text.lines() {
                    writeln!(f, "# {line}")?;
                }
                Ok(())
            }
            Fragment::Variable(variable) => fmt::Display::fmt(variable, f),
            Fragment::Resource(resource) => fmt::Display::fmt(resource, f),
        }
    }
}

/// `variable "<name>" { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBlock {
    pub name: String,
    pub description: String,
    /// Terraform type constraint, e.g. `number` or `list(string)`
    pub type_expr: Option<String>,
    /// Already rendered HCL expression
    pub default: Option<String>,
}

impl VariableBlock {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            type_expr: None,
            default: None,
        }
    }
}

impl fmt::Display for VariableBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "variable {} {{", quote(&self.name))?;
        writeln!(f, "{INDENT}description = {}", quote(&self.description))?;
        if let Some(type_expr) = &self.type_expr {
            writeln!(f, "{INDENT}type = {type_expr}")?;
        }
        if let Some(default) = &self.default {
            writeln!(f, "{INDENT}default = {default}")?;
        }
        writeln!(f, "}}")
    }
}

/// Attribute assignment inside the resource body
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `name = var.variable`
    Attribute { name: String, variable: String },
    /// `name = { ... }`
    Object { name: String, bindings: Vec<Binding> },
}

impl Binding {
    fn render(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = INDENT.repeat(depth);
        match self {
            Binding::Attribute { name, variable } => {
                writeln!(out, "{indent}{} = var.{variable}", attribute_key(name))
            }
            Binding::Object { name, bindings } => {
                writeln!(out, "{indent}{} = {{", attribute_key(name))?;
                for binding in bindings {
                    binding.render(out, depth + 1)?;
                }
                writeln!(out, "{indent}}}")
            }
        }
    }
}

/// `resource "<type>" "<name>" { ... }` with the fixed metadata stanza
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceBlock {
    pub resource_type: String,
    pub name: String,
    pub body: Vec<Binding>,
}

impl fmt::Display for ResourceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut body = String::new();
        for binding in &self.body {
            binding.render(&mut body, 1)?;
        }

        writeln!(
            f,
            "resource {} {} {{",
            quote(&self.resource_type),
            quote(&self.name)
        )?;
        if !body.is_empty() {
            writeln!(f, "{body}")?;
        }
        writeln!(f, "{INDENT}metadata {{")?;
        writeln!(f, "{INDENT}{INDENT}namespace = var.namespace")?;
        writeln!(f, "{INDENT}{INDENT}name = var.name")?;
        writeln!(f, "{INDENT}}}")?;
        writeln!(f, "}}")
    }
}

/// Ordered fragment list, rendered once
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    fragments: Vec<Fragment>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Join all fragments, separated by blank lines
    pub fn render(&self) -> String {
        self.fragments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// HCL string literal, with template sequences escaped
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                quoted.push(c);
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Bare attribute name when possible, quoted otherwise
fn attribute_key(name: &str) -> String {
    if tfmod_crd::is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}
