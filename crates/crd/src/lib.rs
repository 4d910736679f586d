//! CRD (CustomResourceDefinition) parsing and schema extraction

pub mod error;
pub mod parser;
pub mod schema;
pub mod types;

pub use error::SchemaError;
pub use parser::{extract_schema, is_identifier, CrdParser};
pub use schema::CrdSchema;
pub use types::{FieldType, LeafSchema, ObjectSchema, SchemaNode};
