//! Config-to-model generation.
//!
//! A JSON configuration document is decoded, its integral floats are normalized,
//! and every nested object becomes a struct. A final aggregate struct mirrors the
//! top level of the document.
//!
//! ```
//! use modelgen::document::{generate, DocumentOptions};
//!
//! let source = generate(r#"{"port": 8080, "db": {"host": "localhost"}}"#, &DocumentOptions::default()).unwrap();
//! assert!(source.contains("type Db struct {"));
//! assert!(source.contains("\tPort int"));
//! ```

mod classify;
mod emit;

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{GenerateError, Result};
use crate::model::ModelSet;
use crate::render::Target;

pub use classify::{ValueKind, classify, json_kind, normalize_numbers};
pub use emit::emit_models;

/// What to do with arrays, booleans and null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Abort generation.
    #[default]
    Error,
    /// Leave the field out and log a warning.
    Skip,
}

/// Settings for one config-to-model run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Name of the aggregate struct.
    pub struct_name: String,
    /// Package name written into Go output.
    pub package: String,
    pub unsupported: UnsupportedPolicy,
    pub target: Target,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            struct_name: "Config".to_string(),
            package: "config".to_string(),
            unsupported: UnsupportedPolicy::default(),
            target: Target::default(),
        }
    }
}

/// Decode `source` and normalize its numbers. `origin` is only used in errors.
pub fn parse_document(source: &str, origin: &Path) -> Result<Value> {
    let mut document: Value = serde_json::from_str(source).map_err(|source| GenerateError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    normalize_numbers(&mut document);
    Ok(document)
}

/// Build the struct models for an already decoded document.
pub fn build_models(document: &Value, options: &DocumentOptions) -> Result<ModelSet> {
    match document {
        Value::Object(root) => emit_models(root, options),
        other => Err(GenerateError::RootNotObject {
            kind: json_kind(other),
        }),
    }
}

/// Generate source for a JSON document held in memory.
pub fn generate(source: &str, options: &DocumentOptions) -> Result<String> {
    let document = parse_document(source, Path::new("<inline>"))?;
    let models = build_models(&document, options)?;
    options.target.renderer().render(&models)
}

/// Read `input`, generate, and write the result to `output`.
///
/// Nothing is written unless generation succeeds. The parent directory of
/// `output` is created when missing.
pub fn generate_file(input: &Path, output: &Path, options: &DocumentOptions) -> Result<ModelSet> {
    let source = fs::read_to_string(input).map_err(|err| GenerateError::io(input, err))?;
    let document = parse_document(&source, input)?;
    let models = build_models(&document, options)?;
    let contents = options.target.renderer().render(&models)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| GenerateError::io(parent, err))?;
    }
    fs::write(output, contents).map_err(|err| GenerateError::io(output, err))?;
    info!("wrote {} structs to {}", models.structs.len(), output.display());

    Ok(models)
}
