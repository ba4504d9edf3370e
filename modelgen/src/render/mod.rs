//! Source renderers for generated models.
//!
//! Both generators build a [`ModelSet`]; a renderer turns it into source text for
//! one target language.

mod go;
mod rust;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::ModelSet;

pub use go::GoRenderer;
pub use rust::RustRenderer;

/// Turns a [`ModelSet`] into the source of one file.
pub trait StructRenderer {
    /// Render every struct of `models`, in order, into one source file.
    fn render(&self, models: &ModelSet) -> Result<String>;

    /// File name for a file whose main struct is `struct_name`.
    fn file_name(&self, struct_name: &str) -> String;
}

/// Language the generated structs are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Go structs with `json` and `gorm` tags.
    #[default]
    Go,
    /// Rust structs deriving serde traits.
    Rust,
}

impl Target {
    pub fn renderer(self) -> Box<dyn StructRenderer> {
        match self {
            Target::Go => Box::new(GoRenderer),
            Target::Rust => Box::new(RustRenderer),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Go => "go",
            Target::Rust => "rust",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Target::Go),
            "rust" | "rs" => Ok(Target::Rust),
            other => Err(format!("unknown target '{other}', expected 'go' or 'rust'")),
        }
    }
}
