//! Build-time model generator.
//!
//! Runs the `modelgen` JSON-config and SQL-schema generators from a build
//! script, rewriting a generated file only when its contents change so that
//! unchanged schemas do not trigger recompiles.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     modelgen_build::generate_models()
//!         .config_file("config.json")
//!         .config_output("src/generated/config.rs")
//!         .sql_dir("database")
//!         .sql_output_dir("src/generated/models")
//!         .run()
//!         .expect("Failed to generate models");
//!
//!     println!("cargo:rerun-if-changed=config.json");
//!     println!("cargo:rerun-if-changed=database");
//! }
//! ```

mod generator;

pub use generator::{GenerationSummary, ModelGenerator};
pub use modelgen::Target;

/// Create a new model generator with default settings.
///
/// # Example
///
/// ```ignore
/// modelgen_build::generate_models()
///     .sql_dir("database")
///     .target(modelgen_build::Target::Go)
///     .sql_output_dir("internal/model")
///     .run()
///     .expect("Failed to generate models");
/// ```
pub fn generate_models() -> ModelGenerator {
    ModelGenerator::new()
}
