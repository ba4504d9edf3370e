//! modelgen core library.
//!
//! Two independent generators derive struct definitions from external schemas:
//!
//! - [`document`] turns a nested JSON configuration document into one struct per
//!   nested object plus an aggregate struct for the whole document.
//! - [`sql`] turns `CREATE TABLE` statements into one struct per table, with
//!   serialization and column-metadata tags.
//!
//! Both build a target-neutral [`model::ModelSet`] that a [`render::StructRenderer`]
//! writes out as Go or Rust source.

pub mod document;
pub mod errors;
pub mod model;
pub mod naming;
pub mod render;
pub mod sql;

pub use document::{DocumentOptions, UnsupportedPolicy};
pub use errors::*;
pub use model::{ColumnTags, FieldDef, FieldType, ModelSet, RenderedFile, StructDef};
pub use render::{GoRenderer, RustRenderer, StructRenderer, Target};
pub use sql::{PrimaryKeyPolicy, SqlOptions};
