//! SQL-to-model generation.
//!
//! DDL text is grouped into tables by [`TableScanner`], each table becomes a
//! [`StructDef`](crate::model::StructDef), and every struct is rendered into its
//! own file.
//!
//! ```
//! use modelgen::sql::{generate, SqlOptions};
//!
//! let files = generate(
//!     "CREATE TABLE `user` (`id` int NOT NULL, `name` varchar(100) DEFAULT 'anon', PRIMARY KEY (`id`));",
//!     &SqlOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(files[0].file_name, "user.go");
//! assert!(files[0].contents.contains(r#"Id int `json:"Id" gorm:"primaryKey;autoIncrement;not null"`"#));
//! ```

mod assemble;
mod driver;
mod lexer;
mod scanner;
mod types;

use crate::errors::Result;
use crate::model::{ModelSet, RenderedFile};
use crate::render::Target;

pub use assemble::{PrimaryKeyPolicy, assemble_struct, struct_name};
pub use driver::{DirReport, FileOutcome, discover_sql_files, generate_dir, generate_sql_file};
pub use lexer::{
    ColumnDefinition, closes_table, extract_primary_keys, extract_table_name, paren_balance, parse_column,
    split_fragments,
};
pub use scanner::{TableDefinition, TableScanner, scan_tables};
pub use types::map_sql_type;

/// Settings for one SQL-to-model run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlOptions {
    /// Package name written into Go output.
    pub package: String,
    pub primary_keys: PrimaryKeyPolicy,
    pub target: Target,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            package: "model".to_string(),
            primary_keys: PrimaryKeyPolicy::default(),
            target: Target::default(),
        }
    }
}

/// Build one model set per table of `sql`, in file order.
pub fn build_models(sql: &str, options: &SqlOptions) -> Vec<ModelSet> {
    scan_tables(sql)
        .iter()
        .map(|table| {
            let mut models = ModelSet::new(&options.package);
            models.structs.push(assemble_struct(table, options.primary_keys));
            models
        })
        .collect()
}

/// Render one file per table of `sql`.
pub fn generate(sql: &str, options: &SqlOptions) -> Result<Vec<RenderedFile>> {
    let renderer = options.target.renderer();
    build_models(sql, options)
        .into_iter()
        .map(|models| {
            let file_name = renderer.file_name(&models.structs[0].name);
            let contents = renderer.render(&models)?;
            Ok(RenderedFile { file_name, contents })
        })
        .collect()
}
