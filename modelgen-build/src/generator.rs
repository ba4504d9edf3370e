//! Build-script driver for the model generators.

use anyhow::{Context, Result, bail};
use modelgen::document::{build_models, parse_document};
use modelgen::sql::{self, discover_sql_files};
use modelgen::{DocumentOptions, PrimaryKeyPolicy, RenderedFile, SqlOptions, Target, UnsupportedPolicy};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "src/generated";

/// Builder for configuring and running the model generators from `build.rs`.
pub struct ModelGenerator {
    config_file: Option<PathBuf>,
    config_output: Option<PathBuf>,
    struct_name: String,
    skip_unsupported: bool,
    sql_dir: Option<PathBuf>,
    sql_output_dir: Option<PathBuf>,
    all_primary_keys: bool,
    target: Target,
    mod_file: bool,
}

/// Files written (or left alone because they were already current) by one run.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

impl ModelGenerator {
    /// Create a generator targeting Rust with nothing configured yet.
    pub fn new() -> Self {
        Self {
            config_file: None,
            config_output: None,
            struct_name: "Config".to_string(),
            skip_unsupported: false,
            sql_dir: None,
            sql_output_dir: None,
            all_primary_keys: false,
            target: Target::Rust,
            mod_file: true,
        }
    }

    /// JSON config document to generate structs from.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Where the config structs are written.
    ///
    /// Default: `src/generated/<struct file>` named after the aggregate struct.
    pub fn config_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_output = Some(path.into());
        self
    }

    /// Name of the aggregate config struct.
    ///
    /// Default: `Config`
    pub fn struct_name(mut self, name: impl Into<String>) -> Self {
        self.struct_name = name.into();
        self
    }

    /// Leave arrays, booleans and nulls out of the config structs instead of failing.
    pub fn skip_unsupported(mut self, skip: bool) -> Self {
        self.skip_unsupported = skip;
        self
    }

    /// Directory of `.sql` files to generate table models from.
    pub fn sql_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sql_dir = Some(path.into());
        self
    }

    /// Directory receiving one file per table.
    ///
    /// Default: `src/generated/models`
    pub fn sql_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sql_output_dir = Some(path.into());
        self
    }

    /// Mark every column of a composite primary key.
    pub fn all_primary_keys(mut self, all: bool) -> Self {
        self.all_primary_keys = all;
        self
    }

    /// Language of the generated structs.
    ///
    /// Default: [`Target::Rust`]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Whether a `mod.rs` exposing every table module is written next to the
    /// Rust table models.
    ///
    /// Default: `true`
    pub fn mod_file(mut self, enabled: bool) -> Self {
        self.mod_file = enabled;
        self
    }

    /// Run every configured generator.
    ///
    /// Any failure aborts the run, so a broken schema fails the build. Files
    /// whose contents did not change are not touched.
    pub fn run(self) -> Result<GenerationSummary> {
        if self.config_file.is_none() && self.sql_dir.is_none() {
            bail!("nothing to generate: set config_file() and/or sql_dir()");
        }

        let mut summary = GenerationSummary::default();

        if let Some(input) = &self.config_file {
            let file = self.render_config(input)?;
            let output = self
                .config_output
                .clone()
                .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR).join(&file.file_name));
            summary.record(&output, write_if_changed(&output, &file.contents)?);
        }

        if let Some(dir) = &self.sql_dir {
            let output_dir = self
                .sql_output_dir
                .clone()
                .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR).join("models"));
            let files = self.render_sql_dir(dir)?;

            for file in &files {
                let output = output_dir.join(&file.file_name);
                summary.record(&output, write_if_changed(&output, &file.contents)?);
            }

            if self.mod_file && self.target == Target::Rust {
                let mod_path = output_dir.join("mod.rs");
                let contents = mod_file_contents(&files);
                summary.record(&mod_path, write_if_changed(&mod_path, &contents)?);
            }
        }

        for path in &summary.written {
            eprintln!("modelgen-build: Generated {}", path.display());
        }
        Ok(summary)
    }

    fn render_config(&self, input: &Path) -> Result<RenderedFile> {
        let options = DocumentOptions {
            struct_name: self.struct_name.clone(),
            unsupported: if self.skip_unsupported {
                UnsupportedPolicy::Skip
            } else {
                UnsupportedPolicy::Error
            },
            target: self.target,
            ..Default::default()
        };

        let source = fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
        let document = parse_document(&source, input)?;
        let models = build_models(&document, &options)
            .with_context(|| format!("Failed to generate structs from {}", input.display()))?;

        let renderer = self.target.renderer();
        Ok(RenderedFile {
            file_name: renderer.file_name(&options.struct_name),
            contents: renderer.render(&models)?,
        })
    }

    fn render_sql_dir(&self, dir: &Path) -> Result<Vec<RenderedFile>> {
        let options = SqlOptions {
            primary_keys: if self.all_primary_keys {
                PrimaryKeyPolicy::AllColumns
            } else {
                PrimaryKeyPolicy::FirstMatch
            },
            target: self.target,
            ..Default::default()
        };

        let mut files = Vec::new();
        for input in discover_sql_files(dir).with_context(|| format!("Failed to scan {}", dir.display()))? {
            let contents =
                fs::read_to_string(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let rendered =
                sql::generate(&contents, &options).with_context(|| format!("Failed to generate {}", input.display()))?;
            for file in rendered {
                if files.iter().any(|earlier: &RenderedFile| earlier.file_name == file.file_name) {
                    bail!("{}: {} is already generated by an earlier table", input.display(), file.file_name);
                }
                files.push(file);
            }
        }
        Ok(files)
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSummary {
    fn record(&mut self, path: &Path, written: bool) {
        if written {
            self.written.push(path.to_path_buf());
        } else {
            self.unchanged.push(path.to_path_buf());
        }
    }
}

/// Write `contents` unless the file already holds exactly that. Returns whether it wrote.
fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// `mod.rs` declaring and re-exporting every generated table module.
fn mod_file_contents(files: &[RenderedFile]) -> String {
    let mut modules: Vec<&str> = files
        .iter()
        .filter_map(|file| file.file_name.strip_suffix(".rs"))
        .collect();
    modules.sort_unstable();
    modules.dedup();

    let mut content = String::from("//! Generated by modelgen-build. Do not edit manually.\n\n");
    for module in &modules {
        content.push_str(&format!("pub mod {module};\n"));
    }
    if !modules.is_empty() {
        content.push('\n');
    }
    for module in &modules {
        content.push_str(&format!("pub use {module}::*;\n"));
    }
    content
}
