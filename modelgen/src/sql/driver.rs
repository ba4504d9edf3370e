//! Directory-level driver: one generated file per table, per-file error isolation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use super::{SqlOptions, generate};
use crate::errors::{GenerateError, Result};

/// What happened to one `.sql` input.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Struct files written for this input, in table order.
    pub written: Vec<PathBuf>,
    /// The failure that stopped this input, if any. Files already written stay.
    pub error: Option<GenerateError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a directory run.
#[derive(Debug, Default)]
pub struct DirReport {
    pub outcomes: Vec<FileOutcome>,
}

impl DirReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn files_written(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.written.len()).sum()
    }
}

/// List the `.sql` files directly inside `dir`, sorted by file name.
pub fn discover_sql_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| GenerateError::io(dir, err.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "sql") {
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Generate one struct file per table for every `.sql` file in `input_dir`.
///
/// Failing to list `input_dir` or to create `output_dir` aborts the run. A file
/// that cannot be read, rendered or written is recorded in its [`FileOutcome`]
/// and the remaining files are still processed. A table whose output file was
/// already written in this run is a failure of the file declaring it; the
/// earlier file is kept.
pub fn generate_dir(input_dir: &Path, output_dir: &Path, options: &SqlOptions) -> Result<DirReport> {
    let files = discover_sql_files(input_dir)?;
    fs::create_dir_all(output_dir).map_err(|err| GenerateError::io(output_dir, err))?;

    let mut report = DirReport::default();
    let mut claimed = HashSet::new();
    for input in files {
        let mut outcome = FileOutcome {
            input: input.clone(),
            written: Vec::new(),
            error: None,
        };

        if let Err(err) = generate_sql_file(&input, output_dir, options, &mut claimed, &mut outcome.written) {
            warn!("failed to generate models for {}: {err}", input.display());
            outcome.error = Some(err);
        } else {
            info!("generated {} models for {}", outcome.written.len(), input.display());
        }
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Generate the struct files of one SQL file, pushing each path as it is written.
///
/// `claimed` holds the paths written so far in the run; a path already in it is
/// a [`GenerateError::OutputCollision`] instead of an overwrite.
pub fn generate_sql_file(
    input: &Path,
    output_dir: &Path,
    options: &SqlOptions,
    claimed: &mut HashSet<PathBuf>,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let sql = fs::read_to_string(input).map_err(|err| GenerateError::io(input, err))?;

    for file in generate(&sql, options)? {
        let path = output_dir.join(&file.file_name);
        if !claimed.insert(path.clone()) {
            return Err(GenerateError::OutputCollision { path });
        }
        fs::write(&path, &file.contents).map_err(|err| GenerateError::io(&path, err))?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(())
}
