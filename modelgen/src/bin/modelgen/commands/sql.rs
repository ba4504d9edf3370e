use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};

use modelgen::sql::{DirReport, generate_dir};
use modelgen::{PrimaryKeyPolicy, SqlOptions, Target};

use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};
use crate::theme::WRITTEN_FILE;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate Models",
        commands: &[
            "modelgen sql                                   # database/*.sql -> internal/model/*.go",
            "modelgen sql --input-dir ddl --output-dir gen  # Custom directories",
            "modelgen --target rust sql                     # Emit serde structs instead of Go",
        ],
    },
    ExampleGroup {
        title: "Primary Keys and Scripting",
        commands: &[
            "modelgen sql --all-primary-keys                # Mark every composite-key column",
            "modelgen --output json sql                     # Machine-readable per-file report",
        ],
    },
];

#[derive(Args)]
pub struct SqlArgs {
    /// Directory holding the .sql files (default: database)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving one file per table
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Package declared in Go output (default: model)
    #[arg(long)]
    package: Option<String>,

    /// Mark every primary-key column instead of the first one declared
    #[arg(long)]
    all_primary_keys: bool,
}

#[derive(Serialize)]
struct SqlRun {
    input_dir: PathBuf,
    output_dir: PathBuf,
    target: Target,
    files: Vec<SqlFileRow>,
}

#[derive(Serialize)]
struct SqlFileRow {
    file: String,
    written: Vec<String>,
    error: Option<String>,
}

impl SqlRun {
    fn new(input_dir: PathBuf, output_dir: PathBuf, target: Target, report: &DirReport) -> Self {
        let files = report
            .outcomes
            .iter()
            .map(|outcome| SqlFileRow {
                file: file_label(&outcome.input),
                written: outcome.written.iter().map(|path| file_label(path)).collect(),
                error: outcome.error.as_ref().map(ToString::to_string),
            })
            .collect();
        Self {
            input_dir,
            output_dir,
            target,
            files,
        }
    }

    fn failed(&self) -> usize {
        self.files.iter().filter(|row| row.error.is_some()).count()
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl TableDisplay for SqlRun {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["SQL File", "Generated", "Status"]);

        if self.files.is_empty() {
            table.add_row(vec![Cell::new("No .sql files found")]);
            return table;
        }

        for row in &self.files {
            let status = match &row.error {
                Some(err) => output.status_cell(false, err),
                None => output.status_cell(true, "ok"),
            };
            table.add_row(vec![Cell::new(&row.file), Cell::new(row.written.join("\n")), status]);
        }
        table
    }

    fn to_compact(&self) -> String {
        let written: usize = self.files.iter().map(|row| row.written.len()).sum();
        format!(
            "files={} written={} failed={}",
            self.files.len(),
            written,
            self.failed()
        )
    }
}

pub fn handle_sql(args: SqlArgs, target: Option<Target>, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let settings = &ctx.config.sql;
    let target = ctx.target(target);

    let input_dir = args.input_dir.unwrap_or_else(|| ctx.resolve(&settings.input_dir));
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| ctx.resolve(settings.output_dir_for(target)));
    let options = SqlOptions {
        package: args.package.unwrap_or_else(|| settings.package.clone()),
        primary_keys: if args.all_primary_keys {
            PrimaryKeyPolicy::AllColumns
        } else {
            settings.primary_key_policy()
        },
        target,
    };

    if ctx.has_config_file() {
        output.verbose(&format!("Using {}", ctx.config_path.display()));
    }
    output.heading("Generate SQL Models");
    output.key_value("Input", &input_dir.display().to_string());
    output.key_value("Output", &output_dir.display().to_string());
    output.key_value("Target", target.as_str());

    let report = generate_dir(&input_dir, &output_dir, &options)
        .with_context(|| format!("Failed to generate models from {}", input_dir.display()))?;

    for outcome in &report.outcomes {
        for path in &outcome.written {
            output.verbose(&format!("{} {}", WRITTEN_FILE, path.display()));
        }
        if let Some(err) = &outcome.error {
            output.error(&format!("{}: {err}", outcome.input.display()));
        }
    }

    let run = SqlRun::new(input_dir, output_dir, target, &report);
    output.display(&run)?;

    if report.has_failures() {
        anyhow::bail!("{} of {} SQL file(s) failed", run.failed(), run.files.len());
    }
    output.success(&format!(
        "Wrote {} model file(s) from {} SQL file(s)",
        report.files_written(),
        run.files.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::GlobalOptions;
    use modelgen::sql::FileOutcome;
    use modelgen::GenerateError;

    fn report() -> DirReport {
        DirReport {
            outcomes: vec![
                FileOutcome {
                    input: PathBuf::from("database/a.sql"),
                    written: vec![PathBuf::from("out/user.go"), PathBuf::from("out/order.go")],
                    error: None,
                },
                FileOutcome {
                    input: PathBuf::from("database/b.sql"),
                    written: Vec::new(),
                    error: Some(GenerateError::Render("bad identifier".to_string())),
                },
            ],
        }
    }

    #[test]
    fn test_sql_run_rows() {
        let run = SqlRun::new("database".into(), "out".into(), Target::Go, &report());
        assert_eq!(run.files[0].file, "a.sql");
        assert_eq!(run.files[0].written, vec!["user.go", "order.go"]);
        assert!(run.files[0].error.is_none());
        assert!(run.files[1].error.as_deref().unwrap().contains("bad identifier"));
        assert_eq!(run.failed(), 1);
        assert_eq!(run.to_compact(), "files=2 written=2 failed=1");
    }

    #[test]
    fn test_sql_run_table() {
        let manager = OutputManager::new(GlobalOptions {
            no_color: true,
            ..Default::default()
        });
        let run = SqlRun::new("database".into(), "out".into(), Target::Go, &report());
        let table = run.to_table(&manager).to_string();
        assert!(table.contains("a.sql"));
        assert!(table.contains("user.go"));
        assert!(table.contains("bad identifier"));

        let empty = SqlRun::new("database".into(), "out".into(), Target::Go, &DirReport::default());
        assert!(empty.to_table(&manager).to_string().contains("No .sql files found"));
    }
}
