use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::path::PathBuf;

use modelgen::document::generate_file;
use modelgen::{DocumentOptions, ModelSet, Target, UnsupportedPolicy};

use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate Config Structs",
        commands: &[
            "modelgen config                                  # config.json -> internal/config/config.go",
            "modelgen config --input app.json --output cfg.go # Custom paths",
            "modelgen config --struct-name Settings           # Rename the aggregate struct",
        ],
    },
    ExampleGroup {
        title: "Targets and Leniency",
        commands: &[
            "modelgen --target rust config                    # Emit serde structs instead of Go",
            "modelgen config --skip-unsupported               # Drop arrays, booleans and nulls",
        ],
    },
];

#[derive(Args)]
pub struct ConfigArgs {
    /// JSON document to read (default: config.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Source file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the aggregate struct (default: Config)
    #[arg(long)]
    struct_name: Option<String>,

    /// Package declared in Go output (default: config)
    #[arg(long)]
    package: Option<String>,

    /// Skip arrays, booleans and nulls instead of failing
    #[arg(long)]
    skip_unsupported: bool,
}

#[derive(Serialize)]
struct ConfigRun {
    input: PathBuf,
    output: PathBuf,
    target: Target,
    structs: Vec<StructSummary>,
}

#[derive(Serialize)]
struct StructSummary {
    name: String,
    fields: usize,
}

impl ConfigRun {
    fn new(input: PathBuf, output: PathBuf, target: Target, models: &ModelSet) -> Self {
        let structs = models
            .structs
            .iter()
            .map(|def| StructSummary {
                name: def.name.clone(),
                fields: def.fields.len(),
            })
            .collect();
        Self {
            input,
            output,
            target,
            structs,
        }
    }
}

impl TableDisplay for ConfigRun {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Struct", "Fields"]);
        for summary in &self.structs {
            table.add_row(vec![Cell::new(&summary.name), Cell::new(summary.fields)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        let names: Vec<&str> = self.structs.iter().map(|s| s.name.as_str()).collect();
        format!("{} -> {} [{}]", self.input.display(), self.output.display(), names.join(","))
    }
}

pub fn handle_config(args: ConfigArgs, target: Option<Target>, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let settings = &ctx.config.config;
    let target = ctx.target(target);

    let input = args.input.unwrap_or_else(|| ctx.resolve(&settings.input));
    let output_path = args
        .output
        .unwrap_or_else(|| ctx.resolve(settings.output_for(target)));
    let options = DocumentOptions {
        struct_name: args.struct_name.unwrap_or_else(|| settings.struct_name.clone()),
        package: args.package.unwrap_or_else(|| settings.package.clone()),
        unsupported: if args.skip_unsupported {
            UnsupportedPolicy::Skip
        } else {
            settings.unsupported_policy()
        },
        target,
    };

    if ctx.has_config_file() {
        output.verbose(&format!("Using {}", ctx.config_path.display()));
    }
    output.heading("Generate Config Structs");
    output.key_value("Input", &input.display().to_string());
    output.key_value("Output", &output_path.display().to_string());
    output.key_value("Target", target.as_str());

    let models = generate_file(&input, &output_path, &options)
        .with_context(|| format!("Failed to generate structs from {}", input.display()))?;

    output.success(&format!(
        "Wrote {} struct(s) to {}",
        models.structs.len(),
        output_path.display()
    ));
    output.display(&ConfigRun::new(input, output_path, target, &models))
}
