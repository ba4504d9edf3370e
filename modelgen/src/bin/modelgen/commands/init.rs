use anyhow::{Context, Result};
use clap::Args;

use crate::context::CONFIG_FILE;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Create a Config File",
    commands: &[
        "modelgen init            # Write modelgen.toml with default settings",
        "modelgen init --force    # Overwrite an existing modelgen.toml",
    ],
}];

/// Starting point for modelgen.toml. Every key is optional.
pub const DEFAULT_CONFIG: &str = r#"[output]
# Language of the generated structs: "go" or "rust"
target = "go"

[config]
input = "config.json"
# Defaults to internal/config/config.go for Go and src/config.rs for Rust
# output = "internal/config/config.go"
struct_name = "Config"
package = "config"
# Leave arrays, booleans and nulls out instead of failing
skip_unsupported = false

[sql]
input_dir = "database"
# Defaults to internal/model for Go and src/model for Rust
# output_dir = "internal/model"
package = "model"
# Mark every primary-key column, not only the first one declared
all_primary_keys = false
"#;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing modelgen.toml
    #[arg(long)]
    force: bool,
}

pub fn handle_init(args: InitArgs, output: &OutputManager) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config_path = current_dir.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        output.warning(&format!("{} already exists", config_path.display()));
        output.info("Use --force to overwrite it.");
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    output.success(&format!("Created {}", config_path.display()));
    output.info("Next steps:");
    output.bullet("Run 'modelgen config' to generate structs from config.json");
    output.bullet("Run 'modelgen sql' to generate models from database/*.sql");
    Ok(())
}
