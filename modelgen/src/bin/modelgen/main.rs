mod commands;
mod context;
mod examples;
mod output;
mod theme;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use std::fmt::Write;

use commands::{
    config::{ConfigArgs, handle_config},
    init::{InitArgs, handle_init},
    sql::{SqlArgs, handle_sql},
};
use examples::{ExampleGroup, command_examples};
use modelgen::Target;
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ARROW, PALETTE};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[("RUST_LOG", "Log filter, e.g. modelgen=debug to trace table scanning")];

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(version)]
#[command(
    about = "Generate Go or Rust structs from JSON configs and SQL schemas",
    long_about = r#"Struct generator that turns external schemas into typed source:

• JSON config documents become one struct per nested object plus an aggregate
• CREATE TABLE statements become one model file per table with column tags
• Output targets Go (json + gorm tags) or Rust (serde derives)

Commands:
  init      Write a default modelgen.toml
  config    Generate structs from a JSON config document
  sql       Generate models from a directory of .sql files
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Language of the generated structs: go or rust (default from modelgen.toml, else go)
    #[arg(long, global = true)]
    target: Option<Target>,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default modelgen.toml in the current directory
    Init(InitArgs),

    /// Generate structs from a JSON config document
    Config(ConfigArgs),

    /// Generate one model file per table from .sql files
    Sql(SqlArgs),
}

impl Cli {
    fn parse_with_styles() -> Self {
        let matches = match build_cli_command().try_get_matches() {
            Ok(matches) => matches,
            Err(err) => exit_with_clap_error(err),
        };
        Cli::from_arg_matches(&matches).unwrap_or_else(|err| exit_with_clap_error(err))
    }
}

fn exit_with_clap_error(err: clap::Error) -> ! {
    let padded = !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
    if padded {
        eprintln!();
    }
    // `exit` prints help to stdout and real errors to stderr.
    err.exit()
}

fn build_cli_command() -> Command {
    let use_color = ShouldColorize::from_env().should_colorize();
    let mut command = Cli::command()
        .after_long_help(render_top_level_appendix(use_color))
        .color(if use_color { ColorChoice::Auto } else { ColorChoice::Never })
        .styles(help_styles());

    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            *subcommand = subcommand
                .clone()
                .after_long_help(render_examples(example.groups, use_color));
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{}", stylize("Examples:", PALETTE.section, true, use_color));

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            buffer.push('\n');
        }
        let _ = writeln!(buffer, "  {}", stylize(group.title, PALETTE.heading, true, use_color));
        for command in group.commands {
            let _ = writeln!(
                buffer,
                "    {} {}",
                stylize(ARROW, PALETTE.command, false, use_color),
                stylize(command, PALETTE.command, false, use_color)
            );
        }
    }
    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let mut buffer = String::new();

    let _ = writeln!(
        buffer,
        "{}",
        stylize("Environment Variables:", PALETTE.section, true, use_color)
    );
    for (key, description) in ENVIRONMENT_VARIABLES {
        let _ = writeln!(
            buffer,
            "  {}  {}",
            stylize(key, PALETTE.key, true, use_color),
            stylize(description, PALETTE.value, false, use_color)
        );
    }

    let _ = writeln!(
        buffer,
        "\n{} {}",
        stylize("Tip:", PALETTE.section, true, use_color),
        stylize(
            "Use 'modelgen <command> --help' to view examples for each command.",
            PALETTE.command,
            false,
            use_color
        )
    );
    buffer
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    match (use_color, bold) {
        (false, _) => text.to_string(),
        (true, true) => text.color(color).bold().to_string(),
        (true, false) => text.color(color).to_string(),
    }
}

fn help_styles() -> Styles {
    Styles::styled()
        .usage(style_from_color(PALETTE.heading).bold())
        .header(style_from_color(PALETTE.section).bold())
        .literal(style_from_color(PALETTE.command))
        .placeholder(style_from_color(PALETTE.dim))
        .valid(style_from_color(PALETTE.generated))
        .invalid(style_from_color(PALETTE.skipped))
        .error(style_from_color(PALETTE.failed).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    let ansi = match color {
        ThemeColor::TrueColor { r, g, b } => return ClapColor::Rgb(RgbColor(r, g, b)),
        ThemeColor::Black => AnsiColor::Black,
        ThemeColor::Red => AnsiColor::Red,
        ThemeColor::Green => AnsiColor::Green,
        ThemeColor::Yellow => AnsiColor::Yellow,
        ThemeColor::Blue => AnsiColor::Blue,
        ThemeColor::Magenta => AnsiColor::Magenta,
        ThemeColor::Cyan => AnsiColor::Cyan,
        ThemeColor::White => AnsiColor::White,
        ThemeColor::BrightBlack => AnsiColor::BrightBlack,
        ThemeColor::BrightRed => AnsiColor::BrightRed,
        ThemeColor::BrightGreen => AnsiColor::BrightGreen,
        ThemeColor::BrightYellow => AnsiColor::BrightYellow,
        ThemeColor::BrightBlue => AnsiColor::BrightBlue,
        ThemeColor::BrightMagenta => AnsiColor::BrightMagenta,
        ThemeColor::BrightCyan => AnsiColor::BrightCyan,
        ThemeColor::BrightWhite => AnsiColor::BrightWhite,
    };
    ClapColor::Ansi(ansi)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    match cli.command {
        Commands::Init(args) => handle_init(args, &output),
        Commands::Config(args) => handle_config(args, cli.target, &output),
        Commands::Sql(args) => handle_sql(args, cli.target, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_and_subcommand_args() {
        let cli = Cli::try_parse_from([
            "modelgen", "--output", "json", "sql", "--target", "rust", "--input-dir", "ddl", "--all-primary-keys",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.target, Some(Target::Rust));
        assert!(matches!(cli.command, Commands::Sql(_)));
    }

    #[test]
    fn test_config_output_flag_is_a_path() {
        let cli = Cli::try_parse_from(["modelgen", "config", "--output", "cfg.go", "--skip-unsupported"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Table);
        assert_eq!(cli.target, None);
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(Cli::try_parse_from(["modelgen", "--target", "cobol", "sql"]).is_err());
    }

    #[test]
    fn test_examples_attach_to_known_subcommands() {
        let command = build_cli_command();
        for example in command_examples() {
            assert!(command.find_subcommand(example.name).is_some(), "{}", example.name);
        }
        let rendered = render_examples(commands::sql::EXAMPLES, false);
        assert!(rendered.starts_with("Examples:\n"));
        assert!(rendered.contains("→ modelgen sql"));
    }
}
