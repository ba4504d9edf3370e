use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use serde::Serialize;

use crate::theme::{BULLET, PALETTE, Status};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Data that can be shown as a table or on a single line
pub trait TableDisplay {
    fn to_table(&self, output: &OutputManager) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Status lines are suppressed in quiet mode and when stdout carries JSON.
    fn chatty(&self) -> bool {
        !self.options.quiet && self.options.output_format != OutputFormat::Json
    }

    fn styled_line(&self, status: Status, message: &str) -> String {
        if self.options.no_color {
            format!("{} {message}", status.glyph())
        } else {
            let color = status.color();
            format!("{} {}", status.glyph().color(color), message.color(color))
        }
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Table => println!("{}", data.to_table(self)),
            OutputFormat::Compact => println!("{}", data.to_compact()),
        }
        Ok(())
    }

    pub fn success(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.styled_line(Status::Generated, message));
        }
    }

    /// Errors always go to stderr, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.styled_line(Status::Failed, message));
    }

    pub fn warning(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.styled_line(Status::Skipped, message));
        }
    }

    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.styled_line(Status::Note, message));
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.styled_line(Status::Detail, message));
        }
    }

    pub fn heading(&self, text: &str) {
        if !self.chatty() {
            return;
        }
        if self.options.no_color {
            println!("\n{text}\n{}", "=".repeat(text.chars().count()));
        } else {
            println!("\n{}", text.color(PALETTE.heading).bold());
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if !self.chatty() {
            return;
        }
        if self.options.no_color {
            println!("  {key}: {value}");
        } else {
            println!("  {}: {}", key.color(PALETTE.key).bold(), value.color(PALETTE.value));
        }
    }

    pub fn bullet(&self, text: &str) {
        self.indented(BULLET, text);
    }

    /// Display indented text with a prefix icon
    pub fn indented(&self, icon: &str, text: &str) {
        if !self.chatty() {
            return;
        }
        if self.options.no_color {
            println!("  {icon} {text}");
        } else {
            println!("  {} {text}", icon.color(PALETTE.dim));
        }
    }

    /// Create a themed table
    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        if self.options.no_color {
            table.load_preset(comfy_table::presets::ASCII_FULL);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        }
        table
    }

    /// Add themed header to table
    pub fn add_table_header(&self, table: &mut Table, headers: &[&str]) {
        let header_cells = headers.iter().map(|header| {
            let cell = Cell::new(header).add_attribute(Attribute::Bold);
            if self.options.no_color {
                cell
            } else {
                cell.fg(TableColor::Cyan)
            }
        });
        table.set_header(header_cells);
    }

    /// Table cell colored by outcome
    pub fn status_cell(&self, ok: bool, text: &str) -> Cell {
        let cell = Cell::new(text);
        match (self.options.no_color, ok) {
            (true, _) => cell,
            (false, true) => cell.fg(TableColor::Green),
            (false, false) => cell.fg(TableColor::Red),
        }
    }
}
