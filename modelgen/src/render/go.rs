//! Go struct emission.

use std::fmt::Write;

use super::StructRenderer;
use crate::errors::Result;
use crate::model::{FieldDef, FieldType, ModelSet, StructDef};

/// Renders Go structs with `json` tags and, for table columns, `gorm` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoRenderer;

impl StructRenderer for GoRenderer {
    fn render(&self, models: &ModelSet) -> Result<String> {
        let mut content = String::new();
        let _ = writeln!(content, "package {}", models.package);

        let mut imports = Vec::new();
        if models.uses(&FieldType::DateTime) {
            imports.push("\"time\"");
        }
        if models.uses(&FieldType::Decimal) {
            imports.push("\"github.com/shopspring/decimal\"");
        }
        match imports.as_slice() {
            [] => {}
            [single] => {
                let _ = writeln!(content);
                let _ = writeln!(content, "import {single}");
            }
            many => {
                let _ = writeln!(content);
                let _ = writeln!(content, "import (");
                for import in many {
                    let _ = writeln!(content, "\t{import}");
                }
                let _ = writeln!(content, ")");
            }
        }

        for def in &models.structs {
            let _ = writeln!(content);
            write_struct(&mut content, def);
        }

        Ok(content)
    }

    fn file_name(&self, struct_name: &str) -> String {
        format!("{}.go", struct_name.to_lowercase())
    }
}

fn write_struct(content: &mut String, def: &StructDef) {
    let _ = writeln!(content, "type {} struct {{", def.name);
    for field in &def.fields {
        let _ = writeln!(content, "\t{} {} {}", field.name, go_type(&field.ty), go_tags(field));
    }
    let _ = writeln!(content, "}}");
}

fn go_type(ty: &FieldType) -> &str {
    match ty {
        FieldType::Integer => "int",
        FieldType::Float => "float64",
        FieldType::String => "string",
        FieldType::DateTime => "time.Time",
        FieldType::Bool => "bool",
        FieldType::Decimal => "decimal.Decimal",
        FieldType::Named(name) => name,
    }
}

fn go_tags(field: &FieldDef) -> String {
    let mut tags = format!("json:\"{}\"", escape_tag(&field.serialized_name));
    if let Some(column) = &field.column {
        let gorm = column.tag_string();
        if !gorm.is_empty() {
            let _ = write!(tags, " gorm:\"{}\"", escape_tag(&gorm));
        }
    }
    format!("`{tags}`")
}

/// Struct tags live in a raw string literal: backticks cannot appear at all.
fn escape_tag(value: &str) -> String {
    value.replace('`', "'").replace('"', "\\\"")
}
