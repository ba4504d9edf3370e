//! Turns a scanned table into a struct definition.

use log::trace;
use serde::{Deserialize, Serialize};

use super::lexer::parse_column;
use super::scanner::TableDefinition;
use super::types::map_sql_type;
use crate::model::{ColumnTags, FieldDef, StructDef};
use crate::naming::upper_camel_case;

/// Which primary-key columns receive the primary-key marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKeyPolicy {
    /// Only the first declared column of the key is marked, with auto-increment.
    /// Later key columns are left unmarked, composite keys included.
    #[default]
    FirstMatch,
    /// Every key column is marked; auto-increment only for single-column keys.
    AllColumns,
}

/// Struct name for a table: `order_item` -> `OrderItem`.
pub fn struct_name(table: &str) -> String {
    upper_camel_case(table)
}

/// Build the struct for one table, translating every column-shaped fragment.
pub fn assemble_struct(table: &TableDefinition, policy: PrimaryKeyPolicy) -> StructDef {
    let mut def = StructDef::new(struct_name(&table.name));
    let mut primary_key_emitted = false;
    let single_key = table.primary_keys.len() == 1;

    for fragment in table.fragments() {
        let Some(column) = parse_column(fragment) else {
            trace!("`{}`: skipping non-column fragment: {fragment}", table.name);
            continue;
        };

        let in_key = table.primary_keys.contains(&column.name);
        let (primary_key, auto_increment) = match policy {
            PrimaryKeyPolicy::FirstMatch if in_key && !primary_key_emitted => {
                primary_key_emitted = true;
                (true, true)
            }
            PrimaryKeyPolicy::FirstMatch => (false, false),
            PrimaryKeyPolicy::AllColumns => (in_key, in_key && single_key),
        };

        let field_name = upper_camel_case(&column.name);
        let tags = ColumnTags {
            primary_key,
            auto_increment,
            not_null: column.not_null,
            size: column.size,
            default: column.default,
            comment: column.comment,
        };
        def.fields.push(
            FieldDef::new(field_name.clone(), field_name, map_sql_type(&column.sql_type)).with_column(tags),
        );
    }

    def
}
