//! SQL column type to field type mapping.

use crate::model::FieldType;

/// Map a SQL type token to a field type.
///
/// The table is fixed and total: tokens it does not list fall back to
/// [`FieldType::String`]. Matching ignores case.
pub fn map_sql_type(token: &str) -> FieldType {
    match token.to_ascii_lowercase().as_str() {
        "int" | "integer" | "tinyint" => FieldType::Integer,
        "varchar" | "text" => FieldType::String,
        "double" => FieldType::Float,
        "datetime" => FieldType::DateTime,
        "bit" => FieldType::Bool,
        "decimal" => FieldType::Decimal,
        _ => FieldType::String,
    }
}
