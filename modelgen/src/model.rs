//! Target-neutral description of the structs a generator wants emitted.

use serde::Serialize;

/// Logical type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Integer,
    Float,
    String,
    DateTime,
    Bool,
    Decimal,
    /// Reference to another generated struct by name.
    Named(String),
}

/// Column metadata carried by fields derived from a SQL table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnTags {
    pub primary_key: bool,
    pub auto_increment: bool,
    pub not_null: bool,
    /// Raw size qualifier, e.g. `100` for `varchar(100)`.
    pub size: Option<String>,
    /// Default expression as written, quotes included.
    pub default: Option<String>,
    pub comment: Option<String>,
}

impl ColumnTags {
    /// Ordered tag list: key markers first, then nullability, size, default, comment.
    ///
    /// `not null` appears only for columns that declare it, so nullable
    /// columns carry no nullability tag at all.
    pub fn modifiers(&self) -> Vec<String> {
        let mut tags = Vec::new();
        if self.primary_key {
            tags.push("primaryKey".to_string());
        }
        if self.auto_increment {
            tags.push("autoIncrement".to_string());
        }
        if self.not_null {
            tags.push("not null".to_string());
        }
        if let Some(size) = &self.size {
            tags.push(format!("size:{size}"));
        }
        if let Some(default) = &self.default {
            tags.push(format!("default:{default}"));
        }
        if let Some(comment) = &self.comment {
            tags.push(format!("comment:'{comment}'"));
        }
        tags
    }

    /// All modifiers joined with `;`.
    pub fn tag_string(&self) -> String {
        self.modifiers().join(";")
    }
}

/// A single field of a generated struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Field name in PascalCase, e.g. `UserId`.
    pub name: String,
    /// Name used by the serialization tag.
    pub serialized_name: String,
    pub ty: FieldType,
    /// Present for fields that map a SQL column.
    pub column: Option<ColumnTags>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, serialized_name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            serialized_name: serialized_name.into(),
            ty,
            column: None,
        }
    }

    pub fn with_column(mut self, tags: ColumnTags) -> Self {
        self.column = Some(tags);
        self
    }
}

/// A generated struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Structs that render into one output file, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSet {
    /// Go package name; ignored by targets without packages.
    pub package: String,
    pub structs: Vec<StructDef>,
}

impl ModelSet {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            structs: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub(crate) fn uses(&self, ty: &FieldType) -> bool {
        self.structs
            .iter()
            .flat_map(|s| s.fields.iter())
            .any(|f| &f.ty == ty)
    }
}

/// Source text ready to be written, plus the file name it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}
