//! Rust struct emission, built with `quote` and formatted with `prettyplease`.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::StructRenderer;
use crate::errors::{GenerateError, Result};
use crate::model::{FieldDef, FieldType, ModelSet, StructDef};
use crate::naming::{is_rust_keyword, snake_case};

/// Renders serde-derived Rust structs. Column tags become a `column:` doc line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl StructRenderer for RustRenderer {
    fn render(&self, models: &ModelSet) -> Result<String> {
        let structs = models
            .structs
            .iter()
            .map(struct_tokens)
            .collect::<Result<Vec<_>>>()?;

        let output = quote! {
            //! Generated by modelgen. Do not edit manually.

            use serde::{Deserialize, Serialize};

            #(#structs)*
        };

        let syntax_tree: syn::File = syn::parse2(output).map_err(|err| GenerateError::Render(err.to_string()))?;
        Ok(prettyplease::unparse(&syntax_tree))
    }

    fn file_name(&self, struct_name: &str) -> String {
        format!("{}.rs", snake_case(struct_name))
    }
}

fn struct_tokens(def: &StructDef) -> Result<TokenStream> {
    let name = ident(&def.name)?;
    let fields = def.fields.iter().map(field_tokens).collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct #name {
            #(#fields)*
        }
    })
}

fn field_tokens(field: &FieldDef) -> Result<TokenStream> {
    let name = ident(&snake_case(&field.name))?;
    let ty = type_tokens(&field.ty)?;
    let rename = &field.serialized_name;
    let doc = field
        .column
        .as_ref()
        .map(|column| column.tag_string())
        .filter(|tags| !tags.is_empty())
        .map(|tags| {
            let line = format!(" column: {tags}");
            quote! { #[doc = #line] }
        });

    Ok(quote! {
        #doc
        #[serde(rename = #rename)]
        pub #name: #ty,
    })
}

fn type_tokens(ty: &FieldType) -> Result<TokenStream> {
    Ok(match ty {
        FieldType::Integer => quote!(i64),
        FieldType::Float => quote!(f64),
        FieldType::String => quote!(String),
        FieldType::DateTime => quote!(::chrono::NaiveDateTime),
        FieldType::Bool => quote!(bool),
        FieldType::Decimal => quote!(::rust_decimal::Decimal),
        FieldType::Named(name) => {
            let name = ident(name)?;
            quote!(#name)
        }
    })
}

/// Build an identifier, escaping keywords. Path keywords cannot be raw, so they get a suffix.
fn ident(name: &str) -> Result<Ident> {
    match name {
        "self" | "Self" | "super" | "crate" => return ident(&format!("{name}_")),
        _ => {}
    }
    let source = if is_rust_keyword(name) {
        format!("r#{name}")
    } else {
        name.to_string()
    };
    syn::parse_str::<Ident>(&source)
        .map_err(|err| GenerateError::Render(format!("'{name}' is not a valid identifier: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnTags;

    #[test]
    fn test_render_parses_back() {
        let mut user = StructDef::new("User");
        user.fields.push(
            FieldDef::new("Id", "Id", FieldType::Integer).with_column(ColumnTags {
                primary_key: true,
                auto_increment: true,
                not_null: true,
                ..Default::default()
            }),
        );
        user.fields.push(FieldDef::new("Type", "Type", FieldType::String));
        user.fields.push(FieldDef::new("CreatedAt", "CreatedAt", FieldType::DateTime));
        let mut set = ModelSet::new("model");
        set.structs.push(user);

        let source = RustRenderer.render(&set).unwrap();
        syn::parse_file(&source).expect("rendered source should parse");

        assert!(source.contains("pub struct User {"));
        assert!(source.contains("#[serde(rename = \"Id\")]"));
        assert!(source.contains("pub id: i64,"));
        assert!(source.contains("pub r#type: String,"));
        assert!(source.contains("pub created_at: ::chrono::NaiveDateTime,"));
        assert!(source.contains("/// column: primaryKey;autoIncrement;not null"));
    }

    #[test]
    fn test_reserved_path_keywords_get_suffix() {
        assert_eq!(ident("self").unwrap().to_string(), "self_");
        assert_eq!(ident("match").unwrap().to_string(), "r#match");
        assert!(ident("9lives").is_err());
    }
}
