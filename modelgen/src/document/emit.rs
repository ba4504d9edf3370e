//! Breadth-first struct emission over a normalized JSON document.
//!
//! Every struct, nested ones included, gets a field typed by reference for each
//! of its child objects, so the whole document stays reachable from the
//! aggregate. Only the aggregate mirrors the top level.

use std::collections::{HashSet, VecDeque};

use log::{debug, warn};
use serde_json::{Map, Value};

use super::classify::{ValueKind, classify};
use super::{DocumentOptions, UnsupportedPolicy};
use crate::errors::{GenerateError, Result};
use crate::model::{FieldDef, FieldType, ModelSet, StructDef};
use crate::naming::title_case;

/// A nested object waiting for its struct to be emitted.
struct PendingType<'a> {
    name: String,
    path: String,
    fields: &'a Map<String, Value>,
}

/// State for one emission run.
struct Emitter<'a> {
    options: &'a DocumentOptions,
    queue: VecDeque<PendingType<'a>>,
    taken: HashSet<String>,
}

/// Build the nested structs and the aggregate struct for `root`.
///
/// Nested structs come first, in breadth-first discovery order; the aggregate
/// struct named by `options.struct_name` is last.
pub fn emit_models(root: &Map<String, Value>, options: &DocumentOptions) -> Result<ModelSet> {
    let mut emitter = Emitter {
        options,
        queue: VecDeque::new(),
        taken: HashSet::from([options.struct_name.clone()]),
    };

    let aggregate = emitter.emit_struct(&options.struct_name, "", root)?;

    let mut models = ModelSet::new(&options.package);
    while let Some(pending) = emitter.queue.pop_front() {
        debug!("emitting nested struct {} for '{}'", pending.name, pending.path);
        let nested = emitter.emit_struct(&pending.name, &pending.path, pending.fields)?;
        models.structs.push(nested);
    }
    models.structs.push(aggregate);

    Ok(models)
}

impl<'a> Emitter<'a> {
    fn emit_struct(&mut self, name: &str, path: &str, fields: &'a Map<String, Value>) -> Result<StructDef> {
        let mut def = StructDef::new(name);
        let mut references = Vec::new();
        let mut field_names = HashSet::new();

        for (key, value) in fields {
            let field_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            let field_name = title_case(key);
            let kind = classify(value);
            if !matches!(kind, ValueKind::Unsupported(_)) && !field_names.insert(field_name.clone()) {
                return Err(GenerateError::DuplicateField {
                    path: field_path,
                    name: field_name,
                });
            }

            if let Value::Object(nested) = value {
                if !self.taken.insert(field_name.clone()) {
                    return Err(GenerateError::DuplicateStruct { name: field_name });
                }
                references.push(FieldDef::new(
                    field_name.clone(),
                    key.clone(),
                    FieldType::Named(field_name.clone()),
                ));
                self.queue.push_back(PendingType {
                    name: field_name,
                    path: field_path,
                    fields: nested,
                });
                continue;
            }

            match kind {
                ValueKind::Unsupported(kind) => match self.options.unsupported {
                    UnsupportedPolicy::Error => {
                        return Err(GenerateError::UnsupportedValue { path: field_path, kind });
                    }
                    UnsupportedPolicy::Skip => {
                        warn!("skipping unsupported {kind} value at '{field_path}'");
                    }
                },
                scalar => {
                    if let Some(ty) = scalar.field_type() {
                        def.fields.push(FieldDef::new(field_name, key.clone(), ty));
                    }
                }
            }
        }

        def.fields.extend(references);
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn models_for(value: Value) -> Result<ModelSet> {
        let Value::Object(root) = value else {
            panic!("test document must be an object");
        };
        emit_models(&root, &DocumentOptions::default())
    }

    fn names(models: &ModelSet) -> Vec<&str> {
        models.structs.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_nested_structs_in_discovery_order() {
        let models = models_for(json!({"a": {"x": 1}, "b": {"y": 2}})).unwrap();
        assert_eq!(names(&models), vec!["A", "B", "Config"]);
    }

    #[test]
    fn test_breadth_first_before_children() {
        let models = models_for(json!({
            "a": {"deep": {"z": 1}},
            "b": {"y": 2}
        }))
        .unwrap();
        assert_eq!(names(&models), vec!["A", "B", "Deep", "Config"]);

        let a = models.get("A").unwrap();
        assert_eq!(a.fields.len(), 1);
        assert_eq!(a.fields[0].ty, FieldType::Named("Deep".to_string()));
    }

    #[test]
    fn test_aggregate_mirrors_top_level() {
        let models = models_for(json!({"port": 8080, "db": {"host": "localhost", "timeout": 30}})).unwrap();

        let db = models.get("Db").unwrap();
        assert_eq!(db.field("Host").unwrap().ty, FieldType::String);
        assert_eq!(db.field("Timeout").unwrap().ty, FieldType::Integer);
        assert_eq!(db.field("Host").unwrap().serialized_name, "host");

        let config = models.get("Config").unwrap();
        let fields: Vec<_> = config.fields.iter().map(|f| (f.name.as_str(), f.ty.clone())).collect();
        assert_eq!(
            fields,
            vec![
                ("Port", FieldType::Integer),
                ("Db", FieldType::Named("Db".to_string())),
            ]
        );
    }

    #[test]
    fn test_scalars_before_references() {
        let models = models_for(json!({"db": {"host": "h"}, "name": "svc", "ratio": 0.5})).unwrap();
        let config = models.get("Config").unwrap();
        let order: Vec<_> = config.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(order, vec!["Name", "Ratio", "Db"]);
    }

    #[test]
    fn test_unsupported_value_is_fatal_by_default() {
        let err = models_for(json!({"db": {"hosts": ["a", "b"]}})).unwrap_err();
        match err {
            GenerateError::UnsupportedValue { path, kind } => {
                assert_eq!(path, "db.hosts");
                assert_eq!(kind, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_value_can_be_skipped() {
        let Value::Object(root) = json!({"debug": true, "port": 1, "tags": null}) else {
            unreachable!()
        };
        let options = DocumentOptions {
            unsupported: UnsupportedPolicy::Skip,
            ..Default::default()
        };
        let models = emit_models(&root, &options).unwrap();
        let config = models.get("Config").unwrap();
        assert_eq!(config.fields.len(), 1);
        assert_eq!(config.fields[0].name, "Port");
    }

    #[test]
    fn test_duplicate_struct_names_are_rejected() {
        let err = models_for(json!({"a": {"item": {"x": 1}}, "b": {"item": {"y": 1}}})).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateStruct { name } if name == "Item"));

        let err = models_for(json!({"config": {"x": 1}})).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateStruct { name } if name == "Config"));
    }

    #[test]
    fn test_keys_with_the_same_field_name_are_rejected() {
        let err = models_for(json!({"log_level": 1, "log-level": 2})).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateField { ref path, ref name } if path == "log-level" && name == "LogLevel"));

        let err = models_for(json!({"db": {"Port": 1, "port": 2}})).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateField { ref path, ref name } if path == "db.port" && name == "Port"));
    }

    #[test]
    fn test_skipped_values_do_not_claim_field_names() {
        let options = DocumentOptions {
            unsupported: UnsupportedPolicy::Skip,
            ..Default::default()
        };
        let Value::Object(root) = json!({"debug": true, "Debug": 1}) else {
            unreachable!();
        };
        let models = emit_models(&root, &options).unwrap();
        assert_eq!(models.get("Config").unwrap().fields.len(), 1);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let first = models_for(json!({"a": {"x": 1}})).unwrap();
        let second = models_for(json!({"a": {"x": 1}})).unwrap();
        assert_eq!(first, second);
    }
}
