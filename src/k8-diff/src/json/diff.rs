use serde_json::Value;

use super::JsonDiff;
use super::PatchObject;
use crate::Changes;
use crate::Diff;
use crate::DiffError;

impl Changes for Value {
    type Replace = Value;
    type Patch = PatchObject;

    fn diff(&self, new: &Self) -> Result<JsonDiff, DiffError> {
        if *self == *new {
            return Ok(Diff::None);
        }
        match (self, new) {
            (Value::Object(old_val), Value::Object(new_val)) => {
                let patch = PatchObject::diff(old_val, new_val)?;
                Ok(Diff::Patch(patch))
            }
            // an object can only be patched by another object
            (Value::Object(_), Value::Array(_) | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                Err(DiffError::KindMismatch {
                    key: String::new(),
                    old: kind_name(self),
                    new: kind_name(new),
                })
            }
            // lists are ordered, any change replaces the whole list
            _ => Ok(Diff::Replace(new.clone())),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod test {

    use serde_json::json;
    use serde_json::Value;

    use super::Changes;

    #[test]
    fn test_null_comparision() {
        let n1 = Value::Null;
        let str1 = Value::String("test".to_owned());
        let str2 = Value::String("test".to_owned());

        assert!(n1.diff(&str1).expect("diff").is_replace());
        assert!(str1.diff(&str2).expect("diff").is_none());
    }

    #[test]
    fn test_object_comparision() {
        let old_spec = json!({
            "replicas": 2,
            "image": "nginx"
        });
        let new_spec = json!({
            "replicas": 3,
            "image": "nginx"
        });

        let diff = old_spec.diff(&new_spec).expect("diff");
        assert!(diff.is_patch());
        let patch = diff.as_patch_ref().expect("patch");
        assert_eq!(patch.changed_keys(), vec!["replicas"]);
        let diff_replicas = patch.get_inner_ref().get("replicas").expect("replicas");
        assert_eq!(diff_replicas.as_replace_ref(), Some(&json!(3)));
    }

    #[test]
    fn test_reordered_list_is_replaced() {
        let old_spec = json!({ "port": [ { "name": "a" }, { "name": "b" } ] });
        let new_spec = json!({ "port": [ { "name": "b" }, { "name": "a" } ] });

        let diff = old_spec.diff(&new_spec).expect("diff");
        let patch = diff.as_patch_ref().expect("patch");
        assert!(patch.get_inner_ref()["port"].is_replace());
    }

    #[test]
    fn test_object_against_scalar() {
        let old_spec = json!({ "pod": { "name": "a" } });
        let new_spec = json!({ "pod": "a" });

        let err = old_spec.diff(&new_spec).expect_err("mismatch");
        assert_eq!(err.to_string(), "member pod: a mapping can not be changed into a string");
    }

    #[test]
    fn test_removed_member_serializes_as_null() {
        use serde::Serialize;
        use serde_json::to_value;

        #[derive(Serialize)]
        struct Test {
            #[serde(skip_serializing_if = "Option::is_none")]
            choice: Option<bool>,
            value: u16,
        }

        let old_spec = to_value(Test {
            choice: Some(true),
            value: 5,
        })
        .expect("json");
        let new_spec = to_value(Test {
            choice: None,
            value: 5,
        })
        .expect("json");

        let diff = old_spec.diff(&new_spec).expect("diff");
        let patch = diff.as_patch_ref().expect("patch");
        assert!(patch.get_inner_ref()["choice"].is_delete());

        let json_diff = serde_json::to_value(patch).expect("json");
        assert_eq!(json_diff, json!({ "choice": null }));
    }
}
