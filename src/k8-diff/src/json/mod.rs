mod diff;

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;
use tracing::trace;

use crate::Changes;
use crate::Diff;
use crate::DiffError;

type SerdeObj = Map<String, Value>;
pub type JsonDiff = Diff<Value, PatchObject>;

/// changes between two json objects, keyed by member name
#[derive(Debug, Default, PartialEq)]
pub struct PatchObject(BTreeMap<String, JsonDiff>);

impl PatchObject {
    // diff { "a": 1,"b": 2}, { "a": 3, "c": 2} => { "a": 3, "b": null, "c": 2 }
    fn diff(old: &SerdeObj, new: &SerdeObj) -> Result<Self, DiffError> {
        let mut map = BTreeMap::new();

        for (key, new_val) in new.iter() {
            match old.get(key) {
                Some(old_val) => {
                    let diff_value = old_val.diff(new_val).map_err(|err| err.within(key))?;
                    if !diff_value.is_none() {
                        trace!(key = %key, "member changed");
                        map.insert(key.clone(), diff_value);
                    }
                }
                None => {
                    trace!(key = %key, "member added");
                    map.insert(key.clone(), Diff::Replace(new_val.clone()));
                }
            }
        }

        for key in old.keys() {
            if !new.contains_key(key) {
                trace!(key = %key, "member removed");
                map.insert(key.clone(), Diff::Delete);
            }
        }

        Ok(PatchObject(map))
    }

    pub fn get_inner_ref(&self) -> &BTreeMap<String, JsonDiff> {
        &self.0
    }

    /// names of the members that differ, in sorted order
    pub fn changed_keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// serializes as a json merge patch: removed members become null
impl Serialize for PatchObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, val) in &self.0 {
            match val {
                Diff::None => {}
                Diff::Delete => map.serialize_entry(key, &Value::Null)?,
                Diff::Patch(patch) => map.serialize_entry(key, patch)?,
                Diff::Replace(value) => map.serialize_entry(key, value)?,
            }
        }
        map.end()
    }
}
