use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde_json::Number;
use serde_json::Value;
use tracing::debug;
use tracing::trace;

use crate::ConfigError;

pub type NodeMap = BTreeMap<String, ConfigNode>;

/// untyped configuration tree, as authored by a user or extracted
/// from an observed resource.
/// mapping keys are kept sorted so two trees compare independent of key order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigNode>),
    Map(NodeMap),
}

impl Default for ConfigNode {
    fn default() -> Self {
        Self::Map(NodeMap::new())
    }
}

impl ConfigNode {
    /// read a yaml or json document
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        debug!(path = %path.as_ref().display(), "reading document");
        let file = File::open(path.as_ref())?;
        let value: Value = serde_yaml::from_reader(file)?;
        Self::try_from(value)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(input)?;
        Self::try_from(value)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(input)?;
        Self::try_from(value)
    }

    /// convert a json value, null members and null list entries are absent
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(s) => Some(Self::String(s)),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_value).collect(),
            )),
            Value::Object(members) => Some(Self::Map(
                members
                    .into_iter()
                    .filter_map(|(key, member)| match Self::from_value(member) {
                        Some(node) => Some((key, node)),
                        None => {
                            trace!(%key, "dropping null member");
                            None
                        }
                    })
                    .collect(),
            )),
        }
    }

    /// resource documents are mappings at the top level
    pub fn into_document(self) -> Result<Self, ConfigError> {
        match self {
            Self::Map(_) => Ok(self),
            other => Err(ConfigError::InvalidNode(format!(
                "expected a mapping at the top level, found a {}",
                other.kind_name()
            ))),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigNode]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(members) => Some(members),
            _ => None,
        }
    }

    /// member of a mapping
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_map().and_then(|members| members.get(key))
    }

    /// textual form of a scalar, lists and mappings have none
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    /// true for an empty list, an empty mapping or an empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(members) => members.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// name of the node kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }
}

impl TryFrom<Value> for ConfigNode {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(ConfigError::EmptyDocument)
    }
}

impl From<&ConfigNode> for Value {
    fn from(node: &ConfigNode) -> Self {
        match node {
            ConfigNode::Bool(b) => Value::Bool(*b),
            ConfigNode::Int(i) => Value::Number((*i).into()),
            ConfigNode::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ConfigNode::String(s) => Value::String(s.clone()),
            ConfigNode::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            ConfigNode::Map(members) => Value::Object(
                members
                    .iter()
                    .map(|(key, member)| (key.clone(), Value::from(member)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigNode {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        Self::List(items)
    }
}

impl From<NodeMap> for ConfigNode {
    fn from(members: NodeMap) -> Self {
        Self::Map(members)
    }
}
