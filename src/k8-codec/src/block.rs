use tracing::debug;

use k8_config::ConfigNode;
use k8_config::NodeMap;
use k8_types::Labels;

use crate::coerce::parse_bool;
use crate::coerce::parse_int;
use crate::schema::Schema;
use crate::CodecError;
use crate::FieldPath;

/// one configuration mapping opened against its schema.
/// Required fields are checked on open, accessors attach the field path to errors
pub(crate) struct Block<'a> {
    members: &'a NodeMap,
    schema: Schema,
    path: FieldPath,
}

impl<'a> Block<'a> {
    pub fn open(node: &'a ConfigNode, schema: Schema, path: FieldPath) -> Result<Self, CodecError> {
        let members = node.as_map().ok_or_else(|| {
            CodecError::invalid_format(node.kind_name(), "a mapping").at(path.clone())
        })?;

        if let Some(missing) = schema
            .fields()
            .iter()
            .find(|f| f.is_required() && !members.contains_key(f.name))
        {
            return Err(CodecError::missing(path.child(missing.name)));
        }

        for key in members.keys() {
            if schema.field(key).is_none() {
                debug!(field = %path.child(key), "ignoring unknown field");
            }
        }

        Ok(Self {
            members,
            schema,
            path,
        })
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    fn field_path(&self, key: &str) -> FieldPath {
        self.path.child(key)
    }

    fn member(&self, key: &str) -> Option<&'a ConfigNode> {
        self.members.get(key)
    }

    fn nested_schema(&self, key: &str) -> Schema {
        self.schema
            .field(key)
            .and_then(|f| f.nested())
            .cloned()
            .unwrap_or_default()
    }

    /// member holds something. A list of one empty entry does not count,
    /// any other shape is left for `block` to reject
    pub fn populated(&self, key: &str) -> bool {
        match self.member(key) {
            Some(ConfigNode::List(items)) => match items.as_slice() {
                [] => false,
                [item] => !item.is_empty(),
                _ => true,
            },
            Some(node) => !node.is_empty(),
            None => false,
        }
    }

    /// scalar as text
    pub fn string(&self, key: &str) -> Result<Option<String>, CodecError> {
        match self.member(key) {
            Some(node) => node.scalar_string().map(Some).ok_or_else(|| {
                CodecError::invalid_format(node.kind_name(), "a string").at(self.field_path(key))
            }),
            None => Ok(None),
        }
    }

    pub fn required_string(&self, key: &str) -> Result<String, CodecError> {
        self.string(key)?
            .ok_or_else(|| CodecError::missing(self.field_path(key)))
    }

    /// scalar converted by `parse`, errors located at the member
    pub fn coerce<T, F>(&self, key: &str, parse: F) -> Result<Option<T>, CodecError>
    where
        F: FnOnce(&str) -> Result<T, CodecError>,
    {
        match self.string(key)? {
            Some(value) => parse(&value).map(Some).map_err(|e| e.at(self.field_path(key))),
            None => Ok(None),
        }
    }

    pub fn required<T, F>(&self, key: &str, parse: F) -> Result<T, CodecError>
    where
        F: FnOnce(&str) -> Result<T, CodecError>,
    {
        self.coerce(key, parse)?
            .ok_or_else(|| CodecError::missing(self.field_path(key)))
    }

    /// integer, or a string of decimal digits
    pub fn int(&self, key: &str) -> Result<Option<i64>, CodecError> {
        let node = match self.member(key) {
            Some(node) => node,
            None => return Ok(None),
        };
        if let Some(value) = node.as_i64() {
            return Ok(Some(value));
        }
        let parsed = match node.as_str() {
            Some(value) => parse_int(value),
            None => Err(CodecError::invalid_format(node.kind_name(), "an integer")),
        };
        parsed.map(Some).map_err(|e| e.at(self.field_path(key)))
    }

    /// integer within the i32 range
    pub fn int32(&self, key: &str) -> Result<Option<i32>, CodecError> {
        match self.int(key)? {
            Some(value) => i32::try_from(value).map(Some).map_err(|_| {
                CodecError::out_of_range(value.to_string(), i32::MIN as i64, i32::MAX as i64)
                    .at(self.field_path(key))
            }),
            None => Ok(None),
        }
    }

    /// bool, or the strings "true" and "false"
    pub fn bool(&self, key: &str) -> Result<Option<bool>, CodecError> {
        let node = match self.member(key) {
            Some(node) => node,
            None => return Ok(None),
        };
        if let Some(value) = node.as_bool() {
            return Ok(Some(value));
        }
        let parsed = match node.as_str() {
            Some(value) => parse_bool(value),
            None => Err(CodecError::invalid_format(node.kind_name(), "a bool")),
        };
        parsed.map(Some).map_err(|e| e.at(self.field_path(key)))
    }

    /// ordered list of scalars; absent stays absent
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, CodecError> {
        let node = match self.member(key) {
            Some(node) => node,
            None => return Ok(None),
        };
        let items = node.as_list().ok_or_else(|| {
            CodecError::invalid_format(node.kind_name(), "a list").at(self.field_path(key))
        })?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.scalar_string().ok_or_else(|| {
                    CodecError::invalid_format(item.kind_name(), "a string")
                        .at(self.field_path(key).index(index))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// mapping of scalars
    pub fn string_map(&self, key: &str) -> Result<Option<Labels>, CodecError> {
        let node = match self.member(key) {
            Some(node) => node,
            None => return Ok(None),
        };
        let members = node.as_map().ok_or_else(|| {
            CodecError::invalid_format(node.kind_name(), "a mapping").at(self.field_path(key))
        })?;
        members
            .iter()
            .map(|(name, value)| {
                value
                    .scalar_string()
                    .map(|v| (name.clone(), v))
                    .ok_or_else(|| {
                        CodecError::invalid_format(value.kind_name(), "a string")
                            .at(self.field_path(key).child(name))
                    })
            })
            .collect::<Result<Labels, _>>()
            .map(Some)
    }

    /// nested block given as a mapping or as a list holding one mapping
    pub fn block(&self, key: &str) -> Result<Option<Block<'a>>, CodecError> {
        let path = self.field_path(key);
        match self.member(key) {
            None => Ok(None),
            Some(ConfigNode::List(items)) => match items.as_slice() {
                [] => Ok(None),
                [item] => Block::open(item, self.nested_schema(key), path.index(0)).map(Some),
                _ => Err(CodecError::invalid_format(
                    format!("{} entries", items.len()),
                    "at most one block",
                )
                .at(path)),
            },
            Some(node) => Block::open(node, self.nested_schema(key), path).map(Some),
        }
    }

    /// list of nested blocks, absent is empty
    pub fn blocks(&self, key: &str) -> Result<Vec<Block<'a>>, CodecError> {
        let path = self.field_path(key);
        match self.member(key) {
            None => Ok(vec![]),
            Some(ConfigNode::List(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Block::open(item, self.nested_schema(key), path.index(index)))
                .collect(),
            Some(node) => Err(CodecError::invalid_format(node.kind_name(), "a list").at(path)),
        }
    }

    /// zero or one block from a list
    pub fn at_most_one(&self, key: &str) -> Result<Option<Block<'a>>, CodecError> {
        let mut blocks = self.blocks(key)?;
        if blocks.len() > 1 {
            return Err(CodecError::invalid_format(
                format!("{} entries", blocks.len()),
                "at most one block",
            )
            .at(self.field_path(key)));
        }
        Ok(blocks.pop())
    }
}
