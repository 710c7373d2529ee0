use k8_config::ConfigNode;
use k8_config::NodeMap;
use k8_types::Labels;

/// assembles the mapping emitted for one block.
/// Absent values are never written, so the output keeps the shape of the input
#[derive(Default)]
pub(crate) struct NodeBuilder(NodeMap);

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<N: Into<ConfigNode>>(mut self, key: &str, node: N) -> Self {
        self.0.insert(key.to_owned(), node.into());
        self
    }

    pub fn opt<N: Into<ConfigNode>>(self, key: &str, node: Option<N>) -> Self {
        match node {
            Some(node) => self.set(key, node),
            None => self,
        }
    }

    /// list of blocks, omitted when there are none
    pub fn blocks(self, key: &str, items: Vec<ConfigNode>) -> Self {
        if items.is_empty() {
            self
        } else {
            self.set(key, items)
        }
    }

    /// scalar list written even when empty
    pub fn strings(self, key: &str, items: Option<&Vec<String>>) -> Self {
        self.opt(key, items.map(|items| string_list(items)))
    }

    /// mapping of scalars, omitted when empty
    pub fn labels(self, key: &str, labels: &Labels) -> Self {
        if labels.is_empty() {
            self
        } else {
            self.set(key, string_map(labels))
        }
    }

    pub fn build(self) -> ConfigNode {
        ConfigNode::Map(self.0)
    }
}

pub(crate) fn string_list(items: &[String]) -> ConfigNode {
    ConfigNode::List(items.iter().map(|item| ConfigNode::from(item.as_str())).collect())
}

pub(crate) fn string_map(labels: &Labels) -> ConfigNode {
    let members: NodeMap = labels
        .iter()
        .map(|(name, value)| (name.clone(), ConfigNode::from(value.as_str())))
        .collect();
    ConfigNode::Map(members)
}
