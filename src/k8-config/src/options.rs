use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::ConfigError;

const DEFAULT_NAMESPACE: &str = "default";

/// how a port protocol that is neither TCP nor UDP is treated
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolPolicy {
    /// unknown protocol falls back to TCP
    #[default]
    Lenient,
    /// unknown protocol is rejected, an empty one is still TCP
    Strict,
}

/// settings shared by all decoders
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecOptions {
    pub protocol_policy: ProtocolPolicy,
    pub default_namespace: String,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            protocol_policy: ProtocolPolicy::default(),
            default_namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }
}

impl CodecOptions {
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        debug!(path = %path.as_ref().display(), "reading codec options");
        let input = read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    /// an empty document selects the defaults
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Option<Self> = serde_yaml::from_str(input)?;
        Ok(options.unwrap_or_default())
    }

    pub fn strict(mut self) -> Self {
        self.protocol_policy = ProtocolPolicy::Strict;
        self
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.default_namespace = namespace.into();
        self
    }
}

#[cfg(test)]
mod test {

    use super::CodecOptions;
    use super::ProtocolPolicy;

    #[test]
    fn test_decode_options_file() {
        let options = CodecOptions::from_file("data/options.yaml").expect("read");
        assert_eq!(options.protocol_policy, ProtocolPolicy::Strict);
        assert_eq!(options.default_namespace, "staging");
    }

    #[test]
    fn test_partial_options() {
        let options = CodecOptions::from_yaml_str("defaultNamespace: qa\n").expect("yaml");
        assert_eq!(options.protocol_policy, ProtocolPolicy::Lenient);
        assert_eq!(options.default_namespace, "qa");
    }

    #[test]
    fn test_empty_options() {
        let options = CodecOptions::from_yaml_str("").expect("yaml");
        assert_eq!(options, CodecOptions::default());
        assert_eq!(options.default_namespace, "default");
    }

    #[test]
    fn test_unknown_policy() {
        assert!(CodecOptions::from_yaml_str("protocolPolicy: loose\n").is_err());
    }

    #[test]
    fn test_builder() {
        let options = CodecOptions::default().strict().with_namespace("prod");
        assert_eq!(options.protocol_policy, ProtocolPolicy::Strict);
        assert_eq!(options.default_namespace, "prod");
    }
}
