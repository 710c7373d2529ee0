mod error;
mod node;
mod options;

pub use error::ConfigError;
pub use node::ConfigNode;
pub use node::NodeMap;
pub use options::CodecOptions;
pub use options::ProtocolPolicy;
