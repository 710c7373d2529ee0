use serde_json::Error as SerdeJsonError;
use serde_yaml::Error as SerdeYamlError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("Yaml error: {0}")]
    SerdeError(#[from] SerdeYamlError),
    #[error("Json error: {0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("Document is empty")]
    EmptyDocument,
    #[error("Invalid document: {0}")]
    InvalidNode(String),
}
