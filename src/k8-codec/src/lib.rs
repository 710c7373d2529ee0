//! Mapping between configuration trees and Kubernetes workload objects.
//!
//! Decoding turns a [`ConfigNode`](k8_config::ConfigNode) into a typed object,
//! encoding turns an observed object back into the same configuration shape.
//! All operations are pure and keep no state between calls.

mod block;
mod builder;
mod container;
mod drift;
mod error;
mod pod;
mod resource;
mod workload;

pub mod coerce;
pub mod normalize;
pub mod schema;
pub mod variant;

pub use self::container::decode_container;
pub use self::container::encode_container;
pub use self::drift::plan_drift;
pub use self::drift::Drift;
pub use self::drift::DriftError;
pub use self::error::CodecError;
pub use self::error::FieldPath;
pub use self::normalize::canonicalize;
pub use self::pod::decode_pod;
pub use self::pod::decode_pod_spec;
pub use self::pod::encode_pod;
pub use self::pod::encode_pod_spec;
pub use self::resource::Resource;
pub use self::workload::*;

pub use k8_config;
pub use k8_types;
