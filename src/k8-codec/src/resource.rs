use k8_config::CodecOptions;
use k8_config::ConfigNode;
use k8_types::core::pod::PodSpec;
use k8_types::core::replication_controller::ReplicationControllerSpec;
use k8_types::core::service::ServiceSpec;
use k8_types::K8Obj;
use k8_types::Spec;

use crate::normalize::canonicalize;
use crate::normalize::canonicalize_replication_controller;
use crate::normalize::canonicalize_service;
use crate::pod::decode_pod;
use crate::pod::encode_pod;
use crate::schema::pod_schema;
use crate::schema::replication_controller_schema;
use crate::schema::service_schema;
use crate::schema::Schema;
use crate::workload::decode_replication_controller;
use crate::workload::decode_service;
use crate::workload::encode_replication_controller;
use crate::workload::encode_service;
use crate::CodecError;

/// top level resource with a configuration form
pub trait Resource: Spec {
    /// fields of the configuration form
    fn schema() -> Schema;

    fn decode(node: &ConfigNode, options: &CodecOptions) -> Result<K8Obj<Self>, CodecError>;

    fn encode(obj: &K8Obj<Self>) -> ConfigNode;

    /// copy with platform defaults filled
    fn canonicalize(&self) -> Self;
}

impl Resource for PodSpec {
    fn schema() -> Schema {
        pod_schema()
    }

    fn decode(node: &ConfigNode, options: &CodecOptions) -> Result<K8Obj<Self>, CodecError> {
        decode_pod(node, options)
    }

    fn encode(obj: &K8Obj<Self>) -> ConfigNode {
        encode_pod(obj)
    }

    fn canonicalize(&self) -> Self {
        canonicalize(self)
    }
}

impl Resource for ServiceSpec {
    fn schema() -> Schema {
        service_schema()
    }

    fn decode(node: &ConfigNode, options: &CodecOptions) -> Result<K8Obj<Self>, CodecError> {
        decode_service(node, options)
    }

    fn encode(obj: &K8Obj<Self>) -> ConfigNode {
        encode_service(obj)
    }

    fn canonicalize(&self) -> Self {
        canonicalize_service(self)
    }
}

impl Resource for ReplicationControllerSpec {
    fn schema() -> Schema {
        replication_controller_schema()
    }

    fn decode(node: &ConfigNode, options: &CodecOptions) -> Result<K8Obj<Self>, CodecError> {
        decode_replication_controller(node, options)
    }

    fn encode(obj: &K8Obj<Self>) -> ConfigNode {
        encode_replication_controller(obj)
    }

    fn canonicalize(&self) -> Self {
        canonicalize_replication_controller(self)
    }
}
