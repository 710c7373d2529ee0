use std::collections::BTreeSet;

use tracing::trace;

use k8_config::CodecOptions;
use k8_config::ConfigNode;
use k8_types::core::pod::DnsPolicy;
use k8_types::core::pod::PodSpec;
use k8_types::core::pod::RestartPolicy;
use k8_types::EnumValue;
use k8_types::K8Obj;
use k8_types::ObjectMeta;

use crate::block::Block;
use crate::builder::NodeBuilder;
use crate::container::container_from_block;
use crate::container::encode_container;
use crate::coerce::parse_enum;
use crate::schema::pod_schema;
use crate::schema::pod_spec_schema;
use crate::variant::encode_volume;
use crate::variant::volume_from_block;
use crate::CodecError;
use crate::FieldPath;

/// identity of a top level resource, namespace falls back to the configured default
pub(crate) fn meta_from_block(
    block: &Block,
    options: &CodecOptions,
) -> Result<ObjectMeta, CodecError> {
    let namespace = block
        .string("namespace")?
        .unwrap_or_else(|| options.default_namespace.clone());
    Ok(ObjectMeta::new(block.required_string("name")?, namespace)
        .with_labels(block.string_map("labels")?.unwrap_or_default()))
}

pub(crate) fn encode_meta(builder: NodeBuilder, metadata: &ObjectMeta) -> NodeBuilder {
    let builder = builder.set("name", metadata.name.as_str());
    let builder = if metadata.namespace.is_empty() {
        builder
    } else {
        builder.set("namespace", metadata.namespace.as_str())
    };
    builder.labels("labels", &metadata.labels)
}

pub(crate) fn pod_spec_from_block(
    block: &Block,
    options: &CodecOptions,
) -> Result<PodSpec, CodecError> {
    let container_blocks = block.blocks("container")?;
    let mut names = BTreeSet::new();
    let mut containers = Vec::with_capacity(container_blocks.len());
    for container_block in &container_blocks {
        let container = container_from_block(container_block, options)?;
        if !names.insert(container.name.clone()) {
            return Err(CodecError::invalid_format(
                container.name,
                "a container name unique within the pod",
            )
            .at(container_block.path().child("name")));
        }
        containers.push(container);
    }
    trace!(containers = containers.len(), "decoded containers");

    Ok(PodSpec {
        node_name: block.string("nodeName")?,
        termination_grace_period_seconds: block.int("terminationGracePeriodSeconds")?,
        containers,
        volumes: block
            .blocks("volume")?
            .iter()
            .map(volume_from_block)
            .collect::<Result<_, _>>()?,
        restart_policy: block.coerce("restartPolicy", parse_enum::<RestartPolicy>)?,
        dns_policy: block.coerce("dnsPolicy", parse_enum::<DnsPolicy>)?,
        service_account_name: block.string("serviceAccountName")?,
    })
}

/// pod level fields appended to `builder`
pub(crate) fn encode_pod_spec_into(builder: NodeBuilder, spec: &PodSpec) -> NodeBuilder {
    builder
        .opt("nodeName", spec.node_name.as_deref())
        .opt(
            "terminationGracePeriodSeconds",
            spec.termination_grace_period_seconds.map(|s| s.to_string()),
        )
        .blocks("container", spec.containers.iter().map(encode_container).collect())
        .blocks("volume", spec.volumes.iter().map(encode_volume).collect())
        .opt("restartPolicy", spec.restart_policy.map(|p| p.as_str()))
        .opt("dnsPolicy", spec.dns_policy.map(|p| p.as_str()))
        .opt("serviceAccountName", spec.service_account_name.as_deref())
}

/// pod level fields without identity
pub fn decode_pod_spec(node: &ConfigNode, options: &CodecOptions) -> Result<PodSpec, CodecError> {
    let block = Block::open(node, pod_spec_schema(), FieldPath::root())?;
    pod_spec_from_block(&block, options)
}

pub fn encode_pod_spec(spec: &PodSpec) -> ConfigNode {
    encode_pod_spec_into(NodeBuilder::new(), spec).build()
}

pub fn decode_pod(node: &ConfigNode, options: &CodecOptions) -> Result<K8Obj<PodSpec>, CodecError> {
    let block = Block::open(node, pod_schema(), FieldPath::root())?;
    let metadata = meta_from_block(&block, options)?;
    let spec = pod_spec_from_block(&block, options)?;
    trace!(pod = %metadata, "decoded pod");
    Ok(K8Obj::new(metadata, spec))
}

pub fn encode_pod(pod: &K8Obj<PodSpec>) -> ConfigNode {
    encode_pod_spec_into(encode_meta(NodeBuilder::new(), &pod.metadata), &pod.spec).build()
}
