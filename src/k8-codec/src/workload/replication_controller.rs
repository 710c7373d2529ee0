use k8_config::CodecOptions;
use k8_config::ConfigNode;
use k8_types::core::pod::PodSpec;
use k8_types::core::replication_controller::ReplicationControllerSpec;
use k8_types::K8Obj;
use k8_types::Labels;
use k8_types::TemplateMeta;
use k8_types::TemplateSpec;

use crate::block::Block;
use crate::builder::NodeBuilder;
use crate::pod::encode_meta;
use crate::pod::encode_pod_spec_into;
use crate::pod::meta_from_block;
use crate::pod::pod_spec_from_block;
use crate::schema::replication_controller_schema;
use crate::CodecError;
use crate::FieldPath;

/// selector labels completed by the pod labels.
/// A pod label may add keys but never contradict the selector
fn merge_labels(selector: &Labels, pod_labels: Labels, path: &FieldPath) -> Result<Labels, CodecError> {
    let mut merged = selector.clone();
    for (key, value) in pod_labels {
        match selector.get(&key) {
            Some(selected) if *selected != value => {
                return Err(
                    CodecError::invalid_format(value, "a label value matching the selector")
                        .at(path.child(&key)),
                );
            }
            _ => {
                merged.insert(key, value);
            }
        }
    }
    Ok(merged)
}

pub(crate) fn replication_controller_spec_from_block(
    block: &Block,
    options: &CodecOptions,
) -> Result<ReplicationControllerSpec, CodecError> {
    let pod = block
        .block("pod")?
        .ok_or_else(|| CodecError::missing(block.path().child("pod")))?;

    let selector = block.string_map("selector")?.unwrap_or_default();
    let pod_labels = pod.string_map("labels")?.unwrap_or_default();
    let labels = merge_labels(&selector, pod_labels, &pod.path().child("labels"))?;
    let spec: PodSpec = pod_spec_from_block(&pod, options)?;

    Ok(ReplicationControllerSpec {
        replicas: block.int32("replicas")?,
        selector: if selector.is_empty() {
            labels.clone()
        } else {
            selector
        },
        template: TemplateSpec {
            metadata: TemplateMeta { labels },
            spec,
        },
    })
}

pub fn decode_replication_controller(
    node: &ConfigNode,
    options: &CodecOptions,
) -> Result<K8Obj<ReplicationControllerSpec>, CodecError> {
    let block = Block::open(node, replication_controller_schema(), FieldPath::root())?;
    let metadata = meta_from_block(&block, options)?;
    let spec = replication_controller_spec_from_block(&block, options)?;
    Ok(K8Obj::new(metadata, spec))
}

pub fn encode_replication_controller(controller: &K8Obj<ReplicationControllerSpec>) -> ConfigNode {
    let spec = &controller.spec;
    let pod = encode_pod_spec_into(
        NodeBuilder::new().labels("labels", &spec.template.metadata.labels),
        &spec.template.spec,
    );

    encode_meta(NodeBuilder::new(), &controller.metadata)
        .opt("replicas", spec.replicas.map(i64::from))
        .labels("selector", &spec.selector)
        .set("pod", pod.build())
        .build()
}
