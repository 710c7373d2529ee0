use k8_config::CodecOptions;
use k8_config::ConfigNode;
use k8_types::core::pod::Container;
use k8_types::core::pod::ContainerPort;
use k8_types::core::pod::EnvVar;
use k8_types::core::pod::ImagePullPolicy;
use k8_types::core::pod::Probe;
use k8_types::core::pod::VolumeMount;
use k8_types::EnumValue;

use crate::block::Block;
use crate::builder::NodeBuilder;
use crate::coerce::format_port;
use crate::coerce::parse_enum;
use crate::coerce::parse_port;
use crate::coerce::parse_protocol_with;
use crate::schema::container_schema;
use crate::variant::encode_probe;
use crate::variant::probe_from_block;
use crate::CodecError;
use crate::FieldPath;

fn port_from_block(block: &Block, options: &CodecOptions) -> Result<ContainerPort, CodecError> {
    Ok(ContainerPort {
        name: block.required_string("name")?,
        container_port: block.required("containerPort", parse_port)?,
        protocol: block.coerce("protocol", |s| parse_protocol_with(s, options.protocol_policy))?,
    })
}

fn env_from_block(block: &Block) -> Result<EnvVar, CodecError> {
    Ok(EnvVar {
        name: block.required_string("name")?,
        value: block.string("value")?,
    })
}

fn mount_from_block(block: &Block) -> Result<VolumeMount, CodecError> {
    Ok(VolumeMount {
        name: block.required_string("name")?,
        read_only: block.bool("readOnly")?,
        mount_path: block.required_string("mountPath")?,
    })
}

pub(crate) fn container_from_block(
    block: &Block,
    options: &CodecOptions,
) -> Result<Container, CodecError> {
    let probe = |key: &str| -> Result<_, CodecError> {
        block
            .at_most_one(key)?
            .map(|probe| probe_from_block(&probe))
            .transpose()
    };

    Ok(Container {
        name: block.required_string("name")?,
        image: block.required_string("image")?,
        ports: block
            .blocks("port")?
            .iter()
            .map(|port| port_from_block(port, options))
            .collect::<Result<_, _>>()?,
        env: block
            .blocks("env")?
            .iter()
            .map(env_from_block)
            .collect::<Result<_, _>>()?,
        volume_mounts: block
            .blocks("volumeMount")?
            .iter()
            .map(mount_from_block)
            .collect::<Result<_, _>>()?,
        liveness_probe: probe("livenessProbe")?,
        readiness_probe: probe("readinessProbe")?,
        command: block.string_list("command")?,
        args: block.string_list("args")?,
        image_pull_policy: block.coerce("imagePullPolicy", parse_enum::<ImagePullPolicy>)?,
        termination_message_path: block.string("terminationMessagePath")?,
    })
}

pub fn decode_container(node: &ConfigNode, options: &CodecOptions) -> Result<Container, CodecError> {
    let block = Block::open(node, container_schema(), FieldPath::root())?;
    container_from_block(&block, options)
}

fn encode_port(port: &ContainerPort) -> ConfigNode {
    NodeBuilder::new()
        .set("name", port.name.as_str())
        .set("containerPort", format_port(port.container_port))
        .opt("protocol", port.protocol.map(|p| p.as_str()))
        .build()
}

fn encode_env(env: &EnvVar) -> ConfigNode {
    NodeBuilder::new()
        .set("name", env.name.as_str())
        .opt("value", env.value.as_deref())
        .build()
}

fn encode_mount(mount: &VolumeMount) -> ConfigNode {
    NodeBuilder::new()
        .set("name", mount.name.as_str())
        .opt("readOnly", mount.read_only)
        .set("mountPath", mount.mount_path.as_str())
        .build()
}

pub fn encode_container(container: &Container) -> ConfigNode {
    let probe = |probe: &Option<Probe>| probe.iter().map(encode_probe).collect::<Vec<_>>();

    NodeBuilder::new()
        .set("name", container.name.as_str())
        .set("image", container.image.as_str())
        .blocks("port", container.ports.iter().map(encode_port).collect())
        .blocks("env", container.env.iter().map(encode_env).collect())
        .blocks("volumeMount", container.volume_mounts.iter().map(encode_mount).collect())
        .blocks("livenessProbe", probe(&container.liveness_probe))
        .blocks("readinessProbe", probe(&container.readiness_probe))
        .strings("command", container.command.as_ref())
        .strings("args", container.args.as_ref())
        .opt("imagePullPolicy", container.image_pull_policy.map(|p| p.as_str()))
        .opt("terminationMessagePath", container.termination_message_path.as_deref())
        .build()
}
