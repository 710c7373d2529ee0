use k8_config::ConfigNode;
use k8_types::core::pod::AwsElasticBlockStoreVolumeSource;
use k8_types::core::pod::EmptyDirVolumeSource;
use k8_types::core::pod::HostPathVolumeSource;
use k8_types::core::pod::StorageMedium;
use k8_types::core::pod::Volume;
use k8_types::core::pod::VolumeSource;
use k8_types::EnumValue;

use crate::block::Block;
use crate::builder::NodeBuilder;
use crate::schema::volume_schema;
use crate::schema::volume_source_schema;
use crate::CodecError;
use crate::FieldPath;

use super::select_variant;

#[derive(Debug, Clone, Copy)]
enum SourceKind {
    EmptyDir,
    HostPath,
    AwsElasticBlockStore,
}

const SOURCES: [(&str, SourceKind); 3] = [
    ("emptyDir", SourceKind::EmptyDir),
    ("hostPath", SourceKind::HostPath),
    ("awsElasticBlockStore", SourceKind::AwsElasticBlockStore),
];

pub(crate) fn source_from_block(block: &Block) -> Result<VolumeSource, CodecError> {
    let (key, kind) = select_variant(block, &SOURCES)?;
    let source = block
        .block(key)?
        .ok_or_else(|| CodecError::missing(block.path().child(key)))?;

    Ok(match kind {
        SourceKind::EmptyDir => {
            // only the exact spelling selects memory
            let medium = match source.string("medium")?.as_deref() {
                Some("Memory") => StorageMedium::Memory,
                _ => StorageMedium::Default,
            };
            VolumeSource::EmptyDir(EmptyDirVolumeSource { medium })
        }
        SourceKind::HostPath => VolumeSource::HostPath(HostPathVolumeSource {
            path: source.required_string("path")?,
        }),
        SourceKind::AwsElasticBlockStore => {
            VolumeSource::AwsElasticBlockStore(AwsElasticBlockStoreVolumeSource {
                volume_id: source.required_string("volumeID")?,
                fs_type: source.string("fsType")?,
                partition: source.int32("partition")?,
                read_only: source.bool("readOnly")?,
            })
        }
    })
}

pub(crate) fn volume_from_block(block: &Block) -> Result<Volume, CodecError> {
    Ok(Volume {
        name: block.required_string("name")?,
        source: source_from_block(block)?,
    })
}

/// source of a volume mapping holding its branch keys
pub fn decode_volume_source(node: &ConfigNode) -> Result<VolumeSource, CodecError> {
    let block = Block::open(node, volume_source_schema(), FieldPath::root())?;
    source_from_block(&block)
}

pub fn decode_volume(node: &ConfigNode) -> Result<Volume, CodecError> {
    let block = Block::open(node, volume_schema(), FieldPath::root())?;
    volume_from_block(&block)
}

/// content of the populated branch, to be stored under `source.kind()`
pub fn encode_volume_source(source: &VolumeSource) -> ConfigNode {
    match source {
        VolumeSource::EmptyDir(empty_dir) => NodeBuilder::new()
            .set("medium", empty_dir.medium.as_str())
            .build(),
        VolumeSource::HostPath(host_path) => NodeBuilder::new()
            .set("path", host_path.path.as_str())
            .build(),
        VolumeSource::AwsElasticBlockStore(ebs) => NodeBuilder::new()
            .set("volumeID", ebs.volume_id.as_str())
            .opt("fsType", ebs.fs_type.as_deref())
            .opt("partition", ebs.partition.map(i64::from))
            .opt("readOnly", ebs.read_only)
            .build(),
    }
}

pub fn encode_volume(volume: &Volume) -> ConfigNode {
    NodeBuilder::new()
        .set("name", volume.name.as_str())
        .set(volume.source.kind(), encode_volume_source(&volume.source))
        .build()
}
