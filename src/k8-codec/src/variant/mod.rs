//! Codecs of the exactly-one-of structures.
//!
//! A variant block is inspected for every known branch key; exactly one
//! branch must hold a non-empty structure.

mod probe;
mod volume;

pub use probe::decode_probe;
pub use probe::decode_probe_handler;
pub use probe::encode_probe;
pub use probe::encode_probe_handler;
pub use volume::decode_volume;
pub use volume::decode_volume_source;
pub use volume::encode_volume;
pub use volume::encode_volume_source;

pub(crate) use probe::probe_from_block;
pub(crate) use volume::volume_from_block;

use crate::block::Block;
use crate::CodecError;

/// branch populated in `block`, out of `branches`
pub(crate) fn select_variant<K: Copy>(
    block: &Block,
    branches: &[(&'static str, K)],
) -> Result<(&'static str, K), CodecError> {
    let found: Vec<(&'static str, K)> = branches
        .iter()
        .filter(|(key, _)| block.populated(key))
        .copied()
        .collect();

    match found.as_slice() {
        [single] => Ok(*single),
        [] => Err(CodecError::UnknownVariant {
            field: block.path().clone(),
            variants: branches.iter().map(|(key, _)| *key).collect(),
        }),
        _ => Err(CodecError::AmbiguousVariant {
            field: block.path().clone(),
            found: found.iter().map(|(key, _)| *key).collect(),
        }),
    }
}
