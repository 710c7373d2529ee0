use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Crd;

/// typed body of a resource kind
pub trait Spec:
    Sized + Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    /// api group, version and names of the kind
    fn metadata() -> &'static Crd;

    /// core group kinds carry the bare version
    fn api_version() -> String {
        let metadata = Self::metadata();
        if metadata.group == "core" {
            return metadata.version.to_owned();
        }
        format!("{}/{}", metadata.group, metadata.version)
    }

    fn kind() -> String {
        Self::metadata().names.kind.to_owned()
    }

    /// drop values of `self` that the platform assigns and `other` leaves unset,
    /// so the two can be compared
    fn make_same(&mut self, _other: &Self) {}
}
