//! Structural comparison of configuration values.
//!
//! Mappings are compared member by member, every other value is compared as a
//! whole. The result of comparing two mappings can be written out as a JSON
//! merge patch.

mod json;

pub use json::JsonDiff;
pub use json::PatchObject;

use thiserror::Error;

pub trait Changes {
    type Replace;
    type Patch;

    /// changes needed to turn `self` into `new`
    fn diff(&self, new: &Self) -> Result<Diff<Self::Replace, Self::Patch>, DiffError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("member {key}: a {old} can not be changed into a {new}")]
    KindMismatch {
        key: String,
        old: &'static str,
        new: &'static str,
    },
}

impl DiffError {
    /// prefix the member name of the enclosing mapping
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            Self::KindMismatch { key, old, new } => Self::KindMismatch {
                key: if key.is_empty() {
                    parent.to_owned()
                } else {
                    format!("{}.{}", parent, key)
                },
                old,
                new,
            },
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Diff<R, P> {
    None,
    Delete,
    /// member wise changes of a mapping
    Patch(P),
    /// new value as a whole, lists included since their order matters
    Replace(R),
}

impl<R, P> Diff<R, P> {
    pub fn is_none(&self) -> bool {
        matches!(self, Diff::None)
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Diff::Delete)
    }

    pub fn is_replace(&self) -> bool {
        matches!(self, Diff::Replace(_))
    }

    pub fn is_patch(&self) -> bool {
        matches!(self, Diff::Patch(_))
    }

    pub fn as_replace_ref(&self) -> Option<&R> {
        match self {
            Diff::Replace(val) => Some(val),
            _ => None,
        }
    }

    pub fn as_patch_ref(&self) -> Option<&P> {
        match self {
            Diff::Patch(val) => Some(val),
            _ => None,
        }
    }
}
