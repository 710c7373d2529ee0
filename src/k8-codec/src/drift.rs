use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use k8_diff::Changes;
use k8_diff::Diff;
use k8_diff::DiffError;
use k8_diff::JsonDiff;
use k8_types::K8Meta;
use k8_types::K8Obj;

use crate::schema::Schema;
use crate::Resource;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("unable to compare configurations: {0}")]
    Diff(#[from] DiffError),
    #[error("unable to build patch: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration document is not a mapping")]
    NotAMapping,
}

/// action needed to bring the observed object to the desired one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Drift {
    InSync,
    /// changed fields can be applied in place, `patch` is a merge patch of the configuration
    Update { fields: Vec<String>, patch: Value },
    /// at least one changed field forces a new object
    Replace { fields: Vec<String> },
}

impl Drift {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, Self::InSync)
    }

    pub fn fields(&self) -> &[String] {
        match self {
            Self::InSync => &[],
            Self::Update { fields, .. } | Self::Replace { fields } => fields,
        }
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InSync => write!(f, "in sync"),
            Self::Update { fields, .. } => write!(f, "update: {}", fields.join(", ")),
            Self::Replace { fields } => write!(f, "replace: {}", fields.join(", ")),
        }
    }
}

/// in place update unless a changed top level field is force new
fn classify(diff: JsonDiff, schema: &Schema) -> Result<Drift, DriftError> {
    match diff {
        Diff::None => Ok(Drift::InSync),
        Diff::Patch(patch) => {
            let fields: Vec<String> = patch.changed_keys().into_iter().map(String::from).collect();
            if fields.iter().any(|field| schema.is_force_new(field)) {
                Ok(Drift::Replace { fields })
            } else {
                Ok(Drift::Update {
                    patch: serde_json::to_value(&patch)?,
                    fields,
                })
            }
        }
        Diff::Replace(_) | Diff::Delete => Err(DriftError::NotAMapping),
    }
}

/// compare configuration forms of both objects.
/// Platform computed values the desired object leaves unset are ignored,
/// and both sides are canonicalized first
pub fn plan_drift<S>(desired: &K8Obj<S>, observed: &K8Obj<S>) -> Result<Drift, DriftError>
where
    S: Resource,
{
    let mut observed_spec = observed.spec.clone();
    observed_spec.make_same(&desired.spec);

    let desired_node = S::encode(&desired.with_spec(desired.spec.canonicalize()));
    let observed_node = S::encode(&observed.with_spec(observed_spec.canonicalize()));

    let old = Value::from(&observed_node);
    let new = Value::from(&desired_node);

    let drift = classify(old.diff(&new)?, &S::schema())?;

    debug!(
        name = desired.name(),
        namespace = desired.namespace(),
        kind = %S::kind(),
        %drift,
        "planned drift"
    );
    Ok(drift)
}
