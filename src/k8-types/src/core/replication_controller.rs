use serde::Deserialize;
use serde::Serialize;

use crate::core::pod::PodSpec;
use crate::Crd;
use crate::CrdNames;
use crate::Labels;
use crate::Spec;
use crate::TemplateSpec;

const REPLICATION_CONTROLLER_API: Crd = Crd {
    group: "core",
    version: "v1",
    names: CrdNames {
        kind: "ReplicationController",
        plural: "replicationcontrollers",
        singular: "replicationcontroller",
    },
};

#[derive(Deserialize, Serialize, Debug, Default, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicationControllerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    pub selector: Labels,
    pub template: TemplateSpec<PodSpec>,
}

impl Spec for ReplicationControllerSpec {
    fn metadata() -> &'static Crd {
        &REPLICATION_CONTROLLER_API
    }

    fn make_same(&mut self, other: &Self) {
        self.template.spec.make_same(&other.template.spec);
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_api_version() {
        assert_eq!(ReplicationControllerSpec::api_version(), "v1");
        assert_eq!(ReplicationControllerSpec::kind(), "ReplicationController");
    }

    #[test]
    fn test_make_same_reaches_template() {
        let desired = ReplicationControllerSpec::default();
        let mut observed = ReplicationControllerSpec::default();
        observed.template.spec.node_name = Some("node-2".to_owned());

        observed.make_same(&desired);
        assert_eq!(observed.template.spec.node_name, None);
    }
}
