use serde::Deserialize;
use serde::Serialize;

use crate::Crd;
use crate::CrdNames;
use crate::IntOrString;
use crate::Spec;

const POD_API: Crd = Crd {
    group: "core",
    version: "v1",
    names: CrdNames {
        kind: "Pod",
        plural: "pods",
        singular: "pod",
    },
};

impl Spec for PodSpec {
    fn metadata() -> &'static Crd {
        &POD_API
    }

    /// node name and grace period are assigned by the platform unless requested
    fn make_same(&mut self, other: &Self) {
        if other.node_name.is_none() {
            self.node_name = None;
        }
        if other.termination_grace_period_seconds.is_none() {
            self.termination_grace_period_seconds = None;
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    pub containers: Vec<Container>,
    pub volumes: Vec<Volume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<RestartPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_policy: Option<DnsPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
}

impl PodSpec {
    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.name == name)
    }
}

string_enum! {
    /// See: https://kubernetes.io/docs/concepts/workloads/pods/pod-lifecycle/#restart-policy
    RestartPolicy {
        Always => "Always",
        OnFailure => "OnFailure",
        Never => "Never",
    }
}

string_enum! {
    DnsPolicy {
        ClusterFirst => "ClusterFirst",
        Default => "Default",
    }
}

string_enum! {
    ImagePullPolicy {
        Always => "Always",
        IfNotPresent => "IfNotPresent",
        Never => "Never",
    }
}

string_enum! {
    Protocol {
        Tcp => "TCP",
        Udp => "UDP",
    }
}

string_enum! {
    UriScheme {
        Http => "HTTP",
        Https => "HTTPS",
    }
}

string_enum! {
    /// backing storage of an emptyDir volume, "" selects the node default
    StorageMedium {
        Default => "",
        Memory => "Memory",
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub ports: Vec<ContainerPort>,
    pub env: Vec<EnvVar>,
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_message_path: Option<String>,
}

impl Container {
    pub fn new<T: Into<String>>(name: T, image: T) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub name: String,
    pub container_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
}

impl ContainerPort {
    pub fn new<T: Into<String>>(container_port: u16, name: T) -> Self {
        ContainerPort {
            container_port,
            name: name.into(),
            protocol: None,
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl EnvVar {
    pub fn key_value<T: Into<String>>(name: T, value: T) -> Self {
        EnvVar {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    pub mount_path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    #[serde(flatten)]
    pub handler: ProbeHandler,
}

impl Probe {
    pub fn new(handler: ProbeHandler) -> Self {
        Self {
            initial_delay_seconds: None,
            timeout_seconds: None,
            handler,
        }
    }
}

/// exactly one way of checking a container
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProbeHandler {
    Exec(ExecAction),
    HttpGet(HttpGetAction),
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    pub command: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    pub path: String,
    pub port: IntOrString,
    pub host: String,
    pub scheme: UriScheme,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    #[serde(flatten)]
    pub source: VolumeSource,
}

/// exactly one backing store of a volume
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VolumeSource {
    EmptyDir(EmptyDirVolumeSource),
    HostPath(HostPathVolumeSource),
    AwsElasticBlockStore(AwsElasticBlockStoreVolumeSource),
}

impl VolumeSource {
    /// key of the populated variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyDir(_) => "emptyDir",
            Self::HostPath(_) => "hostPath",
            Self::AwsElasticBlockStore(_) => "awsElasticBlockStore",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirVolumeSource {
    pub medium: StorageMedium,
}

impl Default for EmptyDirVolumeSource {
    fn default() -> Self {
        Self {
            medium: StorageMedium::Default,
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostPathVolumeSource {
    pub path: String,
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AwsElasticBlockStoreVolumeSource {
    #[serde(rename = "volumeID")]
    pub volume_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fs_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use super::*;

    #[test]
    fn test_volume_source_json() {
        let volume = Volume {
            name: "data".to_owned(),
            source: VolumeSource::AwsElasticBlockStore(AwsElasticBlockStoreVolumeSource {
                volume_id: "vol-1".to_owned(),
                ..Default::default()
            }),
        };

        let value = serde_json::to_value(&volume).expect("json");
        assert_eq!(
            value,
            json!({
                "name": "data",
                "awsElasticBlockStore": { "volumeID": "vol-1" }
            })
        );
        let back: Volume = serde_json::from_value(value).expect("volume");
        assert_eq!(back, volume);
        assert_eq!(back.source.kind(), "awsElasticBlockStore");
    }

    #[test]
    fn test_probe_json() {
        let probe = Probe {
            initial_delay_seconds: Some(5),
            ..Probe::new(ProbeHandler::HttpGet(HttpGetAction {
                path: "/healthz".to_owned(),
                port: IntOrString::from("http"),
                host: "localhost".to_owned(),
                scheme: UriScheme::Http,
            }))
        };

        let value = serde_json::to_value(&probe).expect("json");
        assert_eq!(
            value,
            json!({
                "initialDelaySeconds": 5,
                "httpGet": {
                    "path": "/healthz",
                    "port": "http",
                    "host": "localhost",
                    "scheme": "HTTP"
                }
            })
        );
    }

    #[test]
    fn test_make_same_drops_assigned_node() {
        let desired = PodSpec::default();
        let mut observed = PodSpec {
            node_name: Some("node-1".to_owned()),
            termination_grace_period_seconds: Some(30),
            ..Default::default()
        };

        observed.make_same(&desired);
        assert_eq!(observed, desired);
    }

    #[test]
    fn test_find_container() {
        let spec = PodSpec {
            containers: vec![Container::new("web", "nginx"), Container::new("db", "redis")],
            ..Default::default()
        };
        assert_eq!(spec.container("db").map(|c| c.image.as_str()), Some("redis"));
        assert!(spec.container("cache").is_none());
    }
}
