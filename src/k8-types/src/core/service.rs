use serde::Deserialize;
use serde::Serialize;

use crate::core::pod::Protocol;
use crate::Crd;
use crate::CrdNames;
use crate::IntOrString;
use crate::Labels;
use crate::Spec;

const SERVICE_API: Crd = Crd {
    group: "core",
    version: "v1",
    names: CrdNames {
        kind: "Service",
        plural: "services",
        singular: "service",
    },
};

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceSpec {
    pub selector: Labels,
    #[serde(rename = "clusterIP", skip_serializing_if = "Option::is_none")]
    pub cluster_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ServiceType>,
    pub ports: Vec<ServicePort>,
}

impl Spec for ServiceSpec {
    fn metadata() -> &'static Crd {
        &SERVICE_API
    }

    fn make_same(&mut self, other: &Self) {
        if other.cluster_ip.is_none() {
            self.cluster_ip = None;
        }
        if other.r#type.is_none() {
            self.r#type = None;
        }
        for (port, other_port) in self.ports.iter_mut().zip(other.ports.iter()) {
            if other_port.node_port.is_none() {
                port.node_port = None;
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    pub port: u16,
    pub target_port: IntOrString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_port: Option<u16>,
}

string_enum! {
    ServiceType {
        ClusterIp => "ClusterIP",
        NodePort => "NodePort",
        LoadBalancer => "LoadBalancer",
    }
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use super::*;

    fn port(node_port: Option<u16>) -> ServicePort {
        ServicePort {
            name: "http".to_owned(),
            protocol: Some(Protocol::Tcp),
            port: 80,
            target_port: IntOrString::from("web"),
            node_port,
        }
    }

    #[test]
    fn test_make_same_keeps_requested_node_port() {
        let desired = ServiceSpec {
            r#type: Some(ServiceType::NodePort),
            ports: vec![port(Some(30080)), port(None)],
            ..Default::default()
        };
        let mut observed = ServiceSpec {
            cluster_ip: Some("10.0.0.12".to_owned()),
            r#type: Some(ServiceType::NodePort),
            ports: vec![port(Some(30080)), port(Some(31999))],
            ..Default::default()
        };

        observed.make_same(&desired);

        assert_eq!(observed.cluster_ip, None);
        assert_eq!(observed.ports[0].node_port, Some(30080));
        assert_eq!(observed.ports[1].node_port, None);
        assert_eq!(observed, desired);
    }

    #[test]
    fn test_service_json() {
        let spec = ServiceSpec {
            r#type: Some(ServiceType::ClusterIp),
            ports: vec![port(None)],
            ..Default::default()
        };
        let value = serde_json::to_value(&spec).expect("json");
        assert_eq!(value["type"], json!("ClusterIP"));
        assert_eq!(value["ports"][0]["targetPort"], json!("web"));
    }
}
