use k8_config::CodecOptions;
use k8_config::ConfigNode;
use k8_types::core::service::ServicePort;
use k8_types::core::service::ServiceSpec;
use k8_types::core::service::ServiceType;
use k8_types::EnumValue;
use k8_types::K8Obj;

use crate::block::Block;
use crate::builder::string_map;
use crate::builder::NodeBuilder;
use crate::coerce::decode_int_or_string;
use crate::coerce::encode_int_or_string;
use crate::coerce::parse_enum;
use crate::coerce::parse_port;
use crate::coerce::parse_protocol_with;
use crate::pod::encode_meta;
use crate::pod::meta_from_block;
use crate::schema::service_schema;
use crate::CodecError;
use crate::FieldPath;

fn port_from_block(block: &Block, options: &CodecOptions) -> Result<ServicePort, CodecError> {
    Ok(ServicePort {
        name: block.required_string("name")?,
        protocol: block.coerce("protocol", |s| parse_protocol_with(s, options.protocol_policy))?,
        port: block.required("port", parse_port)?,
        target_port: block.required("targetPort", decode_int_or_string)?,
        node_port: block.coerce("nodePort", parse_port)?,
    })
}

pub(crate) fn service_spec_from_block(
    block: &Block,
    options: &CodecOptions,
) -> Result<ServiceSpec, CodecError> {
    // an empty value leaves the choice to the platform
    let cluster_ip = block.string("clusterIP")?.filter(|ip| !ip.is_empty());
    let service_type = match block.string("type")? {
        Some(value) if !value.is_empty() => Some(
            parse_enum::<ServiceType>(&value).map_err(|e| e.at(block.path().child("type")))?,
        ),
        _ => None,
    };

    Ok(ServiceSpec {
        selector: block.string_map("selector")?.unwrap_or_default(),
        cluster_ip,
        r#type: service_type,
        ports: block
            .blocks("port")?
            .iter()
            .map(|port| port_from_block(port, options))
            .collect::<Result<_, _>>()?,
    })
}

pub fn decode_service(
    node: &ConfigNode,
    options: &CodecOptions,
) -> Result<K8Obj<ServiceSpec>, CodecError> {
    let block = Block::open(node, service_schema(), FieldPath::root())?;
    let metadata = meta_from_block(&block, options)?;
    let spec = service_spec_from_block(&block, options)?;
    Ok(K8Obj::new(metadata, spec))
}

fn encode_port(port: &ServicePort) -> ConfigNode {
    NodeBuilder::new()
        .set("name", port.name.as_str())
        .opt("protocol", port.protocol.map(|p| p.as_str()))
        .set("port", i64::from(port.port))
        .set("targetPort", encode_int_or_string(&port.target_port))
        .opt("nodePort", port.node_port.map(i64::from))
        .build()
}

pub fn encode_service(service: &K8Obj<ServiceSpec>) -> ConfigNode {
    let spec = &service.spec;
    encode_meta(NodeBuilder::new(), &service.metadata)
        .set("selector", string_map(&spec.selector))
        .opt("clusterIP", spec.cluster_ip.as_deref())
        .opt("type", spec.r#type.map(|t| t.as_str()))
        .blocks("port", spec.ports.iter().map(encode_port).collect())
        .build()
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use k8_config::CodecOptions;
    use k8_config::ConfigNode;
    use k8_types::core::pod::Protocol;
    use k8_types::core::service::ServiceType;
    use k8_types::IntOrString;

    use crate::CodecError;
    use crate::FieldPath;

    use super::decode_service;
    use super::encode_service;

    fn node(value: serde_json::Value) -> ConfigNode {
        ConfigNode::try_from(value).expect("node")
    }

    #[test]
    fn test_decode_service() {
        //given
        let input = node(json!({
            "name": "web",
            "selector": { "app": "web" },
            "type": "NodePort",
            "port": [
                { "name": "http", "port": 80, "targetPort": "http", "nodePort": 30080 },
                { "name": "metrics", "protocol": "udp", "port": "9100", "targetPort": "9100" }
            ]
        }));

        //when
        let service = decode_service(&input, &CodecOptions::default()).expect("service");

        //then
        assert_eq!(service.metadata.namespace, "default");
        assert_eq!(service.kind, "Service");
        let spec = &service.spec;
        assert_eq!(spec.selector.get("app").map(|s| s.as_str()), Some("web"));
        assert_eq!(spec.r#type, Some(ServiceType::NodePort));
        assert_eq!(spec.cluster_ip, None);
        assert_eq!(spec.ports[0].protocol, None);
        assert_eq!(spec.ports[0].target_port, IntOrString::from("http"));
        assert_eq!(spec.ports[0].node_port, Some(30080));
        assert_eq!(spec.ports[1].protocol, Some(Protocol::Udp));
        assert_eq!(spec.ports[1].port, 9100);
        assert_eq!(spec.ports[1].target_port, IntOrString::Int(9100));
        assert_eq!(spec.ports[1].node_port, None);
    }

    #[test]
    fn test_empty_type_and_cluster_ip_left_unset() {
        let service = decode_service(
            &node(json!({ "name": "web", "selector": { "app": "web" }, "type": "", "clusterIP": "" })),
            &CodecOptions::default(),
        )
        .expect("service");
        assert_eq!(service.spec.r#type, None);
        assert_eq!(service.spec.cluster_ip, None);
    }

    #[test]
    fn test_unknown_type() {
        let err = decode_service(
            &node(json!({ "name": "web", "selector": {}, "type": "ExternalName" })),
            &CodecOptions::default(),
        )
        .expect_err("unknown type");
        assert!(matches!(err, CodecError::InvalidEnum { .. }));
        assert_eq!(err.field(), &FieldPath::from("type"));
    }

    #[test]
    fn test_selector_required() {
        let err = decode_service(&node(json!({ "name": "web" })), &CodecOptions::default())
            .expect_err("no selector");
        assert_eq!(err, CodecError::missing(FieldPath::from("selector")));
    }

    #[test]
    fn test_port_range() {
        let err = decode_service(
            &node(json!({
                "name": "web",
                "selector": { "app": "web" },
                "port": [{ "name": "http", "port": 0, "targetPort": "80" }]
            })),
            &CodecOptions::default(),
        )
        .expect_err("port zero");
        assert!(matches!(err, CodecError::OutOfRange { .. }));
        assert_eq!(err.field(), &FieldPath::from("port.0.port"));
    }

    #[test]
    fn test_service_round_trip() {
        let input = node(json!({
            "name": "web",
            "namespace": "prod",
            "selector": { "app": "web", "tier": "front" },
            "clusterIP": "10.0.0.12",
            "type": "LoadBalancer",
            "port": [{ "name": "http", "protocol": "TCP", "port": 80, "targetPort": "8080", "nodePort": 31000 }]
        }));
        let service = decode_service(&input, &CodecOptions::default()).expect("service");
        assert_eq!(encode_service(&service), input);
    }

    #[test]
    fn test_port_without_protocol_round_trip() {
        let input = node(json!({
            "name": "web",
            "namespace": "default",
            "selector": { "app": "web" },
            "port": [{ "name": "http", "port": 80, "targetPort": "http" }]
        }));
        let service = decode_service(&input, &CodecOptions::default()).expect("service");
        assert_eq!(service.spec.ports[0].protocol, None);
        assert_eq!(encode_service(&service), input);

        let again = decode_service(&encode_service(&service), &CodecOptions::default())
            .expect("decode");
        assert_eq!(again, service);
    }
}
