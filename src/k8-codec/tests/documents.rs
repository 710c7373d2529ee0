use std::sync::Once;

use k8_codec::k8_config::CodecOptions;
use k8_codec::k8_config::ConfigNode;
use k8_codec::k8_types::core::pod::PodSpec;
use k8_codec::k8_types::core::pod::Protocol;
use k8_codec::k8_types::core::pod::UriScheme;
use k8_codec::k8_types::core::pod::VolumeSource;
use k8_codec::k8_types::core::replication_controller::ReplicationControllerSpec;
use k8_codec::k8_types::core::service::ServiceSpec;
use k8_codec::k8_types::core::service::ServiceType;
use k8_codec::k8_types::IntOrString;
use k8_codec::k8_types::K8Obj;
use k8_codec::plan_drift;
use k8_codec::CodecError;
use k8_codec::Drift;
use k8_codec::FieldPath;
use k8_codec::Resource;

static LOGGER: Once = Once::new();

fn read<S: Resource>(path: &str) -> Result<K8Obj<S>, CodecError> {
    LOGGER.call_once(|| fluvio_future::subscriber::init_tracer(None));
    let node = ConfigNode::from_file(path).expect("fixture");
    S::decode(&node, &CodecOptions::default())
}

#[test]
fn test_decode_pod_document() {
    let pod: K8Obj<PodSpec> = read("data/pod.yaml").expect("pod");

    assert_eq!(pod.metadata.name, "web");
    assert_eq!(pod.metadata.namespace, "prod");
    assert_eq!(pod.spec.containers.len(), 2);

    let web = pod.spec.container("web").expect("web container");
    assert_eq!(web.ports[0].container_port, 80);
    assert_eq!(web.ports[0].protocol, Some(Protocol::Tcp));
    assert_eq!(web.volume_mounts[1].read_only, Some(true));
    assert_eq!(web.volume_mounts[0].read_only, None);
    let liveness = web.liveness_probe.as_ref().expect("liveness");
    assert_eq!(liveness.initial_delay_seconds, Some(10));
    assert!(matches!(
        &liveness.handler,
        k8_codec::k8_types::core::pod::ProbeHandler::HttpGet(action)
            if action.scheme == UriScheme::Http && action.port == IntOrString::from("http")
    ));
    assert!(web.readiness_probe.is_some());
    assert_eq!(web.command, None);

    let reloader = pod.spec.container("reloader").expect("reloader container");
    assert_eq!(reloader.args, Some(vec![]));

    let kinds: Vec<&str> = pod.spec.volumes.iter().map(|v| v.source.kind()).collect();
    assert_eq!(kinds, vec!["emptyDir", "hostPath", "awsElasticBlockStore"]);
    match &pod.spec.volumes[2].source {
        VolumeSource::AwsElasticBlockStore(ebs) => {
            assert_eq!(ebs.fs_type.as_deref(), Some("ext4"));
            assert_eq!(ebs.partition, None);
            assert_eq!(ebs.read_only, None);
        }
        other => panic!("unexpected source {:?}", other),
    }
}

#[test]
fn test_encoded_pod_decodes_to_same_object() {
    let pod: K8Obj<PodSpec> = read("data/pod.yaml").expect("pod");
    let encoded = PodSpec::encode(&pod);
    let again = PodSpec::decode(&encoded, &CodecOptions::default()).expect("decode");
    assert_eq!(again, pod);
}

#[test]
fn test_observed_pod_is_in_sync() {
    //given
    let desired: K8Obj<PodSpec> = read("data/pod.yaml").expect("desired");
    let observed: K8Obj<PodSpec> = read("data/pod_observed.yaml").expect("observed");
    assert_ne!(desired.spec, observed.spec);

    //when
    let drift = plan_drift(&desired, &observed).expect("plan");

    //then
    assert_eq!(drift, Drift::InSync);
}

#[test]
fn test_changed_service_account_is_update() {
    let desired: K8Obj<PodSpec> = read("data/pod.yaml").expect("desired");
    let mut observed: K8Obj<PodSpec> = read("data/pod_observed.yaml").expect("observed");
    observed.spec.service_account_name = Some("builder".to_owned());

    let drift = plan_drift(&desired, &observed).expect("plan");
    assert_eq!(drift.fields(), ["serviceAccountName".to_owned()]);
    assert!(matches!(drift, Drift::Update { .. }));
}

#[test]
fn test_namespace_change_is_replace() {
    let desired: K8Obj<PodSpec> = read("data/pod.yaml").expect("desired");
    let mut observed = desired.clone();
    observed.metadata.namespace = "staging".to_owned();

    let drift = plan_drift(&desired, &observed).expect("plan");
    assert_eq!(
        drift,
        Drift::Replace {
            fields: vec!["namespace".to_owned()]
        }
    );
}

#[test]
fn test_service_document() {
    let service: K8Obj<ServiceSpec> = read("data/service.yaml").expect("service");
    let spec = &service.spec;
    assert_eq!(spec.r#type, Some(ServiceType::NodePort));
    assert_eq!(spec.ports[0].target_port, IntOrString::from("http"));
    assert_eq!(spec.ports[1].target_port, IntOrString::Int(9100));
    assert_eq!(spec.ports[1].node_port, Some(30910));

    let node = ServiceSpec::encode(&service);
    let port = node
        .get("port")
        .and_then(|ports| ports.as_list())
        .map(|ports| ports[1].clone())
        .expect("second port");
    assert_eq!(port.get("targetPort"), Some(&ConfigNode::from("9100")));
    assert_eq!(port.get("protocol"), Some(&ConfigNode::from("UDP")));
}

#[test]
fn test_replication_controller_document() {
    let controller: K8Obj<ReplicationControllerSpec> =
        read("data/replication_controller.yaml").expect("rc");
    let spec = &controller.spec;

    assert_eq!(spec.replicas, Some(3));
    let labels = &spec.template.metadata.labels;
    assert_eq!(labels.get("app").map(|s| s.as_str()), Some("web"));
    assert_eq!(labels.get("tier").map(|s| s.as_str()), Some("front"));

    // replicas scaled by the platform is drift
    let mut observed = controller.clone();
    observed.spec.replicas = Some(5);
    let drift = plan_drift(&controller, &observed).expect("plan");
    assert_eq!(drift.fields(), ["replicas".to_owned()]);
    assert!(matches!(drift, Drift::Update { .. }));
}

#[test]
fn test_ambiguous_volume_document() {
    let err = read::<PodSpec>("data/ambiguous_volume.yaml").expect_err("ambiguous");
    assert_eq!(
        err,
        CodecError::AmbiguousVariant {
            field: FieldPath::from("volume.0"),
            found: vec!["emptyDir", "hostPath"],
        }
    );
    assert_eq!(err.to_string(), "volume.0: only one of emptyDir, hostPath may be set");
}

#[test]
fn test_strict_options_document() {
    let node = ConfigNode::from_yaml_str(
        "name: dns\nselector:\n  app: dns\nport:\n- name: dns\n  protocol: SCTP\n  port: 53\n  targetPort: \"53\"\n",
    )
    .expect("yaml");
    let err = ServiceSpec::decode(&node, &CodecOptions::default().strict()).expect_err("strict");
    assert!(matches!(err, CodecError::InvalidEnum { .. }));
    assert_eq!(err.field(), &FieldPath::from("port.0.protocol"));
}
