//! Canonical defaulting.
//!
//! The platform fills these values when they are not supplied. Desired and
//! observed objects must both pass through here before they are compared.
//! Every function works on a copy and only fills values that are absent.

use k8_types::core::pod::Container;
use k8_types::core::pod::DnsPolicy;
use k8_types::core::pod::ImagePullPolicy;
use k8_types::core::pod::PodSpec;
use k8_types::core::pod::Protocol;
use k8_types::core::pod::RestartPolicy;
use k8_types::core::replication_controller::ReplicationControllerSpec;
use k8_types::core::service::ServiceSpec;
use k8_types::core::service::ServiceType;

pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";
pub const DEFAULT_TERMINATION_MESSAGE_PATH: &str = "/dev/termination-log";
pub const DEFAULT_REPLICAS: i32 = 1;

/// unset or empty text becomes `default`
fn fill_text(value: &mut Option<String>, default: &str) {
    if value.as_deref().map_or(true, str::is_empty) {
        *value = Some(default.to_owned());
    }
}

fn canonicalize_container(container: &mut Container) {
    container
        .image_pull_policy
        .get_or_insert(ImagePullPolicy::IfNotPresent);
    fill_text(
        &mut container.termination_message_path,
        DEFAULT_TERMINATION_MESSAGE_PATH,
    );
    for port in container.ports.iter_mut() {
        port.protocol.get_or_insert(Protocol::Tcp);
    }
}

pub fn canonicalize(spec: &PodSpec) -> PodSpec {
    let mut spec = spec.clone();
    fill_text(&mut spec.service_account_name, DEFAULT_SERVICE_ACCOUNT);
    spec.restart_policy.get_or_insert(RestartPolicy::Always);
    spec.dns_policy.get_or_insert(DnsPolicy::ClusterFirst);
    spec.containers.iter_mut().for_each(canonicalize_container);
    spec
}

pub fn canonicalize_service(spec: &ServiceSpec) -> ServiceSpec {
    let mut spec = spec.clone();
    spec.r#type.get_or_insert(ServiceType::ClusterIp);
    for port in spec.ports.iter_mut() {
        port.protocol.get_or_insert(Protocol::Tcp);
    }
    spec
}

pub fn canonicalize_replication_controller(
    spec: &ReplicationControllerSpec,
) -> ReplicationControllerSpec {
    let mut spec = spec.clone();
    spec.replicas.get_or_insert(DEFAULT_REPLICAS);
    spec.template.spec = canonicalize(&spec.template.spec);
    spec
}
