use super::ServicePorts;
use crate::{
    k8s::{IntOrString, ObjectMeta, PodInstanciator, Service, ServicePort, ServiceSpec},
    naming,
};

/// Headless services have no cluster IP.
const CLUSTER_IP_NONE: &str = "None";

/// Builds a headless service selecting the parent's workload.
pub fn endpoint(parent: &PodInstanciator, policy: ServicePorts) -> Service {
    let ports = match policy {
        ServicePorts::Headless => vec![],
        ServicePorts::Bindings => parent
            .spec
            .ports
            .iter()
            .map(|port| ServicePort {
                name: Some(port.port_name.clone()),
                port: port.port_number,
                target_port: Some(IntOrString::Int(port.port_number)),
                ..Default::default()
            })
            .collect(),
    };

    Service {
        metadata: ObjectMeta {
            name: Some(naming::endpoint_name(parent)),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            ports: Some(ports),
            selector: Some(naming::workload_labels(parent)),
            cluster_ip: Some(CLUSTER_IP_NONE.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
