use crate::{
    k8s::{
        HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
        IngressServiceBackend, IngressSpec, ObjectMeta, PodInstanciator, ServiceBackendPort,
    },
    naming,
};

const REWRITE_TARGET_ANNOTATION: &str = "nginx.ingress.kubernetes.io/rewrite-target";
const PATH_TYPE_PREFIX: &str = "Prefix";

/// Builds an ingress with a single rule on `host`, routing `/<port-name>` to
/// the parent's service on that port's number.
pub fn route(parent: &PodInstanciator, host: &str) -> Ingress {
    let service = naming::endpoint_name(parent);
    let paths = parent
        .spec
        .ports
        .iter()
        .map(|port| HTTPIngressPath {
            path: Some(naming::route_path(port)),
            path_type: PATH_TYPE_PREFIX.to_string(),
            backend: IngressBackend {
                service: Some(IngressServiceBackend {
                    name: service.clone(),
                    port: Some(ServiceBackendPort {
                        number: Some(port.port_number),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
        })
        .collect();

    Ingress {
        metadata: ObjectMeta {
            name: Some(naming::route_name(parent)),
            annotations: Some(
                Some((REWRITE_TARGET_ANNOTATION.to_string(), "/".to_string()))
                    .into_iter()
                    .collect(),
            ),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            rules: Some(vec![IngressRule {
                host: Some(host.to_string()),
                http: Some(HTTPIngressRuleValue { paths }),
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
