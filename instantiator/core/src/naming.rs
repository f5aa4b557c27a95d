//! Deterministic names for everything derived from a [`PodInstanciator`].
//!
//! Names depend only on the parent's name (and, for ingress paths, on a port
//! name), so the same parent always yields the same children.

use crate::k8s::{PodInstanciator, PortBinding, ResourceExt};
use std::collections::BTreeMap;

/// Label key used to select the workload from its service.
pub const APP_LABEL: &str = "app";

pub fn namespace_name(parent: &PodInstanciator) -> String {
    parent.spec.namespace.clone()
}

pub fn workload_name(parent: &PodInstanciator) -> String {
    format!("{}-pod", parent.name_any())
}

pub fn endpoint_name(parent: &PodInstanciator) -> String {
    format!("{}-svc", parent.name_any())
}

pub fn route_name(parent: &PodInstanciator) -> String {
    format!("{}-ingress", parent.name_any())
}

pub fn route_path(port: &PortBinding) -> String {
    format!("/{}", port.port_name)
}

/// Labels carried by the workload and matched by the endpoint's selector.
pub fn workload_labels(parent: &PodInstanciator) -> BTreeMap<String, String> {
    Some((APP_LABEL.to_string(), workload_name(parent)))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::{ObjectMeta, PodInstanciatorSpec};

    fn mk_parent(name: &str, ns: &str, ports: Vec<PortBinding>) -> PodInstanciator {
        PodInstanciator {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(ns.to_string()),
                ..Default::default()
            },
            spec: PodInstanciatorSpec {
                namespace: "target".to_string(),
                image_name: "nginx".to_string(),
                ports,
            },
        }
    }

    #[test]
    fn names_depend_only_on_parent_name() {
        let a = mk_parent("foo", "ns-0", vec![]);
        let b = mk_parent(
            "foo",
            "ns-1",
            vec![PortBinding::new("a", 80), PortBinding::new("b", 81)],
        );
        for parent in [&a, &b] {
            assert_eq!(workload_name(parent), "foo-pod");
            assert_eq!(endpoint_name(parent), "foo-svc");
            assert_eq!(route_name(parent), "foo-ingress");
        }
    }

    #[test]
    fn route_path_uses_port_name() {
        assert_eq!(route_path(&PortBinding::new("metrics", 9090)), "/metrics");
    }

    #[test]
    fn selector_labels_name_the_workload() {
        let parent = mk_parent("foo", "ns-0", vec![]);
        assert_eq!(
            workload_labels(&parent),
            Some(("app".to_string(), "foo-pod".to_string()))
                .into_iter()
                .collect()
        );
    }
}
