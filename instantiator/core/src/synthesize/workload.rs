use crate::{
    k8s::{Container, ContainerPort, ObjectMeta, Pod, PodInstanciator, PodSpec},
    naming,
};

/// Builds a pod running the parent's image, with one container port per
/// port binding in declaration order.
pub fn workload(parent: &PodInstanciator) -> Pod {
    let name = naming::workload_name(parent);
    let ports = parent
        .spec
        .ports
        .iter()
        .map(|port| ContainerPort {
            name: Some(port.port_name.clone()),
            container_port: port.port_number,
            ..Default::default()
        })
        .collect();

    Pod {
        metadata: ObjectMeta {
            name: Some(name.clone()),
            labels: Some(naming::workload_labels(parent)),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name,
                image: Some(parent.spec.image_name.clone()),
                ports: Some(ports),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{k8s::PortBinding, tests::mk_parent};
    use pretty_assertions::assert_eq;

    #[test]
    fn projects_ports_in_order() {
        let pod = workload(&mk_parent(
            "web",
            vec![
                PortBinding::new("a", 80),
                PortBinding::new("b", 81),
                PortBinding::new("c", 82),
            ],
        ));

        let spec = pod.spec.expect("pod must have a spec");
        assert_eq!(spec.containers.len(), 1);
        let container = &spec.containers[0];
        assert_eq!(container.name, "web-pod");
        assert_eq!(container.image.as_deref(), Some("nginx:1.25"));
        let ports = container
            .ports
            .iter()
            .flatten()
            .map(|p| (p.name.as_deref().unwrap(), p.container_port))
            .collect::<Vec<_>>();
        assert_eq!(ports, vec![("a", 80), ("b", 81), ("c", 82)]);
    }

    #[test]
    fn labeled_for_selection() {
        let pod = workload(&mk_parent("web", vec![]));
        assert_eq!(pod.metadata.name.as_deref(), Some("web-pod"));
        assert_eq!(
            pod.metadata.labels,
            Some(maplit::btreemap! { "app".to_string() => "web-pod".to_string() })
        );
    }
}
