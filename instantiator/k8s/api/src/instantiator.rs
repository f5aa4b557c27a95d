use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Describes a single-container workload together with the namespace,
/// headless service and ingress that expose it.
#[derive(Clone, Debug, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "api.my.domain",
    version = "v1alpha1",
    kind = "PodInstanciator",
    singular = "podinstanciator",
    plural = "podinstanciators",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct PodInstanciatorSpec {
    /// Namespace in which the derived resources are created.
    pub namespace: String,

    pub image_name: String,

    /// Ports exposed by the container. Each port is also routed through the
    /// ingress under `/<portName>`.
    #[serde(default)]
    pub ports: Vec<PortBinding>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortBinding {
    pub port_name: String,
    pub port_number: i32,
}

impl PortBinding {
    pub fn new(name: impl ToString, number: i32) -> Self {
        Self {
            port_name: name.to_string(),
            port_number: number,
        }
    }
}
