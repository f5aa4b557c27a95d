//! Builds the desired state of every resource derived from a
//! [`PodInstanciator`].
//!
//! Synthesis is pure: it never consults the store, and the returned objects
//! carry neither an owner nor a namespace until they are bound (see
//! [`crate::ownership`]).

mod endpoint;
mod namespace;
mod route;
mod workload;

pub use self::{
    endpoint::endpoint, namespace::namespace, route::route, workload::workload,
};
use crate::k8s::{Ingress, Namespace, Pod, PodInstanciator, Service};
use anyhow::{bail, Result};

pub const DEFAULT_INGRESS_HOST: &str = "worker.127.0.0.1.sslip.io";

/// Configures how children are synthesized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// The external host on which the route's single rule is served.
    pub ingress_host: String,

    pub service_ports: ServicePorts,
}

/// Determines which ports the headless endpoint exposes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ServicePorts {
    /// The endpoint exposes no ports; the route addresses backend ports
    /// directly by number.
    #[default]
    Headless,

    /// The endpoint exposes one port per port binding.
    Bindings,
}

/// The full set of derived resources, in application order.
#[derive(Clone, Debug, PartialEq)]
pub struct Children {
    pub namespace: Namespace,
    pub workload: Pod,
    pub endpoint: Service,
    pub route: Ingress,
}

pub fn children(parent: &PodInstanciator, config: &SynthesisConfig) -> Children {
    Children {
        namespace: namespace(parent),
        workload: workload(parent),
        endpoint: endpoint(parent, config.service_ports),
        route: route(parent, &config.ingress_host),
    }
}

// === impl SynthesisConfig ===

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            ingress_host: DEFAULT_INGRESS_HOST.to_string(),
            service_ports: ServicePorts::default(),
        }
    }
}

// === impl ServicePorts ===

impl std::str::FromStr for ServicePorts {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "headless" => Ok(Self::Headless),
            "bindings" => Ok(Self::Bindings),
            s => bail!("invalid service port policy: {}", s),
        }
    }
}

impl std::fmt::Display for ServicePorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Headless => f.write_str("headless"),
            Self::Bindings => f.write_str("bindings"),
        }
    }
}
