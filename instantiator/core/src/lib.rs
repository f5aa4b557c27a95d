#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod apply;
mod error;
pub mod naming;
pub mod ownership;
pub mod reconcile;
pub mod store;
pub mod synthesize;


pub use self::{
    apply::{apply, Applied},
    error::Error,
    reconcile::{Outcome, Reconciler},
    store::{Child, ChildKind, KubeStore, Object, ResourceId, Store},
    synthesize::{Children, ServicePorts, SynthesisConfig},
};
pub use pod_instantiator_k8s_api as k8s;
