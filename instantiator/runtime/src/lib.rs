#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use pod_instantiator_core as core;
pub use pod_instantiator_k8s_api as k8s;

mod args;
mod backoff;
mod controller;
mod metrics;

pub use self::{
    args::Args,
    backoff::{Backoff, Schedule},
    controller::Context,
    metrics::Metrics,
};
