#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

use pod_instantiator_k8s_api::{CustomResourceExt, PodInstanciator};

/// Prints the PodInstanciator CustomResourceDefinition as YAML.
fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&PodInstanciator::crd())?);
    Ok(())
}
