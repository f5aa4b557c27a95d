#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod instantiator;

pub use self::instantiator::{PodInstanciator, PodInstanciatorSpec, PortBinding};
pub use k8s_openapi::{
    api::{
        self,
        core::v1::{
            Container, ContainerPort, Namespace, Pod, PodSpec, Service, ServicePort, ServiceSpec,
        },
        networking::v1::{
            HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
            IngressServiceBackend, IngressSpec, ServiceBackendPort,
        },
    },
    apimachinery::pkg::{apis::meta::v1::OwnerReference, util::intstr::IntOrString},
};
pub use kube::{
    api::{Api, ObjectMeta, PostParams, Resource, ResourceExt},
    error::ErrorResponse,
    Client, CustomResourceExt, Error,
};
