use crate::k8s::{
    Api, Client, Ingress, Namespace, Pod, PodInstanciator, PostParams, Resource, ResourceExt,
    Service,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Field manager recorded on every object this controller creates.
pub const FIELD_MANAGER: &str = "pod-instantiator";

/// Identifies an object by its name and, for namespaced kinds, namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub namespace: Option<String>,
    pub name: String,
}

/// A kind that can be read from and written to a [`Store`].
pub trait Object:
    Resource<DynamicType = ()> + Clone + fmt::Debug + DeserializeOwned + Serialize + Send + Sync + 'static
{
    const NAMESPACED: bool;

    fn api(client: Client, namespace: Option<&str>) -> Api<Self>;

    fn id(&self) -> ResourceId {
        ResourceId {
            namespace: self.namespace(),
            name: self.name_any(),
        }
    }

    fn kind_name() -> String {
        Self::kind(&()).to_string()
    }
}

/// The four kinds of resources derived from a [`PodInstanciator`], in the
/// order in which they are applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildKind {
    Namespace,
    Workload,
    Endpoint,
    Route,
}

/// An [`Object`] that is derived from, and owned by, a [`PodInstanciator`].
pub trait Child: Object {
    const KIND: ChildKind;
}

/// The narrow view of the cluster's object store that convergence needs.
///
/// Implementations surface the store's errors unchanged; a missing object is
/// reported as `Ok(None)` rather than as an error.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get<K: Object>(&self, id: &ResourceId) -> Result<Option<K>, kube::Error>;

    async fn create<K: Object>(&self, resource: &K) -> Result<(), kube::Error>;
}

/// A [`Store`] backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

// === impl ResourceId ===

impl ResourceId {
    pub fn namespaced(namespace: impl ToString, name: impl ToString) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
        }
    }

    pub fn cluster(name: impl ToString) -> Self {
        Self {
            namespace: None,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace.as_deref() {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

// === impl ChildKind ===

impl ChildKind {
    pub const ALL: [ChildKind; 4] = [Self::Namespace, Self::Workload, Self::Endpoint, Self::Route];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Workload => "workload",
            Self::Endpoint => "endpoint",
            Self::Route => "route",
        }
    }
}

impl fmt::Display for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === impl Object ===

impl Object for Namespace {
    const NAMESPACED: bool = false;

    fn api(client: Client, _: Option<&str>) -> Api<Self> {
        Api::all(client)
    }
}

macro_rules! namespaced_object {
    ($($ty:ty),+) => {
        $(
            impl Object for $ty {
                const NAMESPACED: bool = true;

                fn api(client: Client, namespace: Option<&str>) -> Api<Self> {
                    match namespace {
                        Some(ns) => Api::namespaced(client, ns),
                        None => Api::default_namespaced(client),
                    }
                }
            }
        )+
    };
}

namespaced_object!(PodInstanciator, Pod, Service, Ingress);

impl Child for Namespace {
    const KIND: ChildKind = ChildKind::Namespace;
}

impl Child for Pod {
    const KIND: ChildKind = ChildKind::Workload;
}

impl Child for Service {
    const KIND: ChildKind = ChildKind::Endpoint;
}

impl Child for Ingress {
    const KIND: ChildKind = ChildKind::Route;
}

// === impl KubeStore ===

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Store for KubeStore {
    async fn get<K: Object>(&self, id: &ResourceId) -> Result<Option<K>, kube::Error> {
        K::api(self.client.clone(), id.namespace.as_deref())
            .get_opt(&id.name)
            .await
    }

    async fn create<K: Object>(&self, resource: &K) -> Result<(), kube::Error> {
        let params = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };
        K::api(self.client.clone(), resource.namespace().as_deref())
            .create(&params, resource)
            .await?;
        Ok(())
    }
}
