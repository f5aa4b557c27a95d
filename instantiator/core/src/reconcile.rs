use crate::{
    apply::{apply, Applied},
    k8s::PodInstanciator,
    ownership,
    store::{Child, ChildKind, Object, ResourceId, Store},
    synthesize::{self, Children, SynthesisConfig},
    Error,
};
use tracing::{debug, instrument};

/// Drives a single convergence pass for one [`PodInstanciator`].
///
/// A pass holds no state beyond what it reads from the store. Passes for
/// the same parent must not run concurrently; the caller is responsible for
/// serializing them and for deciding when a failed pass is retried.
#[derive(Clone, Debug)]
pub struct Reconciler<S> {
    store: S,
    config: SynthesisConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The parent no longer exists; there is nothing to do.
    ParentMissing,

    /// Every child exists. `created` lists the kinds created by this pass,
    /// in application order.
    Converged { created: Vec<ChildKind> },
}

// === impl Reconciler ===

impl<S: Store> Reconciler<S> {
    pub fn new(store: S, config: SynthesisConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Converges the children of the parent identified by `id`.
    ///
    /// Children are applied in order (namespace, workload, endpoint, route)
    /// and the pass stops at the first failure. Children created before the
    /// failure are kept; the next pass finds them and only creates the rest.
    #[instrument(skip_all, fields(%id))]
    pub async fn reconcile(&self, id: &ResourceId) -> Result<Outcome, Error> {
        let parent = match self.store.get::<PodInstanciator>(id).await {
            Ok(Some(parent)) => parent,
            Ok(None) => {
                debug!("Parent not found");
                return Ok(Outcome::ParentMissing);
            }
            Err(source) => {
                return Err(Error::Lookup {
                    kind: PodInstanciator::kind_name(),
                    id: id.clone(),
                    source,
                })
            }
        };

        let mut children = synthesize::children(&parent, &self.config);
        ownership::bind_all(&mut children, &parent)?;

        let Children {
            namespace,
            workload,
            endpoint,
            route,
        } = children;
        let mut created = Vec::with_capacity(ChildKind::ALL.len());
        self.apply_child(&namespace, &mut created).await?;
        self.apply_child(&workload, &mut created).await?;
        self.apply_child(&endpoint, &mut created).await?;
        self.apply_child(&route, &mut created).await?;

        debug!(?created, "Converged");
        Ok(Outcome::Converged { created })
    }

    async fn apply_child<K: Child>(
        &self,
        child: &K,
        created: &mut Vec<ChildKind>,
    ) -> Result<(), Error> {
        if apply(&self.store, child).await? == Applied::Created {
            created.push(K::KIND);
        }
        Ok(())
    }
}
