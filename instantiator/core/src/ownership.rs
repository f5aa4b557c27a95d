//! Links derived resources to the [`PodInstanciator`] that owns them.
//!
//! The owner reference is what lets the cluster's garbage collector delete
//! children along with their parent; nothing in this crate reads it back.
//!
//! Owner references carry no namespace: a namespaced owner is resolved in
//! its dependent's namespace, and cannot be resolved at all from a
//! cluster-scoped dependent. Children are bound only where the garbage
//! collector can resolve the reference.

use crate::{
    k8s::{OwnerReference, PodInstanciator, Resource, ResourceExt},
    store::Child,
    synthesize::Children,
    Error,
};
use tracing::debug;

/// Places namespaced children in the parent's target namespace and sets
/// `parent` as their controlling owner.
///
/// Namespaced children must share the parent's namespace. Cluster-scoped
/// children are left without an owner reference, since a namespaced parent
/// cannot own them; they outlive the parent.
pub fn bind<K: Child>(child: &mut K, parent: &PodInstanciator) -> Result<(), Error> {
    if !K::NAMESPACED {
        debug!(kind = %K::kind_name(), id = %child.id(), "Cluster-scoped child left unowned");
        return Ok(());
    }

    child.meta_mut().namespace = Some(parent.spec.namespace.clone());
    let fail = |child: &K, reason| Error::Ownership {
        kind: K::kind_name(),
        id: child.id(),
        reason,
    };

    if parent.namespace().as_deref() != Some(parent.spec.namespace.as_str()) {
        return Err(fail(&*child, "cross-namespace owner references are disallowed"));
    }
    let owner = owner_reference(parent).map_err(|reason| fail(&*child, reason))?;
    child.meta_mut().owner_references = Some(vec![owner]);
    Ok(())
}

/// Binds every child, stopping at the first failure.
pub fn bind_all(children: &mut Children, parent: &PodInstanciator) -> Result<(), Error> {
    bind(&mut children.namespace, parent)?;
    bind(&mut children.workload, parent)?;
    bind(&mut children.endpoint, parent)?;
    bind(&mut children.route, parent)
}

fn owner_reference(parent: &PodInstanciator) -> Result<OwnerReference, &'static str> {
    let meta = parent.meta();
    if meta.name.is_none() {
        return Err("owner has no name");
    }
    if meta.uid.is_none() {
        return Err("owner has no uid");
    }

    let owner = parent
        .controller_owner_ref(&())
        .ok_or("owner cannot be referenced")?;
    Ok(OwnerReference {
        block_owner_deletion: Some(true),
        ..owner
    })
}
