use crate::{
    store::{Child, Store},
    Error,
};
use tracing::{debug, info};

/// The result of applying a single child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The child did not exist and was created.
    Created,

    /// A child with the same identity already exists. It is left untouched,
    /// even if it differs from the desired state.
    Exists,
}

/// Creates `resource` unless an object with the same identity already exists.
///
/// A lookup failure other than "not found" aborts before anything is created.
pub async fn apply<S: Store, K: Child>(store: &S, resource: &K) -> Result<Applied, Error> {
    let id = resource.id();
    let kind = K::kind_name();

    let existing = store
        .get::<K>(&id)
        .await
        .map_err(|source| Error::Lookup {
            kind: kind.clone(),
            id: id.clone(),
            source,
        })?;
    if existing.is_some() {
        debug!(%kind, %id, "Already exists");
        return Ok(Applied::Exists);
    }

    store
        .create(resource)
        .await
        .map_err(|source| Error::Create {
            kind: kind.clone(),
            id: id.clone(),
            source,
        })?;
    info!(%kind, %id, child = %K::KIND, "Created");
    Ok(Applied::Created)
}
