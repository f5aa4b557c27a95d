use crate::store::ResourceId;
use thiserror::Error;

/// Errors that abort a convergence pass.
///
/// None of these are permanent: a pass that fails is expected to be retried
/// in full, which is safe because every step only ever creates what is
/// missing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to get {kind} {id}: {source}")]
    Lookup {
        kind: String,
        id: ResourceId,
        #[source]
        source: kube::Error,
    },

    #[error("failed to create {kind} {id}: {source}")]
    Create {
        kind: String,
        id: ResourceId,
        #[source]
        source: kube::Error,
    },

    #[error("cannot set owner of {kind} {id}: {reason}")]
    Ownership {
        kind: String,
        id: ResourceId,
        reason: &'static str,
    },
}

impl Error {
    /// The kind of the resource the failed operation targeted.
    pub fn kind(&self) -> &str {
        match self {
            Self::Lookup { kind, .. } | Self::Create { kind, .. } | Self::Ownership { kind, .. } => {
                kind
            }
        }
    }
}
