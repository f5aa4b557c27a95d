use crate::core::{ChildKind, Error, Outcome};
use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};

#[derive(Clone, Debug)]
pub struct Metrics {
    passes: Family<PassLabels, Counter>,
    created: Family<ChildLabels, Counter>,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct PassLabels {
    result: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct ChildLabels {
    kind: String,
}

impl Metrics {
    pub fn register(prom: &mut Registry) -> Self {
        let passes = Family::default();
        prom.register(
            "reconcile_passes",
            "Count of convergence passes by result",
            passes.clone(),
        );

        let created = Family::default();
        prom.register(
            "children_created",
            "Count of child resources created by kind",
            created.clone(),
        );

        Self { passes, created }
    }

    pub fn record(&self, result: &Result<Outcome, Error>) {
        let result = match result {
            Ok(Outcome::ParentMissing) => "parent_missing",
            Ok(Outcome::Converged { created }) => {
                for kind in created {
                    self.inc_created(*kind);
                }
                "converged"
            }
            Err(_) => "error",
        };
        self.passes
            .get_or_create(&PassLabels {
                result: result.to_string(),
            })
            .inc();
    }

    fn inc_created(&self, kind: ChildKind) {
        self.created
            .get_or_create(&ChildLabels {
                kind: kind.to_string(),
            })
            .inc();
    }
}
