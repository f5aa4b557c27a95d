use crate::{
    backoff::Schedule,
    core::{Error, KubeStore, Object, Outcome, Reconciler},
    k8s::{Api, Client, Ingress, Pod, PodInstanciator, Service},
    metrics::Metrics,
};
use futures::prelude::*;
use kube::runtime::{controller::Action, watcher, Controller};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// State shared by every convergence pass.
pub struct Context {
    reconciler: Reconciler<KubeStore>,
    schedule: Schedule,
    metrics: Metrics,
}

// === impl Context ===

impl Context {
    pub fn new(reconciler: Reconciler<KubeStore>, schedule: Schedule, metrics: Metrics) -> Self {
        Self {
            reconciler,
            schedule,
            metrics,
        }
    }
}

/// Watches `PodInstanciator` resources and the children they own, running a
/// convergence pass whenever one of them changes.
///
/// Namespaces are not watched: they carry no owner reference, so a deleted
/// namespace is recreated by the periodic resync instead.
pub(crate) async fn run(client: Client, ctx: Arc<Context>, drain: drain::Watch) {
    let (close_tx, close_rx) = tokio::sync::oneshot::channel::<()>();

    let passes = Controller::new(
        Api::<PodInstanciator>::all(client.clone()),
        watcher::Config::default(),
    )
    .owns(Api::<Pod>::all(client.clone()), watcher::Config::default())
    .owns(Api::<Service>::all(client.clone()), watcher::Config::default())
    .owns(Api::<Ingress>::all(client), watcher::Config::default())
    .graceful_shutdown_on(close_rx.map(|_| ()))
    .run(reconcile, error_policy, ctx)
    .for_each(|res| async move {
        match res {
            Ok((parent, _)) => debug!(%parent, "Reconciled"),
            Err(error) => warn!(%error, "Reconciliation failed"),
        }
    });
    tokio::pin!(passes);

    info!("Controller started");
    tokio::select! {
        _ = (&mut passes) => {}
        handle = drain.signaled() => {
            let _ = close_tx.send(());
            handle.release_after(passes).await;
        }
    }
    info!("Controller terminated");
}

async fn reconcile(parent: Arc<PodInstanciator>, ctx: Arc<Context>) -> Result<Action, Error> {
    let id = parent.id();
    let result = ctx.reconciler.reconcile(&id).await;
    ctx.metrics.record(&result);

    let outcome = result?;
    if let Outcome::Converged { created } = &outcome {
        if !created.is_empty() {
            info!(%id, ?created, "Created children");
        }
    }
    Ok(ctx.schedule.succeeded(&id, &outcome))
}

fn error_policy(parent: Arc<PodInstanciator>, error: &Error, ctx: Arc<Context>) -> Action {
    let id = parent.id();
    let action = ctx.schedule.failed(&id);
    warn!(%id, %error, ?action, "Convergence pass failed; retrying");
    action
}
