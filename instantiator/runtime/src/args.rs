use crate::{
    backoff::{Backoff, Schedule},
    controller::{self, Context},
    core::{synthesize::DEFAULT_INGRESS_HOST, KubeStore, Reconciler, ServicePorts, SynthesisConfig},
    metrics::Metrics,
};
use anyhow::{bail, Result};
use clap::Parser;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Parser)]
#[clap(
    name = "pod-instantiator",
    about = "Creates a namespace, pod, headless service and ingress for each PodInstanciator"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "pod_instantiator=info,warn",
        env = "POD_INSTANTIATOR_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    #[clap(flatten)]
    admin: kubert::AdminArgs,

    /// Host on which every generated ingress rule is served.
    #[clap(long, default_value = DEFAULT_INGRESS_HOST)]
    ingress_host: String,

    /// Ports exposed by generated services: `headless` exposes none and
    /// relies on ingress paths to address container ports directly;
    /// `bindings` exposes one port per declared port.
    #[clap(long, default_value = "headless")]
    service_ports: ServicePorts,

    /// Interval after which a converged resource is checked again.
    #[clap(long, default_value = "300")]
    resync_interval_secs: u64,

    #[clap(long, default_value = "500")]
    backoff_base_ms: u64,

    #[clap(long, default_value = "300")]
    backoff_max_secs: u64,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let synthesis = self.synthesis_config();
        let schedule = self.schedule();
        let Self {
            log_level,
            log_format,
            client,
            admin,
            ..
        } = self;

        let mut prom = <Registry>::default();
        let metrics = Metrics::register(prom.sub_registry_with_prefix("pod_instantiator"));
        let rt_metrics = kubert::RuntimeMetrics::register(prom.sub_registry_with_prefix("kube"));

        let runtime = kubert::Runtime::builder()
            .with_log(log_level, log_format)
            .with_metrics(rt_metrics)
            .with_admin(admin.into_builder().with_prometheus(prom))
            .with_client(client)
            .build()
            .await?;

        info!(
            ingress_host = %synthesis.ingress_host,
            service_ports = %synthesis.service_ports,
            resync = ?schedule.resync,
            "Starting"
        );

        let client = runtime.client();
        let reconciler = Reconciler::new(KubeStore::new(client.clone()), synthesis);
        let ctx = Arc::new(Context::new(reconciler, schedule, metrics));
        tokio::spawn(
            controller::run(client, ctx, runtime.shutdown_handle())
                .instrument(info_span!("podinstanciators")),
        );

        // Block the main thread on the shutdown signal. Once it fires, wait for the background tasks to
        // complete before exiting.
        if runtime.run().await.is_err() {
            bail!("Aborted");
        }

        Ok(())
    }

    fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            ingress_host: self.ingress_host.clone(),
            service_ports: self.service_ports,
        }
    }

    fn schedule(&self) -> Schedule {
        Schedule::new(
            Duration::from_secs(self.resync_interval_secs),
            Backoff::new(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_secs(self.backoff_max_secs),
            ),
        )
    }
}
