use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Invocation metrics
    pub invocations: IntCounterVec,

    // Token metrics
    pub cache_hits: IntCounter,
    pub token_fetches: IntCounterVec,
    pub token_fetch_duration: HistogramVec,

    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("streamtoken".into()), None)
            .expect("valid registry prefix");

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Invocations, by outcome: succeeded / recovered / fault
            invocations: IntCounterVec::new(Opts::new("invocations_total", "Handler invocations by outcome"), &["outcome"]).expect("valid metric"),

            // Token
            cache_hits: IntCounter::new("token_cache_hits_total", "Invocations served by the cached token").expect("valid metric"),
            token_fetches: IntCounterVec::new(Opts::new("token_fetches_total", "Token endpoint exchanges by result"), &["result"]).expect("valid metric"),
            token_fetch_duration: HistogramVec::new(HistogramOpts::new("token_fetch_duration_seconds", "Token endpoint exchange duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["result"]).expect("valid metric"),

            up: IntGauge::new("up", "1 if service is healthy").expect("valid metric"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        for collector in [
            Box::new(metrics.invocations.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(metrics.cache_hits.clone()),
            Box::new(metrics.token_fetches.clone()),
            Box::new(metrics.token_fetch_duration.clone()),
            Box::new(metrics.up.clone()),
        ] {
            reg.register(collector).expect("metric registered once");
        }

        metrics
    }
}
