use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub schedule_runs_total: IntCounterVec,
    pub schedule_generation_seconds: HistogramVec,
    pub unassigned_workers: IntGaugeVec,
    pub vehicles_used: IntGaugeVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let schedule_runs_total = IntCounterVec::new(
            Opts::new("schedule_runs_total", "Total schedule generations by outcome"),
            &["outcome"],
        )
        .expect("valid schedule_runs_total metric");

        let schedule_generation_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "schedule_generation_seconds",
                "Latency of schedule generation in seconds",
            ),
            &["outcome"],
        )
        .expect("valid schedule_generation_seconds metric");

        let unassigned_workers = IntGaugeVec::new(
            Opts::new(
                "schedule_unassigned_workers",
                "Workers left without a seat by the latest run",
            ),
            &["shift"],
        )
        .expect("valid schedule_unassigned_workers metric");

        let vehicles_used = IntGaugeVec::new(
            Opts::new("schedule_vehicles_used", "Vehicles used by the latest run"),
            &["shift"],
        )
        .expect("valid schedule_vehicles_used metric");

        registry
            .register(Box::new(schedule_runs_total.clone()))
            .expect("register schedule_runs_total");
        registry
            .register(Box::new(schedule_generation_seconds.clone()))
            .expect("register schedule_generation_seconds");
        registry
            .register(Box::new(unassigned_workers.clone()))
            .expect("register schedule_unassigned_workers");
        registry
            .register(Box::new(vehicles_used.clone()))
            .expect("register schedule_vehicles_used");

        Self {
            registry,
            schedule_runs_total,
            schedule_generation_seconds,
            unassigned_workers,
            vehicles_used,
        }
    }

    pub fn record_run(&self, outcome: &str, elapsed_seconds: f64) {
        self.schedule_runs_total.with_label_values(&[outcome]).inc();
        self.schedule_generation_seconds
            .with_label_values(&[outcome])
            .observe(elapsed_seconds);
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
