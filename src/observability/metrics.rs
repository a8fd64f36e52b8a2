use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub assignment_validations_total: IntCounterVec,
    pub van_recommendations_total: IntCounterVec,
    pub evaluation_latency_seconds: HistogramVec,
    pub jobs_created_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let assignment_validations_total = IntCounterVec::new(
            Opts::new(
                "assignment_validations_total",
                "Assignment validations by outcome",
            ),
            &["outcome"],
        )
        .expect("valid assignment_validations_total metric");

        let van_recommendations_total = IntCounterVec::new(
            Opts::new("van_recommendations_total", "Van recommendations by outcome"),
            &["outcome"],
        )
        .expect("valid van_recommendations_total metric");

        let evaluation_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "evaluation_latency_seconds",
                "Latency of dispatch evaluations in seconds",
            )
            .buckets(vec![1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1]),
            &["operation"],
        )
        .expect("valid evaluation_latency_seconds metric");

        let jobs_created_total = IntCounter::new("jobs_created_total", "Jobs accepted for dispatch")
            .expect("valid jobs_created_total metric");

        registry
            .register(Box::new(assignment_validations_total.clone()))
            .expect("register assignment_validations_total");
        registry
            .register(Box::new(van_recommendations_total.clone()))
            .expect("register van_recommendations_total");
        registry
            .register(Box::new(evaluation_latency_seconds.clone()))
            .expect("register evaluation_latency_seconds");
        registry
            .register(Box::new(jobs_created_total.clone()))
            .expect("register jobs_created_total");

        Self {
            registry,
            assignment_validations_total,
            van_recommendations_total,
            evaluation_latency_seconds,
            jobs_created_total,
        }
    }

    pub fn record_validation(&self, valid: bool, elapsed_secs: f64) {
        let outcome = if valid { "valid" } else { "invalid" };
        self.assignment_validations_total
            .with_label_values(&[outcome])
            .inc();
        self.evaluation_latency_seconds
            .with_label_values(&["validate"])
            .observe(elapsed_secs);
    }

    pub fn record_recommendation(&self, outcome: &str, elapsed_secs: f64) {
        self.van_recommendations_total
            .with_label_values(&[outcome])
            .inc();
        self.evaluation_latency_seconds
            .with_label_values(&["recommend"])
            .observe(elapsed_secs);
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

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
