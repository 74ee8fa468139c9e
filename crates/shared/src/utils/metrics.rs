use prometheus_client::{
    encoding::{EncodeLabelSet, EncodeLabelValue},
    metrics::{
        counter::Counter,
        family::Family,
        histogram::{Histogram, exponential_buckets},
    },
    registry::Registry,
};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Login,
    CreateCard,
    DeleteCard,
    FindCard,
    FindAllCards,
    FindMyCards,
    MyCardBalance,
    SetStatus,
    Transfer,
    RequestBlock,
    CompleteBlockRequest,
    FindActiveBlockRequests,
    CreateUser,
    UpdateUser,
    DeleteUser,
    FindUser,
    FindAllUsers,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MethodLabels {
    pub method: Method,
    pub status: Status,
}

/// Per-operation counters and latency histograms shared by every service.
#[derive(Clone, Debug)]
pub struct Metrics {
    requests: Family<MethodLabels, Counter>,
    request_duration: Family<MethodLabels, Histogram, fn() -> Histogram>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.001, 2.0, 14))
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "bankcards_requests",
            "Number of core operations by method and outcome",
            self.requests.clone(),
        );
        registry.register(
            "bankcards_request_duration_seconds",
            "Core operation latency in seconds",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, elapsed_secs: f64) {
        let labels = MethodLabels { method, status };
        self.requests.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(elapsed_secs);
    }

    pub fn record_result<T, E>(&self, method: Method, result: &Result<T, E>, elapsed_secs: f64) {
        let status = if result.is_ok() {
            Status::Success
        } else {
            Status::Error
        };
        self.record(method, status, elapsed_secs);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
