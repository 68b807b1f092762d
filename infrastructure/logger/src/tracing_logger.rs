use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` port backed by `tracing` events under the `notifier` target.
///
/// Every event carries the `component` it was emitted from, so one filter
/// (`RUST_LOG=notifier=debug`) covers the whole pipeline.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "notifier", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "notifier", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "notifier", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "notifier", component = self.component, "{}", message);
    }
}
