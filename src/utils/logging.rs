use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter("packsmith=info")
            .with_target(false)
            .init();
    }

    pub fn resolve_start(mode: &str, root: &str) {
        info!("🧩 Packsmith - Build Plan Resolver");
        info!("═══════════════════════════════════════");
        info!("📁 Project: {}", root);
        info!("🎛️  Mode: {}", mode);
    }

    pub fn plan_written(path: &str) {
        info!("📦 Plan written to {}", path);
    }

    pub fn plan_summary(entries: usize, rules: usize, plugins: usize, minimizers: usize) {
        info!("");
        info!("📊 Plan Summary:");
        info!("  • Entry points: {}", entries);
        info!("  • Transform rules: {}", rules);
        info!("  • Plugins: {}", plugins);
        info!("  • Minimizers: {}", minimizers);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
