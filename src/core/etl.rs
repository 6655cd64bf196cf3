use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Read, index, write. Nothing reaches the output unless every line parsed.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Building make-model index");
        if self.monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }
        self.monitor.log_stats("Start");

        let lines = self.pipeline.extract().await?;
        tracing::info!("Read {} line(s)", lines.len());
        self.monitor.log_stats("Extract");

        let index = self.pipeline.transform(lines).await?;
        tracing::info!(
            "Indexed {} model(s) across {} make(s)",
            index.values().map(Vec::len).sum::<usize>(),
            index.len()
        );
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(index).await?;
        tracing::info!("Index written to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
