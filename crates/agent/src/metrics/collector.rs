/// 内存指标收集器
///
/// 负责读取 meminfo 数据源并调用采样器，数据源不可读时跳过本轮

use memstat_common::models::constants;
use memstat_common::utils::format_bytes;
use memstat_common::{CollectionReport, Error, Result, Sampler, UnitSymbol};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct MemoryCollector {
    proc_path: PathBuf,
    sampler: Arc<Sampler>,
}

impl MemoryCollector {
    pub fn new(proc_path: impl Into<PathBuf>, sampler: Sampler) -> Self {
        Self {
            proc_path: proc_path.into(),
            sampler: Arc::new(sampler),
        }
    }

    pub fn proc_path(&self) -> &Path {
        &self.proc_path
    }

    /// 读取数据源全文
    pub async fn read_source(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.proc_path)
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{}: {}", self.proc_path.display(), e)))
    }

    /// 执行一次采集，数据源不可读时返回 None
    pub async fn collect(&self) -> Option<CollectionReport> {
        let text = match self.read_source().await {
            Ok(text) => text,
            Err(e) => {
                warn!("跳过本轮采集: {}", e);
                return None;
            }
        };

        let metrics = self.sampler.sample(&text);
        let target = self.sampler.target_unit();
        for metric in &metrics {
            debug!("{} = {} {}", metric.name, metric.value, target);
        }

        if let Some(actual_free) = metrics
            .iter()
            .find(|m| m.name == constants::ACTUAL_FREE_METRIC)
        {
            info!(
                "采集完成: {} 个指标, 实际可用内存 {}",
                metrics.len(),
                format_bytes(target.convert(actual_free.value, UnitSymbol::Byte))
            );
        }

        Some(CollectionReport {
            collected_at: chrono::Utc::now().timestamp(),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memstat_common::{Metric, SamplerConfig};

    fn fixture(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("meminfo-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn kilobyte_sampler() -> Sampler {
        Sampler::new(SamplerConfig {
            target_units: vec![UnitSymbol::Kilobyte],
            ..SamplerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_collect_from_file() {
        let path = fixture(
            "MemTotal: 1024 kB\nMemFree: 512 kB\nBuffers: 100 kB\nCached: 50 kB\nSwapFree: 200 kB\nHugePages_Total: 0\n",
        );
        let collector = MemoryCollector::new(&path, kilobyte_sampler());

        let report = collector.collect().await.unwrap();
        assert_eq!(
            report.metrics,
            vec![
                Metric::gauge("MemTotal", 1024.0),
                Metric::gauge("SwapFree", 200.0),
                Metric::gauge("MemActualFree", 662.0),
            ]
        );
        assert!(report.collected_at > 0);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_source_skips_cycle() {
        let path = std::env::temp_dir().join(format!("missing-{}", uuid::Uuid::new_v4()));
        let collector = MemoryCollector::new(&path, kilobyte_sampler());

        assert!(collector.read_source().await.is_err());
        assert!(collector.collect().await.is_none());
    }
}
