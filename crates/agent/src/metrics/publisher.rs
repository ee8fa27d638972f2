/// 指标发布
///
/// 采样结果交给各发布器处理：日志输出、Prometheus 注册表（可选写入 textfile）

use async_trait::async_trait;
use memstat_common::utils::{metric_path, sanitize_metric_name};
use memstat_common::{CollectionReport, Error, Metric, Result};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 指标命名信息
#[derive(Debug, Clone)]
pub struct MetricNaming {
    pub path_prefix: String,
    pub hostname: String,
    pub path: String,
}

impl MetricNaming {
    /// 完整的点分路径
    pub fn full_path(&self, name: &str) -> String {
        metric_path(&self.path_prefix, &self.hostname, &self.path, name)
    }
}

/// 发布器 Trait
#[async_trait]
pub trait MetricPublisher: Send + Sync + 'static {
    /// 发布器名称
    fn name(&self) -> &str;

    /// 发布一个采集周期的结果
    async fn publish(&self, report: &CollectionReport) -> Result<()>;
}

/// 日志发布器
pub struct LogPublisher {
    naming: MetricNaming,
}

impl LogPublisher {
    pub fn new(naming: MetricNaming) -> Self {
        Self { naming }
    }

    /// 单条指标的日志行：`<路径> <值> <类型> <时间戳>`
    pub fn format_line(&self, metric: &Metric, collected_at: i64) -> String {
        format!(
            "{} {} {} {}",
            self.naming.full_path(&metric.name),
            metric.value,
            metric.kind.as_str(),
            collected_at
        )
    }
}

#[async_trait]
impl MetricPublisher for LogPublisher {
    fn name(&self) -> &str {
        "log"
    }

    async fn publish(&self, report: &CollectionReport) -> Result<()> {
        for metric in &report.metrics {
            info!("{}", self.format_line(metric, report.collected_at));
        }
        debug!("{}", serde_json::to_string(report)?);
        Ok(())
    }
}

/// Prometheus 发布器
pub struct PrometheusPublisher {
    registry: Registry,
    gauges: GaugeVec,
    hostname: String,
    textfile_path: Option<PathBuf>,
}

impl PrometheusPublisher {
    pub fn new(naming: &MetricNaming, textfile_path: Option<PathBuf>) -> Result<Self> {
        let name = sanitize_metric_name(&format!("{}_{}", naming.path_prefix, naming.path));
        let gauges = GaugeVec::new(
            Opts::new(name, "Memory statistics sampled from meminfo"),
            &["host", "field"],
        )
        .map_err(|e| Error::Publish(e.to_string()))?;

        let registry = Registry::new();
        registry
            .register(Box::new(gauges.clone()))
            .map_err(|e| Error::Publish(e.to_string()))?;

        Ok(Self {
            registry,
            gauges,
            hostname: naming.hostname.clone(),
            textfile_path,
        })
    }

    /// 以文本格式导出当前注册表
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| Error::Publish(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| Error::Internal(e.to_string()))
    }

    /// 先写临时文件再重命名，避免抓取到半截内容
    async fn write_textfile(&self, path: &Path) -> Result<()> {
        let content = self.render()?;
        let tmp = path.with_extension("prom.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| Error::Publish(format!("写入 {} 失败: {}", tmp.display(), e)))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(Error::Publish(format!("重命名 {} 失败: {}", path.display(), e)));
        }
        Ok(())
    }
}

#[async_trait]
impl MetricPublisher for PrometheusPublisher {
    fn name(&self) -> &str {
        "prometheus"
    }

    async fn publish(&self, report: &CollectionReport) -> Result<()> {
        // 字段可能在下一轮消失，先清空
        self.gauges.reset();
        for metric in &report.metrics {
            self.gauges
                .with_label_values(&[self.hostname.as_str(), metric.name.as_str()])
                .set(metric.value);
        }

        if let Some(path) = &self.textfile_path {
            self.write_textfile(path).await?;
            debug!("已写入 textfile: {}", path.display());
        }
        Ok(())
    }
}
