/// 周期采集调度
///
/// 按固定间隔执行采集并分发给所有发布器，收到取消信号后在两轮之间退出

use crate::metrics::{MemoryCollector, MetricPublisher};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub struct Scheduler {
    collector: MemoryCollector,
    publishers: Vec<Arc<dyn MetricPublisher>>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        collector: MemoryCollector,
        publishers: Vec<Arc<dyn MetricPublisher>>,
        interval: Duration,
    ) -> Self {
        Self {
            collector,
            publishers,
            interval,
        }
    }

    /// 执行一轮采集，返回成功发布的发布器数量
    pub async fn run_once(&self) -> usize {
        let Some(report) = self.collector.collect().await else {
            return 0;
        };

        let mut published = 0;
        for publisher in &self.publishers {
            match publisher.publish(&report).await {
                Ok(()) => published += 1,
                Err(e) => error!("发布器 {} 发布失败: {}", publisher.name(), e),
            }
        }
        debug!("本轮已发布到 {} 个发布器", published);
        published
    }

    /// 循环执行直到被取消
    pub async fn run(&self, token: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "⏱️ 开始周期采集: source={}, interval={:?}",
            self.collector.proc_path().display(),
            self.interval
        );

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    self.run_once().await;
                }
            }
        }

        info!("采集任务结束");
    }
}
