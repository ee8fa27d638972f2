/// memstat - Agent
///
/// 运行在宿主机上，周期读取 meminfo 并发布内存指标

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod config;
mod metrics;

use memstat_common::Sampler;
use metrics::{LogPublisher, MemoryCollector, MetricNaming, MetricPublisher, PrometheusPublisher, Scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    dotenvy::dotenv().ok();
    let cfg = config::Config::load()?;

    // 初始化日志
    // 可以通过环境变量 RUST_LOG 设置日志级别，例如：
    // RUST_LOG=memstat_agent=debug cargo run
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level))
        )
        .init();

    info!("🚀 启动 memstat agent...");
    info!("✅ 配置加载成功");

    if !cfg.enabled {
        info!("采集器已禁用，退出");
        return Ok(());
    }

    let sampler = Sampler::new(cfg.sampler_config()?)?;
    if cfg.byte_unit.len() > 1 {
        warn!(
            "配置了多个目标单位 {:?}，只有第一个 ({}) 生效",
            cfg.byte_unit,
            sampler.target_unit()
        );
    }

    info!(
        "📊 初始化指标收集器 (source: {}, detailed: {}, fields: {})...",
        cfg.proc_path,
        sampler.config().detailed,
        sampler.config().field_allow_list.len()
    );
    let collector = MemoryCollector::new(&cfg.proc_path, sampler);

    let naming = MetricNaming {
        path_prefix: cfg.path_prefix.clone(),
        hostname: cfg.hostname.clone(),
        path: cfg.path.clone(),
    };
    let prometheus = PrometheusPublisher::new(&naming, cfg.textfile_path.as_ref().map(PathBuf::from))?;
    let publishers: Vec<Arc<dyn MetricPublisher>> = vec![
        Arc::new(LogPublisher::new(naming)),
        Arc::new(prometheus),
    ];
    info!("✅ 已初始化 {} 个发布器", publishers.len());

    let scheduler = Scheduler::new(collector, publishers, Duration::from_secs(cfg.interval));

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("监听退出信号失败: {}", e);
            return;
        }
        info!("收到退出信号");
        shutdown.cancel();
    });

    scheduler.run(token).await;

    Ok(())
}
