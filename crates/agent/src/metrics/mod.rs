/// 内存指标采集
///
/// 收集器读取数据源，调度器周期驱动，发布器输出结果

pub mod collector;
pub mod publisher;
pub mod scheduler;

pub use collector::MemoryCollector;
pub use publisher::{LogPublisher, MetricNaming, MetricPublisher, PrometheusPublisher};
pub use scheduler::Scheduler;
