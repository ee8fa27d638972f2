/// memstat - 公共库
///
/// 提供 meminfo 采样核心、共享数据模型、错误处理与工具函数

pub mod errors;
pub mod meminfo;
pub mod models;
pub mod utils;

// 重新导出常用类型
pub use errors::{Error, Result};
pub use meminfo::{Sampler, SamplerConfig, UnitSymbol};
pub use models::{CollectionReport, Metric, MetricKind, MetricSample};
