/// 共享数据模型
///
/// 定义采样核心与 Agent 共享的数据结构

use serde::{Deserialize, Serialize};

/// 指标类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricKind {
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "GAUGE",
        }
    }
}

/// 单个指标
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub kind: MetricKind,
}

impl Metric {
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            kind: MetricKind::Gauge,
        }
    }
}

/// 一次采样产生的有序指标集合
pub type MetricSample = Vec<Metric>;

/// 字段角色
///
/// `Direct` 字段单独发布，其余保留字段累加进 `MemActualFree`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Direct,
    Aggregated,
}

impl FieldRole {
    /// 按字段名查询角色
    pub fn of(name: &str) -> Self {
        if constants::DIRECT_FIELDS.contains(&name) {
            Self::Direct
        } else {
            Self::Aggregated
        }
    }
}

/// 一个采集周期的结果（带时间戳）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionReport {
    /// Unix 时间戳（秒）
    pub collected_at: i64,
    pub metrics: MetricSample,
}

/// 常量定义
pub mod constants {
    /// 默认数据源
    pub const DEFAULT_PROC_PATH: &str = "/proc/meminfo";

    /// 默认采集间隔（秒）
    pub const DEFAULT_INTERVAL: u64 = 300;

    /// 默认保留字段
    pub const DEFAULT_FIELDS: &[&str] = &["MemTotal", "MemFree", "Buffers", "Cached", "SwapFree"];

    /// 单独发布的字段
    pub const DIRECT_FIELDS: &[&str] = &["MemTotal", "SwapFree"];

    /// 派生指标名
    pub const ACTUAL_FREE_METRIC: &str = "MemActualFree";

    /// 默认目标单位
    pub const DEFAULT_BYTE_UNIT: &str = "byte";
}
