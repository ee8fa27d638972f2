use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("单位转换失败: {from} -> {to}")]
    UnitConversion { from: String, to: String },

    #[error("数据源不可读: {0}")]
    SourceUnavailable(String),

    #[error("指标发布失败: {0}")]
    Publish(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 统一结果类型
pub type Result<T> = std::result::Result<T, Error>;
