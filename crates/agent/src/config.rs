/// 配置管理
///
/// 加载顺序：内置默认值 -> `MEMSTAT_CONFIG` 指定的配置文件（可选）-> `MEMSTAT_` 前缀环境变量

use memstat_common::meminfo::{SamplerConfig, UnitSymbol};
use memstat_common::models::constants;
use memstat_common::Error;
use serde::Deserialize;
use validator::Validate;

const ENV_PREFIX: &str = "MEMSTAT";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    pub enabled: bool,
    pub proc_path: String,
    #[validate(range(min = 1))]
    pub interval: u64,
    pub detailed: bool,
    #[validate(length(min = 1))]
    pub byte_unit: Vec<String>,
    pub fields: Vec<String>,
    pub path_prefix: String,
    pub path: String,
    pub hostname: String,
    pub textfile_path: Option<String>,
    pub log_level: String,
}

impl Config {
    /// 从配置文件与环境变量加载配置
    pub fn load() -> anyhow::Result<Self> {
        let file = std::env::var("MEMSTAT_CONFIG").ok();
        Self::build(file.as_deref(), config::Environment::with_prefix(ENV_PREFIX))
    }

    fn build(file: Option<&str>, env: config::Environment) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("enabled", true)?
            .set_default("proc_path", constants::DEFAULT_PROC_PATH)?
            .set_default("interval", constants::DEFAULT_INTERVAL)?
            .set_default("detailed", false)?
            .set_default("byte_unit", vec![constants::DEFAULT_BYTE_UNIT])?
            .set_default("fields", constants::DEFAULT_FIELDS.to_vec())?
            .set_default("path_prefix", "servers")?
            .set_default("path", "memory")?
            .set_default("hostname", detect_hostname())?
            .set_default("log_level", "info")?;

        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        let settings = builder
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("byte_unit")
                    .with_list_parse_key("fields"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> memstat_common::Result<()> {
        self.validate()
            .map_err(|e| Error::Config(format!("验证失败: {}", e)))?;
        self.target_units()?;
        Ok(())
    }

    /// 解析目标单位
    pub fn target_units(&self) -> memstat_common::Result<Vec<UnitSymbol>> {
        self.byte_unit.iter().map(|u| u.parse()).collect()
    }

    /// 生成采样配置
    pub fn sampler_config(&self) -> memstat_common::Result<SamplerConfig> {
        Ok(SamplerConfig {
            detailed: self.detailed,
            target_units: self.target_units()?,
            field_allow_list: self.fields.iter().cloned().collect(),
        })
    }
}

fn detect_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
