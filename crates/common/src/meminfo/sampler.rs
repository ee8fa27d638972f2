/// 内存指标采样器
///
/// 驱动解析器，按白名单过滤、换算单位、累加 `MemActualFree`，
/// 产出一次采集周期的完整指标集合。采样器本身不持有可变状态，可在多线程间共享。

use crate::meminfo::{parser, units, UnitSymbol};
use crate::models::{constants, FieldRole, Metric, MetricSample};
use crate::{Error, Result};
use std::collections::BTreeSet;
use tracing::debug;

/// 采样配置
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// 为 true 时保留全部字段
    pub detailed: bool,
    /// 目标单位，只有第一个生效
    pub target_units: Vec<UnitSymbol>,
    /// 字段白名单
    pub field_allow_list: BTreeSet<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            detailed: false,
            target_units: vec![UnitSymbol::Byte],
            field_allow_list: constants::DEFAULT_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
    target: UnitSymbol,
}

impl Sampler {
    /// 创建采样器，目标单位为空时返回配置错误
    pub fn new(config: SamplerConfig) -> Result<Self> {
        let target = *config
            .target_units
            .first()
            .ok_or_else(|| Error::Config("目标单位不能为空".to_string()))?;

        Ok(Self { config, target })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// 实际生效的目标单位
    pub fn target_unit(&self) -> UnitSymbol {
        self.target
    }

    fn keeps(&self, name: &str) -> bool {
        self.config.detailed || self.config.field_allow_list.contains(name)
    }

    /// 对一份 meminfo 文本执行一次采样
    pub fn sample(&self, text: &str) -> MetricSample {
        let mut metrics = Vec::new();
        let mut actual_free = 0.0;

        for record in parser::parse(text) {
            if !self.keeps(record.name) {
                continue;
            }

            let value = match units::convert(record.value, record.unit, self.target) {
                Ok(v) => v,
                Err(e) => {
                    debug!("跳过字段 {}: {}", record.name, e);
                    continue;
                }
            };

            match FieldRole::of(record.name) {
                FieldRole::Direct => metrics.push(Metric::gauge(record.name, value)),
                FieldRole::Aggregated => actual_free += value,
            }
        }

        metrics.push(Metric::gauge(constants::ACTUAL_FREE_METRIC, actual_free));
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "MemTotal: 1024 kB\nMemFree: 512 kB\nBuffers: 100 kB\nCached: 50 kB\nSwapFree: 200 kB\n";

    fn sampler(detailed: bool, unit: UnitSymbol) -> Sampler {
        Sampler::new(SamplerConfig {
            detailed,
            target_units: vec![unit],
            ..SamplerConfig::default()
        })
        .unwrap()
    }

    fn value_of(sample: &MetricSample, name: &str) -> Option<f64> {
        sample.iter().find(|m| m.name == name).map(|m| m.value)
    }

    #[test]
    fn test_default_fields_in_kilobytes() {
        let sample = sampler(false, UnitSymbol::Kilobyte).sample(SAMPLE);
        assert_eq!(
            sample,
            vec![
                Metric::gauge("MemTotal", 1024.0),
                Metric::gauge("SwapFree", 200.0),
                Metric::gauge("MemActualFree", 662.0),
            ]
        );
    }

    #[test]
    fn test_garbage_line_does_not_change_output() {
        let s = sampler(false, UnitSymbol::Kilobyte);
        let expected = s.sample(SAMPLE);

        let head = format!("GarbageLineNoUnits\n{}", SAMPLE);
        let middle = SAMPLE.replacen("Buffers", "GarbageLineNoUnits\nBuffers", 1);
        let tail = format!("{}GarbageLineNoUnits\n", SAMPLE);

        assert_eq!(s.sample(&head), expected);
        assert_eq!(s.sample(&middle), expected);
        assert_eq!(s.sample(&tail), expected);
    }

    #[test]
    fn test_non_allow_listed_field_needs_detailed() {
        let text = format!("{}Dirty: 10 kB\n", SAMPLE);

        let plain = sampler(false, UnitSymbol::Kilobyte).sample(&text);
        assert_eq!(value_of(&plain, "MemActualFree"), Some(662.0));
        assert_eq!(value_of(&plain, "Dirty"), None);

        let detailed = sampler(true, UnitSymbol::Kilobyte).sample(&text);
        assert_eq!(value_of(&detailed, "MemActualFree"), Some(672.0));
        assert_eq!(value_of(&detailed, "Dirty"), None);
    }

    #[test]
    fn test_converts_to_bytes() {
        let sample = sampler(false, UnitSymbol::Byte).sample("MemTotal: 1024 kB\nMemFree: 1024 kB\n");
        assert_eq!(value_of(&sample, "MemTotal"), Some(1_048_576.0));
        assert_eq!(value_of(&sample, "MemActualFree"), Some(1_048_576.0));
    }

    #[test]
    fn test_only_first_target_unit_applies() {
        let s = Sampler::new(SamplerConfig {
            target_units: vec![UnitSymbol::Kilobyte, UnitSymbol::Byte],
            ..SamplerConfig::default()
        })
        .unwrap();
        assert_eq!(s.target_unit(), UnitSymbol::Kilobyte);
        let sample = s.sample("MemTotal: 1024 kB\n");
        assert_eq!(value_of(&sample, "MemTotal"), Some(1024.0));
    }

    #[test]
    fn test_actual_free_always_emitted_once() {
        let s = sampler(false, UnitSymbol::Kilobyte);
        for text in ["", "GarbageLineNoUnits\n", "MemTotal: 1 kB\n", SAMPLE] {
            let sample = s.sample(text);
            let count = sample.iter().filter(|m| m.name == "MemActualFree").count();
            assert_eq!(count, 1);
        }
        assert_eq!(s.sample(""), vec![Metric::gauge("MemActualFree", 0.0)]);
    }

    #[test]
    fn test_direct_fields_never_aggregate() {
        let sample = sampler(true, UnitSymbol::Kilobyte).sample("MemTotal: 1000 kB\nSwapFree: 300 kB\n");
        assert_eq!(value_of(&sample, "MemTotal"), Some(1000.0));
        assert_eq!(value_of(&sample, "SwapFree"), Some(300.0));
        assert_eq!(value_of(&sample, "MemActualFree"), Some(0.0));
    }

    #[test]
    fn test_unknown_unit_drops_only_that_line() {
        let s = sampler(true, UnitSymbol::Kilobyte);
        let sample = s.sample("MemFree: 512 kB\nWeird: 99 pages\nCached: 50 kB\n");
        assert_eq!(value_of(&sample, "MemActualFree"), Some(562.0));
    }

    #[test]
    fn test_sampling_is_idempotent() {
        let s = sampler(true, UnitSymbol::Byte);
        assert_eq!(s.sample(SAMPLE), s.sample(SAMPLE));
    }

    #[test]
    fn test_config_accessor() {
        let s = sampler(true, UnitSymbol::Byte);
        assert!(s.config().detailed);
        assert_eq!(s.config().field_allow_list.len(), 5);
        assert_eq!(s.config().target_units, vec![UnitSymbol::Byte]);
    }

    #[test]
    fn test_empty_target_units_rejected() {
        let err = Sampler::new(SamplerConfig {
            target_units: Vec::new(),
            ..SamplerConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_shared_across_threads() {
        let s = std::sync::Arc::new(sampler(false, UnitSymbol::Kilobyte));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = s.clone();
                std::thread::spawn(move || s.sample(SAMPLE))
            })
            .collect();
        for handle in handles {
            assert_eq!(value_of(&handle.join().unwrap(), "MemActualFree"), Some(662.0));
        }
    }
}
