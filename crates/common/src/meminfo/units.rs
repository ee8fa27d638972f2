/// 二进制单位换算
///
/// 比特与字节同属一个单位族：相邻前缀相差 1024 倍，1 字节 = 8 比特。

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// 单位符号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSymbol {
    Bit,
    Kilobit,
    Megabit,
    Gigabit,
    Terabit,
    Petabit,
    Exabit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
    Exabyte,
}

impl UnitSymbol {
    /// 识别单位符号，无法识别时返回 None
    pub fn parse(symbol: &str) -> Option<Self> {
        let unit = match symbol {
            "b" => Self::Bit,
            "kbit" | "Kibit" => Self::Kilobit,
            "Mbit" | "Mibit" => Self::Megabit,
            "Gbit" | "Gibit" => Self::Gigabit,
            "Tbit" | "Tibit" => Self::Terabit,
            "Pbit" | "Pibit" => Self::Petabit,
            "Ebit" | "Eibit" => Self::Exabit,
            "B" => Self::Byte,
            "kB" | "KiB" => Self::Kilobyte,
            "MB" | "MiB" => Self::Megabyte,
            "GB" | "GiB" => Self::Gigabyte,
            "TB" | "TiB" => Self::Terabyte,
            "PB" | "PiB" => Self::Petabyte,
            "EB" | "EiB" => Self::Exabyte,
            other => return Self::parse_long_name(other),
        };
        Some(unit)
    }

    // 全称不区分大小写
    fn parse_long_name(name: &str) -> Option<Self> {
        let unit = match name.to_ascii_lowercase().as_str() {
            "bit" => Self::Bit,
            "kilobit" => Self::Kilobit,
            "megabit" => Self::Megabit,
            "gigabit" => Self::Gigabit,
            "terabit" => Self::Terabit,
            "petabit" => Self::Petabit,
            "exabit" => Self::Exabit,
            "byte" => Self::Byte,
            "kilobyte" => Self::Kilobyte,
            "megabyte" => Self::Megabyte,
            "gigabyte" => Self::Gigabyte,
            "terabyte" => Self::Terabyte,
            "petabyte" => Self::Petabyte,
            "exabyte" => Self::Exabyte,
            _ => return None,
        };
        Some(unit)
    }

    /// 标准符号
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "bit",
            Self::Kilobit => "kbit",
            Self::Megabit => "Mbit",
            Self::Gigabit => "Gbit",
            Self::Terabit => "Tbit",
            Self::Petabit => "Pbit",
            Self::Exabit => "Ebit",
            Self::Byte => "B",
            Self::Kilobyte => "kB",
            Self::Megabyte => "MB",
            Self::Gigabyte => "GB",
            Self::Terabyte => "TB",
            Self::Petabyte => "PB",
            Self::Exabyte => "EB",
        }
    }

    /// 1024 的幂次
    fn exponent(&self) -> i32 {
        match self {
            Self::Bit | Self::Byte => 0,
            Self::Kilobit | Self::Kilobyte => 1,
            Self::Megabit | Self::Megabyte => 2,
            Self::Gigabit | Self::Gigabyte => 3,
            Self::Terabit | Self::Terabyte => 4,
            Self::Petabit | Self::Petabyte => 5,
            Self::Exabit | Self::Exabyte => 6,
        }
    }

    /// 每单位包含的比特数
    fn bits(&self) -> f64 {
        let scale = 1024f64.powi(self.exponent());
        match self {
            Self::Bit
            | Self::Kilobit
            | Self::Megabit
            | Self::Gigabit
            | Self::Terabit
            | Self::Petabit
            | Self::Exabit => scale,
            _ => scale * 8.0,
        }
    }

    /// 将 `value` 从当前单位换算为 `target`
    pub fn convert(&self, value: f64, target: UnitSymbol) -> f64 {
        if *self == target {
            return value;
        }
        value * self.bits() / target.bits()
    }
}

impl fmt::Display for UnitSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::Config(format!("未知单位: {}", s)))
    }
}

/// 按单位符号换算数值
///
/// 任一符号无法识别时返回 `Error::UnitConversion`
pub fn convert(value: i64, from: &str, to: UnitSymbol) -> Result<f64> {
    let source = UnitSymbol::parse(from).ok_or_else(|| Error::UnitConversion {
        from: from.to_string(),
        to: to.to_string(),
    })?;
    // 换算结果统一为 f64，超过 2^53 的整数会丢失精度
    Ok(source.convert(value as f64, to))
}
