/// meminfo 采样核心
///
/// 纯函数式：文本由调用方读取，这里只负责解析、过滤、换算与聚合

pub mod parser;
pub mod sampler;
pub mod units;

pub use parser::{parse, Record};
pub use sampler::{Sampler, SamplerConfig};
pub use units::UnitSymbol;
