/// meminfo 文本解析
///
/// 每行形如 `MemTotal:  16336236 kB`，只接受恰好三个空白分隔字段且数值为整数的行，
/// 其余行直接跳过。

use std::str::Lines;

/// 解析出的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub name: &'a str,
    pub value: i64,
    /// 原样保留的单位符号
    pub unit: &'a str,
}

/// 解析单行，格式不合法时返回 None
pub fn parse_line(line: &str) -> Option<Record<'_>> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let value = tokens.next()?;
    let unit = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let value = value.parse::<i64>().ok()?;

    Some(Record {
        name: name.trim_end_matches(':'),
        value,
        unit,
    })
}

/// 按行惰性产出记录
#[derive(Debug, Clone)]
pub struct Records<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(parse_line)
    }
}

/// 解析整段文本，重复调用即可从头开始
pub fn parse(text: &str) -> Records<'_> {
    Records {
        lines: text.lines(),
    }
}
