/// 工具函数集合

/// 格式化字节大小
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// 拼接指标路径：`<prefix>.<host>.<path>.<name>`，空段会被忽略
pub fn metric_path(path_prefix: &str, hostname: &str, path: &str, name: &str) -> String {
    [path_prefix, hostname, path, name]
        .iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace('.', "_"))
        .collect::<Vec<_>>()
        .join(".")
}

/// 转换为合法的 Prometheus 指标名
pub fn sanitize_metric_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == ':' { c } else { '_' })
        .collect();

    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
