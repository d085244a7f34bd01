//! 纯文本输出
//!
//! 终端和日志文件共用同一份文本

use crate::models::StagedFile;
use crate::render::labels::{criterion_name, file_icon, section_name};
use crate::render::report::{RenderedEntry, RenderedReport};

/// 格式化文件大小，例如 `0 Bytes`、`1.5 KB`、`10 MB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// 分数显示：整数不带小数点
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

/// 文件列表，每行一个文件
pub fn format_file_list(files: &[StagedFile]) -> String {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            format!(
                "  [{}] {} {} ({})\n",
                index,
                file_icon(file.kind()),
                file.name,
                format_file_size(file.size)
            )
        })
        .collect()
}

/// 渲染完整报告
pub fn format_report(report: &RenderedReport) -> String {
    let mut lines = vec![
        "=".repeat(60),
        format!(
            "总分: {}/100  [{}]",
            report.overall.score, report.overall.label
        ),
        "=".repeat(60),
    ];

    for entry in &report.entries {
        lines.push(String::new());
        lines.extend(entry_lines(entry));
    }

    lines.push("─".repeat(60));
    lines.join("\n") + "\n"
}

/// 单个类别的文本行
fn entry_lines(entry: &RenderedEntry) -> Vec<String> {
    let mut lines = vec![
        format!(
            "■ {}  {}/100 ({})",
            section_name(&entry.category),
            format_score(entry.score),
            entry.score_class
        ),
        format!("  评价: {}", entry.feedback),
        "  优点:".to_string(),
    ];
    lines.extend(entry.strengths.iter().map(|item| format!("    + {}", item)));

    lines.push("  改进:".to_string());
    lines.extend(entry.improvements.iter().map(|item| format!("    - {}", item)));

    if !entry.criteria.is_empty() {
        lines.push("  检查项:".to_string());
        lines.extend(entry.criteria.iter().map(|(key, ok)| {
            let mark = if *ok { "✓" } else { "✗" };
            format!("    {} {}", mark, criterion_name(key))
        }));
    }

    lines
}
