//! 批量订单文本解析
//!
//! 两条入口：
//! - `parse_bulk_text`：粘贴的文本，每行 `号码, 流量` 或 `号码 流量`，逐行报错
//! - `parse_csv`：上传的 CSV，可选表头，流量缺省为 5，无效行直接跳过

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::models::order::{OrderEntry, DEFAULT_CAPACITY};
use crate::services::phone::{is_valid_ghanaian_mobile, normalize_phone};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading number pattern is static and always compiles")
});

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// 粘贴文本
    Paste,
    /// CSV 文件
    Csv,
    /// 按文件扩展名判断
    Auto,
}

impl InputFormat {
    /// 将 `Auto` 解析为具体格式
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            InputFormat::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false);
                if is_csv {
                    InputFormat::Csv
                } else {
                    InputFormat::Paste
                }
            }
            other => other,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paste" | "text" | "txt" => Ok(InputFormat::Paste),
            "csv" => Ok(InputFormat::Csv),
            "auto" | "" => Ok(InputFormat::Auto),
            other => Err(format!("unknown input format: {}", other)),
        }
    }
}

/// 一次解析的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// 通过校验的订单，保持输入顺序
    pub entries: Vec<OrderEntry>,
    /// 逐行错误，行号从 1 开始
    pub errors: Vec<String>,
    /// 给用户看的单条提示
    pub message: Option<String>,
}

impl ParseOutcome {
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// 解析后的工作列表；没有有效条目时退回一个占位条目
    pub fn working_entries(&self) -> Vec<OrderEntry> {
        if self.entries.is_empty() {
            vec![OrderEntry::placeholder()]
        } else {
            self.entries.clone()
        }
    }
}

/// 按格式分发解析
pub fn parse_input(text: &str, format: InputFormat) -> ParseOutcome {
    match format {
        InputFormat::Csv => parse_csv(text),
        InputFormat::Paste | InputFormat::Auto => parse_bulk_text(text),
    }
}

/// 解析粘贴的批量文本
///
/// 部分成功即接受：只要有一条有效记录，就返回有效记录并附带错误汇总
pub fn parse_bulk_text(text: &str) -> ParseOutcome {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for (line_no, line) in non_empty_lines(text) {
        let (raw_recipient, raw_capacity) = split_line(line);
        let capacity = raw_capacity.and_then(parse_capacity);
        let recipient = normalize_phone(raw_recipient);

        match capacity {
            None => {
                errors.push(format!(
                    "Line {}: Missing capacity for {}",
                    line_no, recipient
                ));
            }
            Some(capacity) if is_valid_ghanaian_mobile(&recipient) => {
                entries.push(OrderEntry::new(recipient, capacity));
            }
            Some(_) => {
                errors.push(format!("Line {}: Invalid phone number \"{}\"", line_no, line));
            }
        }
    }

    let message = if !entries.is_empty() {
        errors.first().map(|first| {
            format!(
                "Parsed {} valid entries. {} errors: {}",
                entries.len(),
                errors.len(),
                first
            )
        })
    } else {
        Some(errors.first().cloned().unwrap_or_else(|| {
            "No valid entries found. Please include capacity for each number.".to_string()
        }))
    };

    debug!(
        "解析粘贴文本: 有效 {} 条, 错误 {} 条",
        entries.len(),
        errors.len()
    );

    ParseOutcome {
        entries,
        errors,
        message,
    }
}

/// 解析 CSV 内容
///
/// 第一行包含 `recipient`（不区分大小写）时视为表头；号码无效的行静默跳过
pub fn parse_csv(text: &str) -> ParseOutcome {
    let mut entries = Vec::new();

    for (idx, (line_no, line)) in non_empty_lines(text).enumerate() {
        if idx == 0 && line.to_lowercase().contains("recipient") {
            continue;
        }

        let mut parts = line.split(',').map(str::trim);
        let recipient = normalize_phone(parts.next().unwrap_or_default());
        if !is_valid_ghanaian_mobile(&recipient) {
            debug!("CSV 第 {} 行号码无效，已跳过: {}", line_no, line);
            continue;
        }

        // 缺失或非数字用默认值；是数字但不为正数的整行丢弃
        let capacity = match parts.next().and_then(parse_leading_number) {
            None => DEFAULT_CAPACITY,
            Some(value) if value.is_finite() && value > 0.0 => value,
            Some(_) => {
                debug!("CSV 第 {} 行流量不是正数，已跳过: {}", line_no, line);
                continue;
            }
        };
        entries.push(OrderEntry::new(recipient, capacity));
    }

    let message = entries
        .is_empty()
        .then(|| "No valid phone numbers found in CSV".to_string());

    ParseOutcome {
        entries,
        errors: Vec::new(),
        message,
    }
}

/// 解析流量大小：取前导数字（`5GB` → 5），缺失、非数字或非正数均视为缺失
pub fn parse_capacity(raw: &str) -> Option<f64> {
    parse_leading_number(raw).filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_leading_number(raw: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(raw.trim())?;
    m.as_str().parse().ok()
}

/// 去掉空行，保留原始行号（从 1 开始）和去除首尾空白后的内容
fn non_empty_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// 有逗号按第一个逗号拆分，否则按空白拆分
fn split_line(line: &str) -> (&str, Option<&str>) {
    if let Some((recipient, capacity)) = line.split_once(',') {
        (recipient.trim(), Some(capacity.trim()))
    } else {
        let mut parts = line.split_whitespace();
        let recipient = parts.next().unwrap_or_default();
        (recipient, parts.next())
    }
}
