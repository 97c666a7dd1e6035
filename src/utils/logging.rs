/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::bulk_result::BulkOrderResponse;
use crate::services::bulk_parser::ParseOutcome;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 info / debug；重复调用无副作用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量流量订单");
    info!("📄 输入文件: {}", config.input_file);
    info!("📊 单次上限: {} 个号码", config.max_recipients);
    if config.dry_run {
        info!("🧪 试算模式：不会提交订单");
    }
    info!("{}", "=".repeat(60));
}

/// 记录解析结果
pub fn log_parse_outcome(outcome: &ParseOutcome) {
    info!("✓ 解析出 {} 条有效订单", outcome.entries.len());
    for error in &outcome.errors {
        warn!("⚠️ {}", truncate_text(error, 120));
    }
    if let Some(message) = &outcome.message {
        info!("💡 {}", message);
    }
}

/// 记录试算金额
pub fn log_cost(network: &str, count: usize, total: f64) {
    info!("💰 网络 {}: {} 条订单, 合计 GHS {:.2}", network, count, total);
}

/// 打印最终统计信息
pub fn print_final_stats(response: &BulkOrderResponse) {
    info!("\n{}", "=".repeat(60));
    info!("📊 批量下单完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));

    match response.summary() {
        Some(summary) => {
            info!("✅ 成功: {}", summary.successful);
            info!("❌ 失败: {}", summary.failed);
            info!("💰 总金额: GHS {:.2}", summary.total_cost);
            if let Some(data) = &response.data {
                for order in &data.failed_orders {
                    warn!("  ✗ {} - {}", order.recipient, order.error);
                }
            }
        }
        None => warn!("❌ {}", response.display_message()),
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("0241234567", 20), "0241234567");
        assert_eq!(truncate_text("Line 1: Invalid", 4), "Line...");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
