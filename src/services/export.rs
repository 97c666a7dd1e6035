//! CSV 模板与批量结果导出

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult, FileError};
use crate::models::bulk_result::BulkOrderResponse;

/// 模板文件名
pub const TEMPLATE_FILE_NAME: &str = "bulk_order_template.csv";

/// CSV 模板内容
pub fn csv_template() -> &'static str {
    "recipient,capacity\n0241234567,5\n0551234567,10\n0201234567,3"
}

/// 结果 CSV 中的一行
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    recipient: &'a str,
    status: &'a str,
    detail: &'a str,
    price: String,
}

/// 生成批量结果 CSV；响应中没有统计信息时返回 None
pub fn results_csv(response: &BulkOrderResponse) -> AppResult<Option<String>> {
    let Some(data) = response.data.as_ref() else {
        return Ok(None);
    };
    if data.summary.is_none() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(["Recipient", "Status", "Reference", "Price"])
        .map_err(FileError::from)?;

    let successful = data.successful_orders.iter().map(|o| ResultRow {
        recipient: &o.recipient,
        status: "Success",
        detail: &o.reference,
        price: o.price.to_string(),
    });
    let failed = data.failed_orders.iter().map(|o| ResultRow {
        recipient: &o.recipient,
        status: "Failed",
        detail: &o.error,
        price: "0".to_string(),
    });
    for row in successful.chain(failed) {
        writer.serialize(row).map_err(FileError::from)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FileError::from(csv::Error::from(e.into_error())))?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// 写出 CSV 模板
pub async fn write_template(dir: &Path) -> AppResult<PathBuf> {
    let path = dir.join(TEMPLATE_FILE_NAME);
    write_file(&path, csv_template()).await?;
    info!("📄 已生成模板: {}", path.display());
    Ok(path)
}

/// 写出批量结果，文件名带毫秒时间戳
pub async fn write_results(dir: &Path, response: &BulkOrderResponse) -> AppResult<Option<PathBuf>> {
    let Some(content) = results_csv(response)? else {
        return Ok(None);
    };

    let file_name = format!(
        "bulk_order_results_{}.csv",
        chrono::Utc::now().timestamp_millis()
    );
    let path = dir.join(file_name);
    write_file(&path, &content).await?;
    info!("💾 结果已保存至: {}", path.display());
    Ok(Some(path))
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
