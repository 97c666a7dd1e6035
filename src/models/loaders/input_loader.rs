use crate::error::{AppError, AppResult};
use std::borrow::Cow;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// 读取待解析的订单文本（粘贴内容或 CSV）
///
/// 读取是唯一的异步步骤，读完后交给同步解析器
pub async fn load_input_text(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!("⚠️ 文件 {} 不是有效的 UTF-8，无效字节已替换", path.display());
    }
    // Excel 导出的 CSV 常带 BOM
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;

    #[tokio::test]
    async fn test_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(&path, "\u{feff}recipient,capacity\n0241234567,5").unwrap();

        let text = load_input_text(&path).await.unwrap();
        assert!(text.starts_with("recipient"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(&path, b"0241234567,5\n\xffbad,5").unwrap();

        let text = load_input_text(&path).await.unwrap();
        assert!(text.starts_with("0241234567,5"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_input_text(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
