use crate::error::{AppError, AppResult, FileError};
use crate::models::network::Network;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 离线目录文件结构
///
/// ```toml
/// [[networks]]
/// network_key = "YELLO"
///
/// [[networks.bundles]]
/// capacity = 5
/// price = 23.5
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    networks: Vec<Network>,
}

/// 从 TOML 文件加载网络套餐目录（用于离线试算）
pub async fn load_catalog_file(path: &Path) -> AppResult<Vec<Network>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let catalog: CatalogFile = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        "正在加载离线目录: {} ({} 个网络)",
        path.display(),
        catalog.networks.len()
    );

    Ok(catalog.networks)
}
