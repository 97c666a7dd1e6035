//! 批量下单流程 - 流程层
//!
//! 流程顺序：
//! 1. 读取输入文件 → 解析（粘贴文本 / CSV）
//! 2. 获取网络目录 → 选择网络
//! 3. 提交前校验 → 试算金额
//! 4. 提交 → 导出结果

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::clients::{OrderApiClient, Session};
use crate::config::Config;
use crate::error::{BusinessError, ConfigError};
use crate::models::bulk_result::BulkOrderResponse;
use crate::models::loaders::{load_catalog_file, load_input_text};
use crate::models::network::{Network, NetworkKey};
use crate::services::bulk_parser::{parse_input, InputFormat, ParseOutcome};
use crate::services::export;
use crate::services::order_sheet::OrderSheet;
use crate::services::pricing::{active_bundles, calculate_total_cost, find_network, unpriced_entries};
use crate::utils::logging;
use crate::workflow::submission_ctx::SubmissionCtx;

/// 流程结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// 没有可提交的订单
    NothingToSubmit,
    /// 试算完成，未提交
    DryRun,
    /// 已提交
    Submitted,
}

/// 一次运行的结果
#[derive(Debug)]
pub struct FlowReport {
    pub outcome: FlowOutcome,
    pub parse: ParseOutcome,
    /// 运行结束时的工作列表（全部成功后会被清空）
    pub sheet: OrderSheet,
    pub network_key: Option<NetworkKey>,
    pub total_cost: f64,
    pub response: Option<BulkOrderResponse>,
    pub results_file: Option<PathBuf>,
}

impl FlowReport {
    fn new(outcome: FlowOutcome, parse: ParseOutcome, sheet: OrderSheet) -> Self {
        Self {
            outcome,
            parse,
            sheet,
            network_key: None,
            total_cost: 0.0,
            response: None,
            results_file: None,
        }
    }
}

/// 批量下单流程
///
/// - 只持有配置和 API 客户端
/// - 会话由调用方传入
pub struct BulkOrderFlow {
    config: Config,
    client: OrderApiClient,
}

impl BulkOrderFlow {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            client: OrderApiClient::new(config)?,
        })
    }

    pub async fn run(&self, session: &Session) -> Result<FlowReport> {
        // ========== 1. 读取并解析 ==========
        let input_path = Path::new(&self.config.input_file);
        let text = load_input_text(input_path)
            .await
            .with_context(|| format!("无法读取订单文件: {}", input_path.display()))?;

        let format = self.config.input_format.resolve(input_path);
        let parse = parse_input(&text, format);
        logging::log_parse_outcome(&parse);

        let mut sheet = OrderSheet::new();
        match format {
            InputFormat::Csv => {
                sheet.apply_csv(&parse);
            }
            InputFormat::Paste | InputFormat::Auto => sheet.apply_paste(&parse),
        }

        if !parse.has_entries() {
            warn!("⚠️ 没有可提交的订单，流程结束");
            return Ok(FlowReport::new(FlowOutcome::NothingToSubmit, parse, sheet));
        }

        // ========== 2. 选择网络 ==========
        let networks = self.load_networks(session).await?;
        let network = select_network(&networks, self.config.network_key.as_deref())?;
        let ctx = SubmissionCtx::new(network.clone(), sheet.len());

        if !network.is_active {
            warn!("{} ⚠️ 该网络当前不可用，订单可能失败", ctx);
        }
        let capacities: Vec<String> = active_bundles(&ctx.network)
            .iter()
            .map(|b| format!("{}GB", b.capacity))
            .collect();
        debug!("{} 可购买套餐: {}", ctx, capacities.join(", "));

        // ========== 3. 校验与试算 ==========
        check_ready(&sheet, self.config.max_recipients)?;

        let total_cost = calculate_total_cost(sheet.entries(), Some(&ctx.network));
        for entry in unpriced_entries(sheet.entries(), &ctx.network) {
            warn!("{} 没有 {}GB 套餐，按 0 计价: {}", ctx, entry.capacity, entry.recipient);
        }
        logging::log_cost(ctx.network.display_name(), ctx.order_count, total_cost);

        let mut report = FlowReport::new(FlowOutcome::DryRun, parse, sheet);
        report.network_key = Some(ctx.network_key().clone());
        report.total_cost = total_cost;

        if self.config.dry_run {
            info!("{} 🧪 试算完成，未提交", ctx);
            return Ok(report);
        }

        // ========== 4. 提交 ==========
        ensure_session(session)?;
        info!("{} 📋 提交批量订单...", ctx);
        let request = report.sheet.to_request(ctx.network_key().clone());
        let response = self
            .client
            .place_bulk(session, &request)
            .await
            .with_context(|| format!("{} 批量下单失败", ctx))?;

        logging::print_final_stats(&response);

        report.results_file =
            export::write_results(Path::new(&self.config.results_dir), &response).await?;

        if response.all_succeeded() {
            report.sheet.clear();
        }
        report.outcome = FlowOutcome::Submitted;
        report.response = Some(response);

        Ok(report)
    }

    /// 离线目录优先，否则请求 API
    async fn load_networks(&self, session: &Session) -> Result<Vec<Network>> {
        match &self.config.catalog_file {
            Some(path) => Ok(load_catalog_file(Path::new(path)).await?),
            None => {
                ensure_session(session)?;
                info!("🌐 正在获取网络目录...");
                Ok(self.client.fetch_networks(session).await?)
            }
        }
    }
}

/// 选择网络：未指定时取目录中的第一个
pub fn select_network<'a>(
    networks: &'a [Network],
    key: Option<&str>,
) -> Result<&'a Network, BusinessError> {
    match key {
        None => networks.first().ok_or(BusinessError::NoNetworkSelected),
        Some(key) => {
            let wanted = NetworkKey::find(key);
            find_network(networks, &wanted).ok_or_else(|| BusinessError::UnknownNetwork {
                key: wanted.to_string(),
            })
        }
    }
}

/// 调用 API 前确认已登录
pub fn ensure_session(session: &Session) -> Result<(), ConfigError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ConfigError::MissingToken)
    }
}

/// 提交前校验
pub fn check_ready(sheet: &OrderSheet, max_recipients: usize) -> Result<(), BusinessError> {
    let invalid = sheet.invalid_count();
    if invalid > 0 {
        return Err(BusinessError::InvalidRecipients { count: invalid });
    }
    if sheet.len() > max_recipients {
        return Err(BusinessError::TooManyRecipients {
            count: sheet.len(),
            max: max_recipients,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::network::Bundle;
    use crate::services::bulk_parser::parse_bulk_text;

    fn network(key: NetworkKey) -> Network {
        Network {
            network_key: key,
            name: None,
            is_active: true,
            bundles: vec![Bundle::new(5.0, 10.0)],
        }
    }

    #[test]
    fn test_select_network() {
        let networks = vec![network(NetworkKey::Yello), network(NetworkKey::Telecel)];
        assert_eq!(
            select_network(&networks, None).unwrap().network_key,
            NetworkKey::Yello
        );
        assert_eq!(
            select_network(&networks, Some("telecel")).unwrap().network_key,
            NetworkKey::Telecel
        );
        assert_eq!(
            select_network(&networks, Some("GLO")).unwrap_err(),
            BusinessError::UnknownNetwork {
                key: "GLO".to_string()
            }
        );
        assert_eq!(
            select_network(&[], None).unwrap_err(),
            BusinessError::NoNetworkSelected
        );
    }

    #[test]
    fn test_check_ready() {
        let mut sheet = OrderSheet::new();
        assert_eq!(
            check_ready(&sheet, 50),
            Err(BusinessError::InvalidRecipients { count: 1 })
        );

        sheet.apply_paste(&parse_bulk_text("0241234567, 5\n0551234567, 5\n0201234567, 5"));
        assert!(check_ready(&sheet, 50).is_ok());
        assert_eq!(
            check_ready(&sheet, 2),
            Err(BusinessError::TooManyRecipients { count: 3, max: 2 })
        );
    }

    #[test]
    fn test_ensure_session() {
        assert!(ensure_session(&Session::new("tok")).is_ok());
        assert_eq!(
            ensure_session(&Session::new("  ")),
            Err(ConfigError::MissingToken)
        );
    }

    #[tokio::test]
    async fn test_blank_session_stops_before_submit() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("orders.txt");
        std::fs::write(&input, "0241234567, 5").unwrap();
        let catalog = dir.path().join("catalog.toml");
        std::fs::write(
            &catalog,
            "[[networks]]\nnetwork_key = \"YELLO\"\n\n[[networks.bundles]]\ncapacity = 5\nprice = 10.0\n",
        )
        .unwrap();

        let config = Config {
            input_file: input.to_string_lossy().to_string(),
            catalog_file: Some(catalog.to_string_lossy().to_string()),
            results_dir: dir.path().to_string_lossy().to_string(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let flow = BulkOrderFlow::new(&config).unwrap();

        let err = flow.run(&Session::new("")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_ctx_display() {
        let ctx = SubmissionCtx::new(network(NetworkKey::Yello), 3);
        assert_eq!(ctx.to_string(), "[网络 MTN#YELLO 订单 3 条]");
    }
}
