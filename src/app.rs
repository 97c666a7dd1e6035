use crate::clients::Session;
use crate::config::Config;
use crate::services::export;
use crate::utils::logging;
use crate::workflow::{BulkOrderFlow, FlowOutcome, FlowReport};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    session: Session,
    flow: BulkOrderFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置无效")?;

        logging::log_startup(&config);

        tokio::fs::create_dir_all(&config.results_dir)
            .await
            .with_context(|| format!("无法创建结果目录: {}", config.results_dir))?;

        if config.write_template {
            export::write_template(Path::new(&config.results_dir)).await?;
        }

        let session = Session::new(config.auth_token.clone());
        let flow = BulkOrderFlow::new(&config)?;

        Ok(Self {
            config,
            session,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<FlowReport> {
        let report = self.flow.run(&self.session).await.map_err(|e| {
            if let Some(app_err) = e.downcast_ref::<crate::error::AppError>() {
                if app_err.is_unauthorized() {
                    warn!("🔒 Session expired. Please login again.");
                }
            }
            e
        })?;

        match report.outcome {
            FlowOutcome::NothingToSubmit => {
                warn!("⚠️ 文件 {} 中没有有效订单", self.config.input_file);
            }
            FlowOutcome::DryRun => {
                info!("✓ 试算完成: 合计 GHS {:.2}", report.total_cost);
            }
            FlowOutcome::Submitted => {
                if report.sheet.is_empty() {
                    info!("✓ 全部订单成功，已清空订单列表");
                } else {
                    warn!("⚠️ 存在失败订单，请检查后重新提交");
                }
            }
        }

        Ok(report)
    }
}
