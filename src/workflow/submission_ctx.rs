//! 批量提交上下文
//!
//! 封装"这一批订单发往哪个网络"这一信息

use std::fmt::Display;

use crate::models::network::{Network, NetworkKey};

/// 批量提交上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 选中的网络（含套餐目录）
    pub network: Network,

    /// 本批订单数
    pub order_count: usize,
}

impl SubmissionCtx {
    pub fn new(network: Network, order_count: usize) -> Self {
        Self {
            network,
            order_count,
        }
    }

    pub fn network_key(&self) -> &NetworkKey {
        &self.network.network_key
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[网络 {}#{} 订单 {} 条]",
            self.network.display_name(),
            self.network.network_key,
            self.order_count
        )
    }
}
