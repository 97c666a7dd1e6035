use serde::{Deserialize, Serialize};

use crate::models::network::deserialize_number;

/// 批量下单响应 (`POST /api/orders/place-bulk`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkOrderResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BulkOrderData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrderData {
    #[serde(default)]
    pub summary: Option<BulkSummary>,
    #[serde(default)]
    pub successful_orders: Vec<SuccessfulOrder>,
    #[serde(default)]
    pub failed_orders: Vec<FailedOrder>,
}

/// 批量结果统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    #[serde(default)]
    pub successful: usize,
    #[serde(default)]
    pub failed: usize,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessfulOrder {
    pub recipient: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailedOrder {
    pub recipient: String,
    #[serde(default)]
    pub error: String,
}

impl BulkOrderResponse {
    pub fn summary(&self) -> Option<&BulkSummary> {
        self.data.as_ref().and_then(|d| d.summary.as_ref())
    }

    /// 全部成功时，页面会清空当前订单列表
    pub fn all_succeeded(&self) -> bool {
        self.success && self.summary().map(|s| s.failed == 0).unwrap_or(false)
    }

    /// 展示给用户的错误信息
    pub fn display_message(&self) -> &str {
        self.message.as_deref().unwrap_or(
            "An error occurred processing your bulk order. Please try again.",
        )
    }
}
