use serde::{Deserialize, Serialize};

use crate::models::network::NetworkKey;

/// 手动录入时的默认流量大小 (GB)
pub const DEFAULT_CAPACITY: f64 = 5.0;

/// 单条订单：接收号码 + 流量大小
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub recipient: String,
    pub capacity: f64,
}

impl OrderEntry {
    pub fn new(recipient: impl Into<String>, capacity: f64) -> Self {
        Self {
            recipient: recipient.into(),
            capacity,
        }
    }

    /// 空白占位条目，订单列表永远不会为空
    pub fn placeholder() -> Self {
        Self::new(String::new(), DEFAULT_CAPACITY)
    }

    pub fn is_placeholder(&self) -> bool {
        self.recipient.is_empty()
    }
}

impl Default for OrderEntry {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl std::fmt::Display for OrderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}GB", self.recipient, self.capacity)
    }
}

/// 批量下单请求体 (`POST /api/orders/place-bulk`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrderRequest {
    pub orders: Vec<OrderEntry>,
    pub network_key: NetworkKey,
}
